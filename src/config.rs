//! Configuration types.

use std::time::Duration;

use crate::export::ExportFormat;

/// Workflow engine configuration.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Number of category suggestions requested from the AI.
    pub suggestion_count: usize,
    /// Recommended keyword count range requested from the AI (not enforced).
    pub keyword_range: (usize, usize),
    /// Bounded timeout for a single directory query.
    pub directory_timeout: Duration,
    /// Default format for the export artifact.
    pub export_format: ExportFormat,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            suggestion_count: 5,
            keyword_range: (5, 7),
            directory_timeout: Duration::from_secs(30),
            export_format: ExportFormat::Csv,
        }
    }
}
