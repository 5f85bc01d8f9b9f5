//! Tabular export artifact for discovered leads.

use serde::{Deserialize, Serialize};

/// Fixed column order for the export artifact.
pub const COLUMNS: [&str; 5] = [
    "name",
    "address",
    "contact",
    "categories",
    "matched_keywords",
];

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// The rendered result of a search-and-export run: one header row plus one
/// row per lead, in the fixed `COLUMNS` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub rows: Vec<Vec<String>>,
}

impl ExportArtifact {
    /// Build an artifact from pre-shaped rows.
    ///
    /// Each row must have exactly `COLUMNS.len()` cells; the caller (the
    /// search service) shapes lead records into rows.
    pub fn new(file_name: String, format: ExportFormat, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == COLUMNS.len()));
        Self {
            file_name,
            format,
            rows,
        }
    }

    /// Number of lead rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the artifact to its textual file contents.
    pub fn render(&self) -> String {
        match self.format {
            ExportFormat::Csv => self.render_csv(),
            ExportFormat::Json => self.render_json(),
        }
    }

    fn render_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&COLUMNS.join(","));
        out.push('\n');
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(|cell| csv_escape(cell)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }

    fn render_json(&self) -> String {
        let objects: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                let map: serde_json::Map<String, serde_json::Value> = COLUMNS
                    .iter()
                    .zip(row)
                    .map(|(col, cell)| ((*col).to_string(), serde_json::Value::from(cell.clone())))
                    .collect();
                serde_json::Value::Object(map)
            })
            .collect();
        // Rendering to a string cannot fail for string-only values
        serde_json::to_string_pretty(&objects).unwrap_or_default()
    }
}

fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
