//! Lead Search & Export Service — queries a pluggable business directory,
//! deduplicates and filters the results, and shapes them into an export
//! artifact.

mod places;

pub use places::HttpDirectoryProvider;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SearchError;
use crate::export::{COLUMNS, ExportArtifact, ExportFormat};

/// One raw business record as returned by a directory provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawListing {
    pub name: String,
    pub address: String,
    pub contact: String,
    /// Free-text description, used for keyword filtering.
    pub description: String,
}

/// A pluggable external directory/places provider.
///
/// One query per (category, location) pair, one result sequence back.
/// Pagination and rate limits are the provider's concern.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    async fn query(&self, category: &str, location: &str)
    -> Result<Vec<RawListing>, SearchError>;
}

/// One discovered business. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    pub address: String,
    pub contact: String,
    /// Every queried category this business matched (at least one).
    pub categories: Vec<String>,
    /// The subset of the keyword filter found in its description.
    pub matched_keywords: Vec<String>,
}

/// The request describing one search-and-export invocation.
#[derive(Debug, Clone)]
pub struct LeadExportJob {
    pub id: Uuid,
    /// Resolved category set — the "all" sentinel is already expanded.
    pub categories: Vec<String>,
    pub location: String,
    /// Empty means no filtering.
    pub keywords: Vec<String>,
    pub format: ExportFormat,
    pub created_at: DateTime<Utc>,
}

impl LeadExportJob {
    pub fn new(
        categories: Vec<String>,
        location: String,
        keywords: Vec<String>,
        format: ExportFormat,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            categories,
            location,
            keywords,
            format,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a search-and-export run.
///
/// `NoResults` is an empty-result success state with its own user-facing
/// message, not an error.
#[derive(Debug)]
pub enum SearchOutcome {
    Exported(ExportArtifact),
    NoResults,
}

/// Runs lead-export jobs against a directory provider.
pub struct LeadSearch {
    provider: Arc<dyn DirectoryProvider>,
    timeout: Duration,
}

impl LeadSearch {
    pub fn new(provider: Arc<dyn DirectoryProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Run a search-and-export job.
    ///
    /// Queries the provider once per category in the job's original order,
    /// deduplicates across categories by case-insensitive (name, address)
    /// identity, applies the whole-word keyword filter, and renders the
    /// surviving records into a tabular artifact.
    pub async fn run(&self, job: &LeadExportJob) -> Result<SearchOutcome, SearchError> {
        // The workflow enforces these guards already; re-validate defensively.
        if job.categories.is_empty() {
            return Err(SearchError::InvalidJob {
                reason: "no categories to search".to_string(),
            });
        }
        if job.location.trim().is_empty() {
            return Err(SearchError::InvalidJob {
                reason: "location is empty".to_string(),
            });
        }

        let mut order: Vec<String> = Vec::new();
        let mut merged: HashMap<String, (RawListing, Vec<String>)> = HashMap::new();

        for category in &job.categories {
            let listings = self.query_with_timeout(category, &job.location).await?;
            tracing::debug!(category, count = listings.len(), "directory query returned");

            for listing in listings {
                let key = identity_key(&listing);
                match merged.get_mut(&key) {
                    Some((_, categories)) => {
                        // Same business under another category — record the union
                        if !categories.contains(category) {
                            categories.push(category.clone());
                        }
                    }
                    None => {
                        order.push(key.clone());
                        merged.insert(key, (listing, vec![category.clone()]));
                    }
                }
            }
        }

        let matchers = build_matchers(&job.keywords)?;

        let mut records: Vec<LeadRecord> = Vec::new();
        for key in &order {
            let Some((listing, categories)) = merged.remove(key) else {
                continue;
            };
            let matched: Vec<String> = matchers
                .iter()
                .filter(|(_, re)| re.is_match(&listing.description))
                .map(|(kw, _)| kw.clone())
                .collect();
            if !matchers.is_empty() && matched.is_empty() {
                continue;
            }
            records.push(LeadRecord {
                name: listing.name,
                address: listing.address,
                contact: listing.contact,
                categories,
                matched_keywords: matched,
            });
        }

        if records.is_empty() {
            tracing::info!(job = %job.id, "search finished with zero rows after filtering");
            return Ok(SearchOutcome::NoResults);
        }

        tracing::info!(job = %job.id, rows = records.len(), "search finished");
        Ok(SearchOutcome::Exported(to_artifact(job, &records)))
    }

    async fn query_with_timeout(
        &self,
        category: &str,
        location: &str,
    ) -> Result<Vec<RawListing>, SearchError> {
        match tokio::time::timeout(self.timeout, self.provider.query(category, location)).await {
            Ok(result) => result,
            Err(_) => Err(SearchError::DirectoryUnavailable {
                reason: format!("query timed out after {:?}", self.timeout),
            }),
        }
    }
}

/// Stable dedup identity for a listing across category queries.
fn identity_key(listing: &RawListing) -> String {
    format!(
        "{}|{}",
        listing.name.trim().to_lowercase(),
        listing.address.trim().to_lowercase()
    )
}

/// Compile one whole-word, case-insensitive matcher per keyword.
fn build_matchers(keywords: &[String]) -> Result<Vec<(String, Regex)>, SearchError> {
    keywords
        .iter()
        .map(|kw| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(kw));
            Regex::new(&pattern)
                .map(|re| (kw.clone(), re))
                .map_err(|e| SearchError::InvalidJob {
                    reason: format!("bad keyword \"{kw}\": {e}"),
                })
        })
        .collect()
}

fn to_artifact(job: &LeadExportJob, records: &[LeadRecord]) -> ExportArtifact {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.address.clone(),
                r.contact.clone(),
                r.categories.join("; "),
                r.matched_keywords.join("; "),
            ]
        })
        .collect();
    debug_assert_eq!(rows.first().map(Vec::len), Some(COLUMNS.len()));

    let slug = if job.categories.len() == 1 {
        slugify(&job.categories[0])
    } else {
        "all-categories".to_string()
    };
    let file_name = format!("leads-{slug}.{}", job.format.extension());

    ExportArtifact::new(file_name, job.format, rows)
}

fn slugify(label: &str) -> String {
    let slug: String = label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    slug.split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
