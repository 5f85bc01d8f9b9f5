//! HTTP directory provider — queries a places-style JSON endpoint.
//!
//! The concrete directory API is deliberately pluggable behind
//! `DirectoryProvider`; this implementation targets any endpoint that accepts
//! a text query plus location and returns a JSON body of the shape
//! `{"results": [{"name", "address", "contact", "description"}]}`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::SearchError;

use super::{DirectoryProvider, RawListing};

#[derive(Debug, Deserialize)]
struct DirectoryResponse {
    #[serde(default)]
    results: Vec<DirectoryResult>,
}

#[derive(Debug, Deserialize)]
struct DirectoryResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    contact: String,
    #[serde(default)]
    description: String,
}

/// Directory provider backed by an HTTP places endpoint.
pub struct HttpDirectoryProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl HttpDirectoryProvider {
    pub fn new(base_url: String, api_key: Option<SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl DirectoryProvider for HttpDirectoryProvider {
    async fn query(
        &self,
        category: &str,
        location: &str,
    ) -> Result<Vec<RawListing>, SearchError> {
        let mut request = self
            .client
            .get(&self.base_url)
            .query(&[("query", format!("{category} in {location}"))]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.expose_secret())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::DirectoryUnavailable {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SearchError::DirectoryUnavailable {
                reason: format!("directory returned HTTP {}", response.status()),
            });
        }

        let body: DirectoryResponse =
            response
                .json()
                .await
                .map_err(|e| SearchError::DirectoryUnavailable {
                    reason: format!("bad directory response: {e}"),
                })?;

        tracing::debug!(category, location, count = body.results.len(), "directory page fetched");

        Ok(body
            .results
            .into_iter()
            .map(|r| RawListing {
                name: r.name,
                address: r.address,
                contact: r.contact,
                description: r.description,
            })
            .collect())
    }
}
