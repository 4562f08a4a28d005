//! Source document retrieval client.
//!
//! Fetches original documents (transcripts, emails, design docs) referenced
//! by requirements. Disabled unless an API base URL is configured; every
//! failure degrades to "no enrichment available" for that document only.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::config::ApiConfig;
use crate::models::{SourceDocument, SourceDocumentPayload};

/// Maximum time to establish a TCP connection. The overall request timeout
/// comes from the API configuration.
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("specgate/", env!("CARGO_PKG_VERSION"));

/// Why a single fetch failed. Internal to the client: callers only ever see
/// the absence of a document.
#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Identifier-keyed cache of fetched documents.
///
/// Explicitly constructed and owned by the client; lives for the process.
/// The corpus is bounded by one CLI invocation, so there is no eviction.
#[derive(Debug, Default)]
pub struct DocumentCache {
    documents: HashMap<String, SourceDocument>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, doc_id: &str) -> Option<&SourceDocument> {
        self.documents.get(doc_id)
    }

    pub fn insert(&mut self, doc: SourceDocument) {
        self.documents.insert(doc.doc_id.clone(), doc);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Client for the document retrieval API.
pub struct SourceDocumentClient {
    config: ApiConfig,
    http: Option<Client>,
    cache: DocumentCache,
}

impl SourceDocumentClient {
    /// Build a client from configuration and an explicitly owned cache.
    /// The HTTP client is only constructed when retrieval is usable.
    pub fn new(config: ApiConfig, cache: DocumentCache) -> Result<Self> {
        let http = if config.is_usable() {
            let client = Client::builder()
                .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
                .timeout(Duration::from_secs(config.timeout))
                .user_agent(USER_AGENT)
                .build()
                .context("Failed to create HTTP client")?;
            Some(client)
        } else {
            None
        };

        Ok(Self {
            config,
            http,
            cache,
        })
    }

    /// A disabled client performs no network activity at all.
    pub fn enabled(&self) -> bool {
        self.http.is_some()
    }

    /// Fetch a document by identifier.
    ///
    /// Returns `None` when the client is disabled, the document is unknown,
    /// authorization fails, or the request errors out. Absence means "no
    /// enrichment available", never a fatal condition.
    pub fn fetch(&mut self, doc_id: &str) -> Option<SourceDocument> {
        let http = self.http.as_ref()?;

        if let Some(doc) = self.cache.get(doc_id) {
            return Some(doc.clone());
        }

        let url = format!("{}/documents/{}", self.config.base_url, doc_id);
        match request_document(http, &url, &self.config.api_key, doc_id) {
            Ok(doc) => {
                self.cache.insert(doc.clone());
                Some(doc)
            }
            Err(err) => {
                warn!(doc_id, %err, "source document fetch failed");
                None
            }
        }
    }

    /// Fetch each identifier independently, returning the successful subset.
    /// Partial results are valid.
    pub fn fetch_multiple(&mut self, doc_ids: &[String]) -> Vec<SourceDocument> {
        doc_ids
            .iter()
            .filter_map(|doc_id| self.fetch(doc_id))
            .collect()
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }
}

fn request_document(
    http: &Client,
    url: &str,
    api_key: &str,
    doc_id: &str,
) -> Result<SourceDocument, FetchError> {
    let response = http.get(url).bearer_auth(api_key).send()?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let payload: SourceDocumentPayload = response.json()?;
    Ok(payload.into_document(doc_id, url))
}
