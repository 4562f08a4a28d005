//! Retrieval API configuration.
//!
//! Assembled from CLI flags or a JSON config file. Deep analysis stays
//! disabled unless a base URL is configured.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default request timeout for document fetches, in seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

fn default_timeout() -> u64 {
    DEFAULT_API_TIMEOUT_SECS
}

/// Configuration for the source document retrieval API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout: DEFAULT_API_TIMEOUT_SECS,
            enabled: false,
        }
    }
}

impl ApiConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read API config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid API config {}", path.display()))
    }

    /// A client can only operate with a base URL to talk to.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.base_url.is_empty()
    }
}
