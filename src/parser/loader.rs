//! Raw document loading.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a document and return its ordered lines.
///
/// Callers decide how a failure is handled: mandatory pipeline inputs abort
/// the run, while batch inputs are reported and skipped.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}
