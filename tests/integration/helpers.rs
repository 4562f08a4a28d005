//! Shared fixtures for pipeline integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use specgate::commands::verify::VerifyOptions;
use specgate::config::DEFAULT_API_TIMEOUT_SECS;

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Options for a plain run: no deep analysis, JSON written to `output`.
pub fn json_options(
    human: PathBuf,
    requirements: PathBuf,
    constitution: PathBuf,
    specification: PathBuf,
    output: PathBuf,
) -> VerifyOptions {
    VerifyOptions {
        human_inputs: vec![human],
        requirements: vec![requirements],
        constitution,
        specification,
        output: Some(output),
        json: true,
        deep_analysis: false,
        api_config: None,
        api_url: None,
        api_key: None,
        api_timeout: DEFAULT_API_TIMEOUT_SECS,
    }
}

/// A constitution with no obligation language, so no principle findings.
pub const ADVISORY_CONSTITUTION: &str = "GENERAL\n- Keep interfaces small and focused\n";

pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read report");
    serde_json::from_str(&content).expect("Report is not valid JSON")
}
