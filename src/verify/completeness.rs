//! Completeness check.
//!
//! An aspect the requirements talk about but the specification never
//! mentions is a hole, not a disagreement, so it gets its own check
//! separate from per-requirement coverage.

use anyhow::Result;

use crate::models::{Severity, Violation};
use crate::verify::Corpus;

const ASPECTS: &[(&str, &[&str])] = &[
    ("security", &["security", "authentication", "authorization", "encrypt"]),
    ("error_handling", &["error", "exception", "failure", "handle"]),
    ("performance", &["performance", "speed", "latency", "scale"]),
    ("validation", &["validate", "validation", "verify", "check"]),
    ("logging", &["log", "audit", "track", "monitor"]),
];

pub fn run(corpus: &Corpus) -> Result<Vec<Violation>> {
    let spec_text = corpus.specification_text();
    let req_text = corpus.requirement_text();

    let missing: Vec<&str> = ASPECTS
        .iter()
        .filter(|(_, kws)| {
            !kws.iter().any(|k| spec_text.contains(k)) && kws.iter().any(|k| req_text.contains(k))
        })
        .map(|(aspect, _)| *aspect)
        .collect();

    if missing.is_empty() {
        return Ok(Vec::new());
    }

    Ok(vec![Violation::new(
        Severity::High,
        "COMPLETENESS",
        format!("Missing {} important aspects", missing.len()),
        "Requirements mention these aspects, but the specification doesn't address them:",
    )
    .with_evidence(missing.iter().map(|a| a.to_string()).collect())])
}
