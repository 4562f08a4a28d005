//! Terminology consistency check.

use anyhow::Result;

use crate::models::{Severity, Violation};
use crate::verify::Corpus;

/// Synonym groups that should each collapse to a single term.
const SYNONYM_GROUPS: &[&[&str]] = &[
    &["user", "customer", "client"],
    &["login", "sign in", "authenticate"],
    &["database", "data store", "repository"],
    &["api", "service", "endpoint"],
];

pub fn run(corpus: &Corpus) -> Result<Vec<Violation>> {
    let spec_text = corpus.specification_text();

    let drifts: Vec<String> = SYNONYM_GROUPS
        .iter()
        .filter_map(|group| {
            let found: Vec<&str> = group
                .iter()
                .copied()
                .filter(|term| spec_text.contains(term))
                .collect();
            if found.len() > 1 {
                Some(format!("Inconsistent terminology: {}", found.join(" vs ")))
            } else {
                None
            }
        })
        .collect();

    if drifts.is_empty() {
        return Ok(Vec::new());
    }

    Ok(vec![Violation::new(
        Severity::Low,
        "CONSISTENCY",
        format!("{} consistency issues", drifts.len()),
        "Found inconsistent terminology or formatting:",
    )
    .with_evidence(drifts)])
}
