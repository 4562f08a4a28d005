//! Orphaned specification check (scope creep).
//!
//! Symmetric to coverage: a specification item whose keywords barely occur
//! in the requirement corpus does not trace back to any input and is
//! flagged as out of scope.

use anyhow::Result;

use crate::models::{Severity, SpecificationItem, Violation};
use crate::utils::truncate;
use crate::verify::terms::{keywords, overlap_fraction};
use crate::verify::Corpus;

pub const ORPHAN_THRESHOLD: f64 = 0.3;

const MAX_EVIDENCE: usize = 5;

pub fn run(corpus: &Corpus) -> Result<Vec<Violation>> {
    let req_text = corpus.requirement_text();

    let orphaned: Vec<&SpecificationItem> = corpus
        .specifications
        .iter()
        .filter(|spec| {
            overlap_fraction(&keywords(&spec.text), &req_text)
                .is_some_and(|fraction| fraction < ORPHAN_THRESHOLD)
        })
        .collect();

    if orphaned.is_empty() {
        return Ok(Vec::new());
    }

    let evidence = orphaned
        .iter()
        .take(MAX_EVIDENCE)
        .map(|s| format!("{} (line {}): {}", s.id, s.line_number, truncate(&s.text, 100)))
        .collect();

    Ok(vec![Violation::new(
        Severity::High,
        "SCOPE_CREEP",
        format!(
            "{} specification items appear to be out of scope",
            orphaned.len()
        ),
        "These specifications don't clearly relate to any input requirements:",
    )
    .with_evidence(evidence)
    .with_line_numbers(orphaned.iter().map(|s| s.line_number).collect())])
}
