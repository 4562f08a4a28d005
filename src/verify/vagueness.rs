//! Vagueness check.
//!
//! Long specification sentences with no number and no obligation marker
//! rarely pin down behavior.

use anyhow::Result;

use crate::models::{Severity, SpecificationItem, Violation};
use crate::utils::truncate;
use crate::verify::Corpus;

const OBLIGATION_MARKERS: &[&str] = &["exactly", "specifically", "must", "shall", "will"];

/// Sentences at or below this length are too short to judge.
const MIN_WORD_COUNT: usize = 10;

const MAX_EVIDENCE: usize = 5;

fn is_vague(spec: &SpecificationItem) -> bool {
    let has_number = spec.text.chars().any(|c| c.is_ascii_digit());
    let text_lower = spec.text.to_lowercase();
    let has_marker = OBLIGATION_MARKERS.iter().any(|m| text_lower.contains(m));
    let word_count = spec.text.split_whitespace().count();

    !has_number && !has_marker && word_count > MIN_WORD_COUNT
}

pub fn run(corpus: &Corpus) -> Result<Vec<Violation>> {
    let vague: Vec<&SpecificationItem> = corpus
        .specifications
        .iter()
        .filter(|s| is_vague(s))
        .collect();

    if vague.is_empty() {
        return Ok(Vec::new());
    }

    let evidence = vague
        .iter()
        .take(MAX_EVIDENCE)
        .map(|s| format!("Line {}: {}", s.line_number, truncate(&s.text, 100)))
        .collect();

    Ok(vec![Violation::new(
        Severity::Medium,
        "VAGUENESS",
        format!("{} vague specifications", vague.len()),
        "These specifications lack concrete details or measurable criteria:",
    )
    .with_evidence(evidence)
    .with_line_numbers(vague.iter().map(|s| s.line_number).collect())])
}
