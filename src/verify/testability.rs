//! Testability check.
//!
//! A specification item counts as testable when it carries a number, an
//! obligation plus capability phrase, or an observable action. Subjective
//! adjectives make an item untestable regardless.

use anyhow::{Context, Result};
use regex::Regex;

use crate::models::{Severity, SpecificationItem, Violation};
use crate::utils::truncate;
use crate::verify::Corpus;

const TESTABLE_PATTERNS: &[&str] = &[
    r"\d+",
    r"(?i)(?:shall|must|will)\s+(?:be|have|support|provide)",
    r"(?i)(?:return|output|display|store|send)",
];

const SUBJECTIVE_WORDS: &[&str] = &[
    "appropriate",
    "adequate",
    "reasonable",
    "user-friendly",
    "intuitive",
    "easy",
    "simple",
    "good",
    "nice",
];

const MAX_EVIDENCE: usize = 5;

pub fn run(corpus: &Corpus) -> Result<Vec<Violation>> {
    let patterns: Vec<Regex> = TESTABLE_PATTERNS
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("Invalid pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;

    let untestable: Vec<&SpecificationItem> = corpus
        .specifications
        .iter()
        .filter(|spec| {
            let is_testable = patterns.iter().any(|re| re.is_match(&spec.text));
            let text_lower = spec.text.to_lowercase();
            let has_subjective = SUBJECTIVE_WORDS.iter().any(|w| text_lower.contains(w));
            !is_testable || has_subjective
        })
        .collect();

    if untestable.is_empty() {
        return Ok(Vec::new());
    }

    let evidence = untestable
        .iter()
        .take(MAX_EVIDENCE)
        .map(|s| format!("Line {}: {}", s.line_number, truncate(&s.text, 100)))
        .collect();

    Ok(vec![Violation::new(
        Severity::Medium,
        "TESTABILITY",
        format!("{} specifications may not be testable", untestable.len()),
        "These specifications lack concrete, measurable acceptance criteria:",
    )
    .with_evidence(evidence)
    .with_line_numbers(untestable.iter().map(|s| s.line_number).collect())])
}
