//! Ambiguous language check.

use anyhow::Result;

use crate::models::{Severity, SpecificationItem, Violation};
use crate::utils::truncate;
use crate::verify::terms::keywords;
use crate::verify::Corpus;

/// Vocabulary that leaves a specification open to interpretation.
const AMBIGUOUS_INDICATORS: &[&str] = &[
    "appropriate",
    "reasonable",
    "adequate",
    "sufficient",
    "as needed",
    "if possible",
    "etc",
    "and so on",
    "various",
    "several",
    "some",
    "many",
    "few",
    "fast",
    "slow",
    "good",
    "bad",
    "efficient",
    "might",
    "may",
    "could",
    "possibly",
    "probably",
    "tbd",
    "todo",
    "to be determined",
    "to be decided",
];

const MAX_EVIDENCE: usize = 5;

/// Requirements overlapping a flagged item by at least this many keywords
/// are candidates for source-document clarification.
const RELATED_OVERLAP: usize = 2;

pub fn run(corpus: &Corpus) -> Result<Vec<Violation>> {
    let mut flagged: Vec<(&SpecificationItem, Vec<&str>)> = Vec::new();

    for spec in corpus.specifications {
        let spec_lower = spec.text.to_lowercase();
        let found: Vec<&str> = AMBIGUOUS_INDICATORS
            .iter()
            .copied()
            .filter(|ind| spec_lower.contains(ind))
            .collect();
        if !found.is_empty() {
            flagged.push((spec, found));
        }
    }

    if flagged.is_empty() {
        return Ok(Vec::new());
    }

    let evidence = flagged
        .iter()
        .take(MAX_EVIDENCE)
        .map(|(s, found)| {
            format!(
                "Line {}: '{}' (contains: {})",
                s.line_number,
                truncate(&s.text, 80),
                found.join(", ")
            )
        })
        .collect();

    // Requirements sharing vocabulary with the first flagged item point the
    // deep analyzer at source material that may resolve the ambiguity.
    let first_keywords = keywords(&flagged[0].0.text);
    let related: Vec<String> = corpus
        .requirements
        .iter()
        .filter(|r| {
            keywords(&r.text)
                .intersection(&first_keywords)
                .count()
                >= RELATED_OVERLAP
        })
        .map(|r| r.id.clone())
        .collect();

    Ok(vec![Violation::new(
        Severity::Medium,
        "AMBIGUITY",
        format!("{} ambiguous specifications detected", flagged.len()),
        "These specifications contain vague or ambiguous language:",
    )
    .with_evidence(evidence)
    .with_line_numbers(flagged.iter().map(|(s, _)| s.line_number).collect())
    .with_related_requirements(related)])
}
