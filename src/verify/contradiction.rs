//! Contradiction check.
//!
//! Two specification items are a potential contradiction when they share
//! enough key terms and exactly one of them is negated. Quadratic over the
//! item list, which is acceptable at expected corpus sizes. Token overlap
//! plus a negation marker is a deliberate approximation, not a semantic
//! prover.

use anyhow::Result;

use crate::models::{Severity, SpecificationItem, Violation};
use crate::utils::truncate;
use crate::verify::terms::key_term_set;
use crate::verify::Corpus;

const NEGATIONS: &[&str] = &["not", "no", "never", "without", "cannot", "must not", "shall not"];

/// Pairs sharing fewer key terms than this are never compared further.
const MIN_SHARED_TERMS: usize = 2;
/// A negated/non-negated pair is only reported at this overlap or higher.
const CONTRADICTION_OVERLAP: usize = 3;

const MAX_EVIDENCE: usize = 3;

fn has_negation(text_lower: &str) -> bool {
    NEGATIONS.iter().any(|n| text_lower.contains(n))
}

fn are_contradictory(a: &SpecificationItem, b: &SpecificationItem) -> bool {
    let terms_a = key_term_set(&a.text);
    let terms_b = key_term_set(&b.text);
    let overlap = terms_a.intersection(&terms_b).count();
    if overlap < MIN_SHARED_TERMS {
        return false;
    }

    let negated_a = has_negation(&a.text.to_lowercase());
    let negated_b = has_negation(&b.text.to_lowercase());
    negated_a != negated_b && overlap >= CONTRADICTION_OVERLAP
}

pub fn run(corpus: &Corpus) -> Result<Vec<Violation>> {
    let mut pairs: Vec<(&SpecificationItem, &SpecificationItem)> = Vec::new();

    for (i, first) in corpus.specifications.iter().enumerate() {
        for second in &corpus.specifications[i + 1..] {
            if are_contradictory(first, second) {
                pairs.push((first, second));
            }
        }
    }

    if pairs.is_empty() {
        return Ok(Vec::new());
    }

    let evidence = pairs
        .iter()
        .take(MAX_EVIDENCE)
        .map(|(a, b)| {
            format!(
                "Line {} vs Line {}: '{}' contradicts '{}'",
                a.line_number,
                b.line_number,
                truncate(&a.text, 60),
                truncate(&b.text, 60)
            )
        })
        .collect();

    let line_numbers = pairs
        .iter()
        .flat_map(|(a, b)| [a.line_number, b.line_number])
        .collect();

    Ok(vec![Violation::new(
        Severity::Critical,
        "CONTRADICTION",
        format!("{} potential contradictions found", pairs.len()),
        "These specification pairs may contradict each other:",
    )
    .with_evidence(evidence)
    .with_line_numbers(line_numbers)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::tests::{corpus_fixture, spec_item};

    #[test]
    fn test_negated_pair_with_shared_terms_is_flagged() {
        let specs = vec![
            spec_item("The API returns search results within 2 seconds response time", 3),
            spec_item("The API does not guarantee search results response time bounds", 8),
        ];
        let fixture = corpus_fixture(&[], &[], &specs);
        let violations = run(&fixture.corpus()).unwrap();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Critical);
        assert_eq!(violations[0].line_numbers, vec![3, 8]);
        assert!(violations[0].evidence[0].contains("Line 3 vs Line 8"));
    }

    #[test]
    fn test_both_negated_is_not_a_contradiction() {
        let specs = vec![
            spec_item("Sessions never expire without explicit logout action", 1),
            spec_item("Sessions never persist without explicit user consent action", 2),
        ];
        let fixture = corpus_fixture(&[], &[], &specs);
        assert!(run(&fixture.corpus()).unwrap().is_empty());
    }

    #[test]
    fn test_low_overlap_is_not_a_contradiction() {
        let specs = vec![
            spec_item("The cart shows a running total with tax", 1),
            spec_item("Search is not available offline today", 2),
        ];
        let fixture = corpus_fixture(&[], &[], &specs);
        assert!(run(&fixture.corpus()).unwrap().is_empty());
    }
}
