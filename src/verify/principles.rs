//! Principle violation check.
//!
//! Prohibitions flag every specification item that mentions one of the
//! principle's key terms; obligations flag the principle itself when none
//! of its key terms appear anywhere in the specification corpus.

use anyhow::Result;
use std::collections::BTreeSet;

use crate::models::{Principle, Severity, SpecificationItem, Violation};
use crate::utils::truncate;
use crate::verify::terms::key_terms;
use crate::verify::Corpus;

const PROHIBITION_PHRASES: &[&str] = &["must not", "must never", "shall not", "cannot", "prohibited"];
const OBLIGATION_PHRASES: &[&str] = &["must", "shall", "required"];

/// A prohibited term also matches on its bare singular stem, so "logs" in a
/// principle catches "logged" in a specification item.
fn term_present(text_lower: &str, term: &str) -> bool {
    if text_lower.contains(term) {
        return true;
    }
    term.strip_suffix('s')
        .is_some_and(|stem| stem.len() >= 3 && text_lower.contains(stem))
}

const MAX_EVIDENCE: usize = 5;
const MAX_RELATED_REQUIREMENTS: usize = 3;

enum Finding<'a> {
    /// A specification item mentions a prohibited term.
    Prohibited {
        principle: &'a Principle,
        spec: &'a SpecificationItem,
    },
    /// An obligated principle is absent from the whole specification.
    Unaddressed { principle: &'a Principle },
}

pub fn run(corpus: &Corpus) -> Result<Vec<Violation>> {
    let spec_text = corpus.specification_text();
    let mut findings: Vec<Finding> = Vec::new();

    for principle in corpus.principles.iter().filter(|p| p.mandatory) {
        let principle_lower = principle.text.to_lowercase();

        if PROHIBITION_PHRASES.iter().any(|p| principle_lower.contains(p)) {
            let prohibited_terms = key_terms(&principle.text);
            for spec in corpus.specifications {
                let spec_lower = spec.text.to_lowercase();
                for term in &prohibited_terms {
                    if term_present(&spec_lower, term) {
                        findings.push(Finding::Prohibited { principle, spec });
                    }
                }
            }
        } else if OBLIGATION_PHRASES.iter().any(|p| principle_lower.contains(p)) {
            let required_terms = key_terms(&principle.text);
            let addressed = required_terms.iter().any(|t| spec_text.contains(t.as_str()));
            if !addressed {
                findings.push(Finding::Unaddressed { principle });
            }
        }
    }

    if findings.is_empty() {
        return Ok(Vec::new());
    }

    let evidence = findings
        .iter()
        .take(MAX_EVIDENCE)
        .map(|f| match f {
            Finding::Prohibited { principle, spec } => format!(
                "Principle '{}' violated by spec at line {}",
                truncate(&principle.text, 60),
                spec.line_number
            ),
            Finding::Unaddressed { principle } => format!(
                "Principle '{}' not addressed in specification",
                truncate(&principle.text, 60)
            ),
        })
        .collect();

    // Requirements sharing a tag with an offending item give the deep
    // analyzer somewhere to look for source material.
    let offending_tags: BTreeSet<&String> = findings
        .iter()
        .filter_map(|f| match f {
            Finding::Prohibited { spec, .. } => Some(spec.tags.iter()),
            Finding::Unaddressed { .. } => None,
        })
        .flatten()
        .collect();

    let related: Vec<String> = corpus
        .requirements
        .iter()
        .filter(|r| r.tags.iter().any(|t| offending_tags.contains(t)))
        .take(MAX_RELATED_REQUIREMENTS)
        .map(|r| r.id.clone())
        .collect();

    Ok(vec![Violation::new(
        Severity::Critical,
        "PRINCIPLE_VIOLATION",
        format!("{} principle violations detected", findings.len()),
        "Mandatory principles have been violated or ignored:",
    )
    .with_evidence(evidence)
    .with_related_requirements(related)])
}
