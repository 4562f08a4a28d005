//! Requirement coverage check.
//!
//! A requirement with no keyword present anywhere in the specification is
//! uncovered; below half of its keywords present, partially covered. The
//! 0.5 boundary is exclusive on the partial side only: exactly half counts
//! as covered.

use anyhow::Result;

use crate::models::{Requirement, Severity, Violation};
use crate::utils::truncate;
use crate::verify::terms::{keywords, overlap_fraction};
use crate::verify::Corpus;

pub const PARTIAL_THRESHOLD: f64 = 0.5;

const MAX_EVIDENCE: usize = 5;

fn requirement_evidence(requirements: &[&Requirement]) -> Vec<String> {
    requirements
        .iter()
        .take(MAX_EVIDENCE)
        .map(|r| format!("{} [{}]: {}", r.id, r.source, truncate(&r.text, 100)))
        .collect()
}

pub fn run(corpus: &Corpus) -> Result<Vec<Violation>> {
    let spec_text = corpus.specification_text();

    let mut uncovered: Vec<&Requirement> = Vec::new();
    let mut partial: Vec<&Requirement> = Vec::new();

    for req in corpus.requirements {
        let Some(fraction) = overlap_fraction(&keywords(&req.text), &spec_text) else {
            continue;
        };
        if fraction == 0.0 {
            uncovered.push(req);
        } else if fraction < PARTIAL_THRESHOLD {
            partial.push(req);
        }
    }

    let mut violations = Vec::new();

    if !uncovered.is_empty() {
        violations.push(
            Violation::new(
                Severity::Critical,
                "COVERAGE",
                format!(
                    "{} requirements have NO coverage in specification",
                    uncovered.len()
                ),
                "The following requirements are completely missing from the specification:",
            )
            .with_evidence(requirement_evidence(&uncovered))
            .with_related_requirements(uncovered.iter().map(|r| r.id.clone()).collect()),
        );
    }

    if !partial.is_empty() {
        violations.push(
            Violation::new(
                Severity::High,
                "COVERAGE",
                format!("{} requirements have PARTIAL coverage", partial.len()),
                "These requirements are only partially addressed:",
            )
            .with_evidence(requirement_evidence(&partial))
            .with_related_requirements(partial.iter().map(|r| r.id.clone()).collect()),
        );
    }

    Ok(violations)
}
