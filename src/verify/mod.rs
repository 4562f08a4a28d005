//! Verification engine: an ordered, independent battery of checks over the
//! loaded item collections.
//!
//! Checks are side-effect-free functions from a corpus view to zero or more
//! violations; the engine owns the collections and the append-only
//! violation accumulator. Check order is fixed so identical inputs always
//! produce an identically ordered violation list.

pub mod ambiguity;
pub mod completeness;
pub mod consistency;
pub mod contradiction;
pub mod coverage;
pub mod principles;
pub mod scope;
pub mod terms;
pub mod testability;
pub mod vagueness;

use anyhow::Result;
use colored::Colorize;

use crate::analysis::DeepAnalyzer;
use crate::models::{Principle, Requirement, Severity, SpecificationItem, Violation};

/// Read-only view of the loaded item collections handed to each check.
pub struct Corpus<'a> {
    pub requirements: &'a [Requirement],
    pub principles: &'a [Principle],
    pub specifications: &'a [SpecificationItem],
}

impl Corpus<'_> {
    /// All specification item text, lowercased and space-joined.
    pub fn specification_text(&self) -> String {
        join_lowercase(self.specifications.iter().map(|s| s.text.as_str()))
    }

    /// All requirement text, lowercased and space-joined.
    pub fn requirement_text(&self) -> String {
        join_lowercase(self.requirements.iter().map(|r| r.text.as_str()))
    }
}

fn join_lowercase<'a>(texts: impl Iterator<Item = &'a str>) -> String {
    texts
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One entry in the check battery.
pub struct CheckDef {
    pub name: &'static str,
    pub run: fn(&Corpus) -> Result<Vec<Violation>>,
}

/// The fixed check order. Appending here is the only way to add a check.
pub const CHECK_BATTERY: &[CheckDef] = &[
    CheckDef {
        name: "Requirement Coverage Analysis",
        run: coverage::run,
    },
    CheckDef {
        name: "Orphaned Specifications (Scope Creep)",
        run: scope::run,
    },
    CheckDef {
        name: "Principle Violations",
        run: principles::run,
    },
    CheckDef {
        name: "Ambiguity Detection",
        run: ambiguity::run,
    },
    CheckDef {
        name: "Contradiction Detection",
        run: contradiction::run,
    },
    CheckDef {
        name: "Completeness Analysis",
        run: completeness::run,
    },
    CheckDef {
        name: "Vagueness Detection",
        run: vagueness::run,
    },
    CheckDef {
        name: "Testability Analysis",
        run: testability::run,
    },
    CheckDef {
        name: "Consistency Analysis",
        run: consistency::run,
    },
];

/// Owns the item collections and the violation accumulator.
pub struct VerificationEngine {
    requirements: Vec<Requirement>,
    principles: Vec<Principle>,
    specifications: Vec<SpecificationItem>,
    violations: Vec<Violation>,
}

impl VerificationEngine {
    pub fn new(
        requirements: Vec<Requirement>,
        principles: Vec<Principle>,
        specifications: Vec<SpecificationItem>,
    ) -> Self {
        Self {
            requirements,
            principles,
            specifications,
            violations: Vec::new(),
        }
    }

    /// Run the battery in order, appending findings to the accumulator.
    pub fn run_checks(&mut self) -> Result<()> {
        for check in CHECK_BATTERY {
            println!("{} {}...", "[CHECK]".bold(), check.name);
            let found = {
                let corpus = Corpus {
                    requirements: &self.requirements,
                    principles: &self.principles,
                    specifications: &self.specifications,
                };
                (check.run)(&corpus)?
            };
            println!("  {} {} violation(s)", "✓".green(), found.len());
            self.violations.extend(found);
        }
        Ok(())
    }

    /// Enrich violations whose related requirements carry source references.
    /// Only called when retrieval is enabled.
    pub fn enrich_violations(&mut self, analyzer: &mut DeepAnalyzer) {
        let requirements = &self.requirements;
        for violation in &mut self.violations {
            let candidates: Vec<&Requirement> = requirements
                .iter()
                .filter(|r| violation.related_requirements.contains(&r.id))
                .filter(|r| !r.source_doc_refs.is_empty())
                .collect();
            if candidates.is_empty() {
                continue;
            }
            analyzer.enrich(violation, &candidates);
        }
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn principles(&self) -> &[Principle] {
        &self.principles
    }

    pub fn specifications(&self) -> &[SpecificationItem] {
        &self.specifications
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }
}
