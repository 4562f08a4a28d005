use serde::{Deserialize, Serialize};

use crate::models::severity::Severity;
use crate::models::source_doc::SourceDocument;

/// A finding produced by exactly one verification check.
///
/// Findings are the tool's product, not its errors. A violation is never
/// mutated after its check appends it, except for the deep analyzer's
/// additive enrichment (`source_documents` and `deep_analysis`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub severity: Severity,
    pub category: String,
    pub title: String,
    pub description: String,
    /// Bounded list of illustrative strings.
    pub evidence: Vec<String>,
    pub line_numbers: Vec<usize>,
    /// Ids of the requirements underlying this finding; drives enrichment.
    pub related_requirements: Vec<String>,
    /// Populated only by the deep analyzer.
    pub source_documents: Vec<SourceDocument>,
    pub deep_analysis: Option<String>,
}

impl Violation {
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            title: title.into(),
            description: description.into(),
            evidence: Vec::new(),
            line_numbers: Vec::new(),
            related_requirements: Vec::new(),
            source_documents: Vec::new(),
            deep_analysis: None,
        }
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn with_line_numbers(mut self, line_numbers: Vec<usize>) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    pub fn with_related_requirements(mut self, ids: Vec<String>) -> Self {
        self.related_requirements = ids;
        self
    }
}
