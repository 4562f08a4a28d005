use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// Derive a stable item identifier from normalized text.
///
/// The id is the given prefix plus the first 8 hex characters of the
/// SHA-256 digest of the text. Identical text anywhere in the corpus
/// collapses to the same id, which is what enables deduplication and
/// cross-document linking. Two semantically distinct statements with
/// literally identical text share an id; that is a known limitation.
pub fn stable_id(prefix: &str, text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("{}_{}", prefix, &hex::encode(digest)[..8])
}

/// Priority of a requirement, inferred from obligation language.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "NORMAL")]
    Normal,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "HIGH"),
            Priority::Normal => write!(f, "NORMAL"),
        }
    }
}

/// A statement of desired behavior extracted from a human-input or
/// reverse-engineered requirements document.
///
/// Immutable once extracted. `source_doc_refs` holds identifiers of the
/// original documents (transcripts, emails, design docs) named by inline
/// `[SRC:...]` / `[SOURCE:...]` / `[DOC:...]` markers on the same line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub text: String,
    /// Originating document label, e.g. `HUMAN_INPUT:notes.txt`.
    pub source: String,
    pub line_number: usize,
    pub priority: Priority,
    pub tags: BTreeSet<String>,
    pub source_doc_refs: Vec<String>,
}

/// A constraint extracted from the constitution document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principle {
    pub id: String,
    pub text: String,
    /// Nearest preceding all-caps section header, `GENERAL` if none.
    pub category: String,
    pub mandatory: bool,
    pub line_number: usize,
}

/// A statement extracted from the specification under verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecificationItem {
    pub id: String,
    pub text: String,
    pub line_number: usize,
    /// Requirement-id tokens referenced inline (e.g. `REQ_1a2b3c4d`).
    pub addresses_requirements: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}
