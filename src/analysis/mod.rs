//! Deep analysis: mine original source documents for evidence around a
//! violation's key terms.
//!
//! Enrichment is advisory. Every failure path still produces a summary, so
//! "no corroborating material found" is itself informative report output.

use crate::client::SourceDocumentClient;
use crate::models::{Requirement, SourceDocument, Violation};
use crate::verify::terms::key_terms;

/// At most this many key terms are searched per violation.
const MAX_KEY_TERMS: usize = 5;
/// At most this many term windows are quoted per document.
const MAX_QUOTES_PER_DOC: usize = 2;
/// Text window around a term's first occurrence.
const CONTEXT_BEFORE: usize = 50;
const CONTEXT_AFTER: usize = 100;

pub struct DeepAnalyzer {
    client: SourceDocumentClient,
}

impl DeepAnalyzer {
    pub fn new(client: SourceDocumentClient) -> Self {
        Self { client }
    }

    /// Fetch the source documents referenced by the candidate requirements
    /// and attach localized keyword-context evidence to the violation.
    pub fn enrich(&mut self, violation: &mut Violation, candidates: &[&Requirement]) {
        let refs = collect_refs(candidates);
        if refs.is_empty() {
            attach(violation, Vec::new(), "No source documents referenced for deeper analysis");
            return;
        }

        let docs = self.client.fetch_multiple(&refs);
        if docs.is_empty() {
            attach(
                violation,
                Vec::new(),
                "No corroborating source material could be retrieved",
            );
            return;
        }

        let combined = candidates
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let terms: Vec<String> = key_terms(&combined).into_iter().take(MAX_KEY_TERMS).collect();

        let summary = summarize(&docs, &terms);
        attach(violation, docs, &summary);
    }
}

/// Union of source references across candidates, first-seen order, deduped.
fn collect_refs(candidates: &[&Requirement]) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for req in candidates {
        for doc_ref in &req.source_doc_refs {
            if !refs.contains(doc_ref) {
                refs.push(doc_ref.clone());
            }
        }
    }
    refs
}

fn attach(violation: &mut Violation, docs: Vec<SourceDocument>, summary: &str) {
    violation.source_documents.extend(docs);
    match &mut violation.deep_analysis {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(summary);
        }
        None => violation.deep_analysis = Some(summary.to_string()),
    }
}

fn summarize(docs: &[SourceDocument], terms: &[String]) -> String {
    let mut lines = vec![format!("Analyzed {} source document(s):", docs.len())];

    for doc in docs {
        let Some(content) = doc.content.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        let content_lower = content.to_lowercase();

        let mut quotes = Vec::new();
        for term in terms {
            if quotes.len() == MAX_QUOTES_PER_DOC {
                break;
            }
            if let Some(idx) = content_lower.find(term.as_str()) {
                let window = excerpt(content, &content_lower, idx);
                quotes.push(format!("'{term}': ...{window}..."));
            }
        }

        if quotes.is_empty() {
            lines.push(format!("  In {}: no direct mentions found", doc.title));
        } else {
            lines.push(format!("  In {} ({}):", doc.title, doc.doc_type));
            lines.extend(quotes.iter().map(|q| format!("    - {q}")));
        }
    }

    lines.join("\n")
}

/// A bounded window around a term occurrence, flattened to one line.
///
/// `idx` is a byte offset into the lowercased text; it only lines up with
/// the original when lowercasing preserved byte lengths, so fall back to
/// quoting the lowercased text otherwise.
fn excerpt(content: &str, content_lower: &str, idx: usize) -> String {
    let text = if content.len() == content_lower.len() {
        content
    } else {
        content_lower
    };
    let start = floor_char_boundary(text, idx.saturating_sub(CONTEXT_BEFORE));
    let end = ceil_char_boundary(text, (idx + CONTEXT_AFTER).min(text.len()));
    text[start..end].replace(['\n', '\r'], " ")
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
