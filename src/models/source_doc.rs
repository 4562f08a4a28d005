use serde::{Deserialize, Serialize};

/// An original source document fetched from the retrieval service.
///
/// Owned by the client's cache for the lifetime of the process; the corpus
/// is small enough that eviction is unnecessary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub doc_id: String,
    /// e.g. `transcript`, `email`, `design_doc`, `meeting_notes`.
    pub doc_type: String,
    pub url: String,
    pub title: String,
    pub date: Option<String>,
    pub participants: Vec<String>,
    pub content: Option<String>,
    pub fetched: bool,
}

/// Wire shape of the retrieval API's JSON payload.
#[derive(Debug, Deserialize)]
pub struct SourceDocumentPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl SourceDocumentPayload {
    /// Convert the wire payload into a cached document record.
    ///
    /// Missing fields degrade to placeholders rather than failing the fetch:
    /// the document is advisory enrichment material, not mandatory input.
    pub fn into_document(self, doc_id: &str, url: &str) -> SourceDocument {
        SourceDocument {
            doc_id: doc_id.to_string(),
            doc_type: self.doc_type.unwrap_or_else(|| "unknown".to_string()),
            url: url.to_string(),
            title: self.title.unwrap_or_else(|| format!("Document {doc_id}")),
            date: self.date,
            participants: self.participants,
            content: self.content,
            fetched: true,
        }
    }
}
