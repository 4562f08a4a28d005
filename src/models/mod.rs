pub mod item;
pub mod severity;
pub mod source_doc;
pub mod violation;

pub use item::{stable_id, Priority, Principle, Requirement, SpecificationItem};
pub use severity::Severity;
pub use source_doc::{SourceDocument, SourceDocumentPayload};
pub use violation::Violation;
