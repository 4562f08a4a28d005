//! Fixed tag taxonomy applied to extracted items.

use std::collections::BTreeSet;

/// Keyword groups keyed by tag name. A tag applies when any of its keywords
/// occurs in the text (case-insensitive substring match).
pub const TAG_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "security",
        &["security", "authentication", "authorization", "encrypt", "secure"],
    ),
    (
        "performance",
        &["performance", "speed", "latency", "throughput", "optimize"],
    ),
    ("ui", &["ui", "user interface", "display", "screen", "view"]),
    ("api", &["api", "endpoint", "rest", "service"]),
    ("database", &["database", "data", "storage", "persist", "store"]),
    ("validation", &["validate", "validation", "verify", "check"]),
    ("error_handling", &["error", "exception", "failure", "handle"]),
    ("logging", &["log", "logging", "audit", "track"]),
];

/// Union of all tag groups whose keywords appear in the text.
pub fn infer_tags(text: &str) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    TAG_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text_lower.contains(k)))
        .map(|(tag, _)| (*tag).to_string())
        .collect()
}
