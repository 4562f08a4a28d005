//! Token and key-term extraction shared by the checks.
//!
//! Word tokens are runs of alphanumerics/underscores, lowercased. Coverage
//! keywords keep tokens longer than three characters; key terms additionally
//! drop stop words. Matching a keyword against a corpus is case-insensitive
//! substring containment, so "support" also matches "supports".

use std::collections::BTreeSet;

/// Tokens this short carry no signal for overlap scoring.
const MIN_KEYWORD_LEN: usize = 4;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do",
    "does", "did", "will", "would", "shall", "should", "must", "may", "can", "could", "not",
];

/// Split text into lowercase word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            current.extend(c.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Distinct tokens longer than three characters.
pub fn keywords(text: &str) -> BTreeSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_KEYWORD_LEN)
        .collect()
}

/// Keywords with stop words removed, in first-occurrence order.
pub fn key_terms(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_KEYWORD_LEN && !STOP_WORDS.contains(&t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Key terms as a set, for overlap computations.
pub fn key_term_set(text: &str) -> BTreeSet<String> {
    key_terms(text).into_iter().collect()
}

/// Fraction of `keywords` that occur (as substrings) in `corpus_lower`.
/// Returns `None` when there are no keywords to score.
pub fn overlap_fraction(keywords: &BTreeSet<String>, corpus_lower: &str) -> Option<f64> {
    if keywords.is_empty() {
        return None;
    }
    let matches = keywords
        .iter()
        .filter(|k| corpus_lower.contains(k.as_str()))
        .count();
    Some(matches as f64 / keywords.len() as f64)
}
