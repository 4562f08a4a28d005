//! Ordered textual extraction rules.
//!
//! Each rule is an independent matcher returning an optional captured span.
//! The rule lists are data, kept separate from the dispatch loop in
//! `extract.rs`, so new patterns are additive.

use anyhow::{Context, Result};
use regex::Regex;

/// A single extraction rule. The regex must contain exactly one capture
/// group holding the item text.
pub struct ExtractRule {
    regex: Regex,
}

impl ExtractRule {
    fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).with_context(|| format!("Invalid pattern: {pattern}"))?;
        Ok(Self { regex })
    }

    /// Return the captured text if the rule matches anywhere in the line.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Apply rules in order; the first matching rule wins.
pub fn first_capture<'a>(rules: &[ExtractRule], line: &'a str) -> Option<&'a str> {
    rules.iter().find_map(|rule| rule.capture(line))
}

/// Rules that recognize requirement statements.
pub fn requirement_rules() -> Result<Vec<ExtractRule>> {
    Ok(vec![
        ExtractRule::new(r"(?i)(?:REQ|REQUIREMENT|SHALL|MUST|SHOULD|NEEDS?)\s*[-:]?\s*(.+)")?,
        ExtractRule::new(r"(?i)(?:The system|The application|It)\s+(?:shall|must|should|needs? to)\s+(.+)")?,
        ExtractRule::new(r"(?i)^\s*[-*]\s+(.+(?:shall|must|should|required|necessary).+)")?,
        ExtractRule::new(r"^\s*\d+\.\s+(.+)")?,
    ])
}

/// Rules that recognize guiding principles in the constitution.
pub fn principle_rules() -> Result<Vec<ExtractRule>> {
    Ok(vec![
        ExtractRule::new(r"(?i)(?:PRINCIPLE|RULE|GUIDELINE|CONSTRAINT)\s*[-:]?\s*(.+)")?,
        ExtractRule::new(r"^\s*[-*]\s+(.+)")?,
        ExtractRule::new(r"^\s*\d+\.\s+(.+)")?,
    ])
}

/// Rules that recognize specification items.
pub fn specification_rules() -> Result<Vec<ExtractRule>> {
    Ok(vec![
        ExtractRule::new(r"(?i)(?:SPEC|SPECIFICATION)\s*[-:]?\s*(.+)")?,
        ExtractRule::new(r"^\s*[-*]\s+(.+)")?,
        ExtractRule::new(r"^\s*\d+\.\s+(.+)")?,
        ExtractRule::new(r"^#{1,6}\s+(.+)")?,
    ])
}

/// Matches inline source document references: `[SRC:id]`, `[SOURCE:id]`,
/// `[DOC:id]`.
pub fn source_ref_regex() -> Result<Regex> {
    Regex::new(r"(?i)\[(?:SRC|SOURCE|DOC):([^\]]+)\]").context("Invalid source reference pattern")
}

/// Matches inline requirement-id tokens like `REQ_1a2b3c4d` or `REQ-42`.
pub fn requirement_token_regex() -> Result<Regex> {
    Regex::new(r"(?i)REQ[_-]?\w+").context("Invalid requirement token pattern")
}
