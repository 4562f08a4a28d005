//! Structural extraction: ordered lines in, typed item collections out.

use anyhow::Result;
use regex::Regex;

use crate::models::{stable_id, Priority, Principle, Requirement, SpecificationItem};
use crate::parser::patterns::{
    first_capture, principle_rules, requirement_rules, requirement_token_regex, source_ref_regex,
    specification_rules, ExtractRule,
};
use crate::parser::tags::infer_tags;

/// Lines shorter than this after trimming carry no extractable statement.
const MIN_LINE_LEN: usize = 10;

/// Category applied to principles before the first section header.
const DEFAULT_CATEGORY: &str = "GENERAL";

fn contains_any(haystack_lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack_lower.contains(n))
}

/// Trim whitespace and trailing sentence punctuation from a captured span.
fn normalize_capture(captured: &str) -> String {
    captured.trim().trim_end_matches(['.', ';', ',']).to_string()
}

/// Extracts requirements, principles, and specification items from
/// document lines using ordered first-match-wins pattern rules.
pub struct Extractor {
    requirement: Vec<ExtractRule>,
    principle: Vec<ExtractRule>,
    specification: Vec<ExtractRule>,
    source_ref: Regex,
    requirement_token: Regex,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            requirement: requirement_rules()?,
            principle: principle_rules()?,
            specification: specification_rules()?,
            source_ref: source_ref_regex()?,
            requirement_token: requirement_token_regex()?,
        })
    }

    /// Extract requirement statements. `source` labels the originating
    /// document, e.g. `HUMAN_INPUT:notes.txt`.
    pub fn extract_requirements(&self, lines: &[String], source: &str) -> Vec<Requirement> {
        let mut requirements = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.chars().count() < MIN_LINE_LEN {
                continue;
            }

            let source_refs: Vec<String> = self
                .source_ref
                .captures_iter(trimmed)
                .map(|caps| caps[1].to_string())
                .collect();

            let Some(captured) = first_capture(&self.requirement, trimmed) else {
                continue;
            };

            let text = normalize_capture(captured);
            // Reference markers are recorded separately, never stored inline.
            let clean_text = self.source_ref.replace_all(&text, "").trim().to_string();

            let line_lower = line.to_lowercase();
            let priority = if contains_any(&line_lower, &["must", "shall", "critical"]) {
                Priority::High
            } else {
                Priority::Normal
            };

            requirements.push(Requirement {
                id: stable_id("REQ", &clean_text),
                text: clean_text,
                source: source.to_string(),
                line_number: idx + 1,
                priority,
                tags: infer_tags(trimmed),
                source_doc_refs: source_refs,
            });
        }

        requirements
    }

    /// Extract guiding principles from the constitution document.
    ///
    /// An all-uppercase line of at most five words opens a new section and
    /// becomes the category of every principle parsed until the next header.
    pub fn extract_principles(&self, lines: &[String]) -> Vec<Principle> {
        let mut principles = Vec::new();
        let mut current_category = DEFAULT_CATEGORY.to_string();

        for (idx, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if is_section_header(trimmed) {
                current_category = trimmed.to_string();
                continue;
            }

            let Some(captured) = first_capture(&self.principle, trimmed) else {
                continue;
            };

            let text = normalize_capture(captured);
            if text.chars().count() < MIN_LINE_LEN {
                continue;
            }

            let line_lower = trimmed.to_lowercase();
            let mandatory =
                contains_any(&line_lower, &["must", "shall", "required", "mandatory"]);

            principles.push(Principle {
                id: stable_id("PRIN", &text),
                text,
                category: current_category.clone(),
                mandatory,
                line_number: idx + 1,
            });
        }

        principles
    }

    /// Extract specification items from the document under verification.
    pub fn extract_specifications(&self, lines: &[String]) -> Vec<SpecificationItem> {
        let mut specs = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let trimmed = line.trim();
            if trimmed.chars().count() < MIN_LINE_LEN {
                continue;
            }

            let Some(captured) = first_capture(&self.specification, trimmed) else {
                continue;
            };

            let text = normalize_capture(captured);
            let addresses = self
                .requirement_token
                .find_iter(trimmed)
                .map(|m| m.as_str().to_string())
                .collect();

            specs.push(SpecificationItem {
                id: stable_id("SPEC", &text),
                text,
                line_number: idx + 1,
                addresses_requirements: addresses,
                tags: infer_tags(trimmed),
            });
        }

        specs
    }
}

/// An all-uppercase line of at most five words marks a constitution section.
fn is_section_header(line: &str) -> bool {
    let has_alpha = line.chars().any(char::is_alphabetic);
    let has_lower = line.chars().any(char::is_lowercase);
    has_alpha && !has_lower && line.split_whitespace().count() <= 5
}
