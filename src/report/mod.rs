//! Report generation: severity-sorted rendering of the violation set plus
//! the final verdict, in human-readable or machine-readable form.

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::models::{Severity, Violation};

/// More HIGH findings than this fail the gate outright.
pub const HIGH_CONDITIONAL_FAIL_THRESHOLD: usize = 5;

const MAX_EVIDENCE_SHOWN: usize = 3;
const MAX_LINES_SHOWN: usize = 5;
const MAX_DOCS_SHOWN: usize = 3;
const MAX_ANALYSIS_LINES_SHOWN: usize = 5;

/// The single pass/fail classification derived from the severity histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Failed,
    ConditionalFail,
    PassWithConcerns,
    Passed,
}

impl Verdict {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let critical = count(violations, Severity::Critical);
        let high = count(violations, Severity::High);

        if critical > 0 {
            Verdict::Failed
        } else if high > HIGH_CONDITIONAL_FAIL_THRESHOLD {
            Verdict::ConditionalFail
        } else if high > 0 {
            Verdict::PassWithConcerns
        } else {
            Verdict::Passed
        }
    }

    fn line(&self, violations: &[Violation]) -> String {
        let critical = count(violations, Severity::Critical);
        let high = count(violations, Severity::High);
        match self {
            Verdict::Failed => format!("FAILED - {critical} CRITICAL issues must be resolved"),
            Verdict::ConditionalFail => {
                format!("CONDITIONAL FAIL - {high} HIGH severity issues need attention")
            }
            Verdict::PassWithConcerns => {
                format!("PASS WITH CONCERNS - {high} HIGH severity issues present")
            }
            Verdict::Passed => "PASSED - Minor issues only".to_string(),
        }
    }
}

fn count(violations: &[Violation], severity: Severity) -> usize {
    violations.iter().filter(|v| v.severity == severity).count()
}

/// Stable severity sort: CRITICAL first, insertion order within a severity.
fn sorted(violations: &[Violation]) -> Vec<&Violation> {
    let mut refs: Vec<&Violation> = violations.iter().collect();
    refs.sort_by_key(|v| v.severity);
    refs
}

/// Everything the human-readable report needs beyond the violations.
pub struct ReportContext<'a> {
    pub requirements: usize,
    pub principles: usize,
    pub specifications: usize,
    pub violations: &'a [Violation],
    pub deep_analysis: bool,
}

pub fn render_human(ctx: &ReportContext, use_color: bool) -> String {
    let bold = |s: &str| {
        if use_color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    };
    let rule = "=".repeat(80);
    let mut out: Vec<String> = Vec::new();

    out.push(rule.clone());
    out.push(bold("ADVERSARIAL SPECIFICATION VERIFICATION REPORT"));
    if ctx.deep_analysis {
        out.push("(with source document analysis)".to_string());
    }
    out.push(rule.clone());
    out.push(format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")));

    out.push(String::new());
    out.push(bold("SUMMARY"));
    out.push(format!("  Requirements analyzed:  {}", ctx.requirements));
    out.push(format!("  Principles checked:     {}", ctx.principles));
    out.push(format!("  Specification items:    {}", ctx.specifications));
    out.push(format!("  Violations found:       {}", ctx.violations.len()));
    let docs_analyzed: usize = ctx
        .violations
        .iter()
        .map(|v| v.source_documents.len())
        .sum();
    if docs_analyzed > 0 {
        out.push(format!("  Source documents:       {docs_analyzed}"));
    }

    out.push(String::new());
    out.push(bold("VIOLATIONS BY SEVERITY"));
    for severity in Severity::ALL {
        let n = count(ctx.violations, severity);
        if n > 0 {
            out.push(format!("  {}: {}", severity_label(severity, use_color), n));
        }
    }

    out.push(String::new());
    out.push(bold("DETAILED VIOLATIONS"));
    for violation in sorted(ctx.violations) {
        render_violation(&mut out, violation, use_color);
    }

    out.push(String::new());
    out.push(rule.clone());
    out.push(bold("VERDICT"));
    out.push(rule.clone());
    let verdict = Verdict::from_violations(ctx.violations);
    let line = verdict.line(ctx.violations);
    out.push(if use_color {
        match verdict {
            Verdict::Failed => line.red().bold().to_string(),
            Verdict::ConditionalFail | Verdict::PassWithConcerns => {
                line.yellow().bold().to_string()
            }
            Verdict::Passed => line.green().bold().to_string(),
        }
    } else {
        line
    });
    out.push(rule);

    out.join("\n")
}

fn severity_label(severity: Severity, use_color: bool) -> String {
    let label = severity.to_string();
    if !use_color {
        return label;
    }
    match severity {
        Severity::Critical | Severity::High => label.red().to_string(),
        Severity::Medium => label.yellow().to_string(),
        Severity::Low => label.normal().to_string(),
        Severity::Info => label.blue().to_string(),
    }
}

fn render_violation(out: &mut Vec<String>, violation: &Violation, use_color: bool) {
    out.push(String::new());
    out.push(format!(
        "[{}] {}: {}",
        severity_label(violation.severity, use_color),
        violation.category,
        violation.title
    ));
    out.push(format!("  {}", violation.description));

    if !violation.evidence.is_empty() {
        out.push("  Evidence:".to_string());
        for evidence in violation.evidence.iter().take(MAX_EVIDENCE_SHOWN) {
            out.push(format!("    - {evidence}"));
        }
    }

    if !violation.line_numbers.is_empty() {
        let mut lines = violation.line_numbers.clone();
        lines.sort_unstable();
        let shown: Vec<String> = lines
            .iter()
            .take(MAX_LINES_SHOWN)
            .map(|n| n.to_string())
            .collect();
        out.push(format!("  Lines: {}", shown.join(", ")));
    }

    if !violation.source_documents.is_empty() {
        out.push(format!(
            "  Source documents analyzed: {}",
            violation.source_documents.len()
        ));
        for doc in violation.source_documents.iter().take(MAX_DOCS_SHOWN) {
            out.push(format!("    - {}: {}", doc.doc_type, doc.title));
        }
    }

    if let Some(analysis) = &violation.deep_analysis {
        out.push("  Deep analysis:".to_string());
        for line in analysis
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(MAX_ANALYSIS_LINES_SHOWN)
        {
            out.push(format!("    {line}"));
        }
    }
}

#[derive(Serialize)]
struct SourceDocumentRecord<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    doc_type: &'a str,
    title: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct ViolationRecord<'a> {
    severity: Severity,
    category: &'a str,
    title: &'a str,
    description: &'a str,
    evidence: &'a [String],
    line_numbers: &'a [usize],
    related_requirements: &'a [String],
    source_documents: Vec<SourceDocumentRecord<'a>>,
    deep_analysis: Option<&'a str>,
}

/// Structured rendering of the identical, identically ordered violation set.
pub fn render_json(violations: &[Violation]) -> Result<String> {
    let records: Vec<ViolationRecord> = sorted(violations)
        .into_iter()
        .map(|v| ViolationRecord {
            severity: v.severity,
            category: &v.category,
            title: &v.title,
            description: &v.description,
            evidence: &v.evidence,
            line_numbers: &v.line_numbers,
            related_requirements: &v.related_requirements,
            source_documents: v
                .source_documents
                .iter()
                .map(|d| SourceDocumentRecord {
                    id: &d.doc_id,
                    doc_type: &d.doc_type,
                    title: &d.title,
                    url: &d.url,
                })
                .collect(),
            deep_analysis: v.deep_analysis.as_deref(),
        })
        .collect();

    serde_json::to_string_pretty(&records).context("Failed to serialize violation report")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(severity: Severity, category: &str) -> Violation {
        Violation::new(severity, category, format!("{category} title"), "desc")
    }

    #[test]
    fn test_verdict_critical_fails() {
        let violations = vec![violation(Severity::Critical, "COVERAGE")];
        assert_eq!(Verdict::from_violations(&violations), Verdict::Failed);
    }

    #[test]
    fn test_verdict_many_high_is_conditional_fail() {
        let violations: Vec<Violation> = (0..6)
            .map(|_| violation(Severity::High, "COVERAGE"))
            .collect();
        assert_eq!(
            Verdict::from_violations(&violations),
            Verdict::ConditionalFail
        );
    }

    #[test]
    fn test_verdict_few_high_passes_with_concerns() {
        let violations = vec![violation(Severity::High, "SCOPE_CREEP")];
        assert_eq!(
            Verdict::from_violations(&violations),
            Verdict::PassWithConcerns
        );
    }

    #[test]
    fn test_verdict_clean_run_passes() {
        assert_eq!(Verdict::from_violations(&[]), Verdict::Passed);
        let violations = vec![violation(Severity::Low, "CONSISTENCY")];
        assert_eq!(Verdict::from_violations(&violations), Verdict::Passed);
    }

    #[test]
    fn test_human_report_sorts_critical_first() {
        let violations = vec![
            violation(Severity::Low, "CONSISTENCY"),
            violation(Severity::Critical, "CONTRADICTION"),
        ];
        let ctx = ReportContext {
            requirements: 2,
            principles: 1,
            specifications: 3,
            violations: &violations,
            deep_analysis: false,
        };
        let report = render_human(&ctx, false);

        let critical_pos = report.find("CONTRADICTION title").unwrap();
        let low_pos = report.find("CONSISTENCY title").unwrap();
        assert!(critical_pos < low_pos);
        assert!(report.contains("FAILED - 1 CRITICAL issues must be resolved"));
    }

    #[test]
    fn test_human_report_without_color_has_no_escapes() {
        let violations = vec![violation(Severity::Critical, "COVERAGE")];
        let ctx = ReportContext {
            requirements: 1,
            principles: 0,
            specifications: 1,
            violations: &violations,
            deep_analysis: false,
        };
        let report = render_human(&ctx, false);
        assert!(!report.contains('\u{1b}'));
    }

    #[test]
    fn test_human_report_bounds_evidence() {
        let mut v = violation(Severity::Medium, "AMBIGUITY");
        v.evidence = (0..10).map(|i| format!("evidence {i}")).collect();
        let violations = vec![v];
        let ctx = ReportContext {
            requirements: 0,
            principles: 0,
            specifications: 0,
            violations: &violations,
            deep_analysis: false,
        };
        let report = render_human(&ctx, false);
        assert!(report.contains("evidence 2"));
        assert!(!report.contains("evidence 3"));
    }

    #[test]
    fn test_json_report_shape_and_order() {
        let violations = vec![
            violation(Severity::Medium, "VAGUENESS"),
            violation(Severity::Critical, "COVERAGE"),
        ];
        let json = render_json(&violations).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["severity"], "CRITICAL");
        assert_eq!(records[1]["severity"], "MEDIUM");
        assert!(records[0]["deep_analysis"].is_null());
        assert!(records[0]["source_documents"].as_array().unwrap().is_empty());
    }
}
