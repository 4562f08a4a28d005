//! End-to-end verification pipeline: load, extract, check, enrich, report.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::DeepAnalyzer;
use crate::client::{DocumentCache, SourceDocumentClient};
use crate::config::ApiConfig;
use crate::models::{Requirement, Severity};
use crate::parser::{load_lines, Extractor};
use crate::report::{render_human, render_json, ReportContext};
use crate::verify::VerificationEngine;

pub struct VerifyOptions {
    pub human_inputs: Vec<PathBuf>,
    pub requirements: Vec<PathBuf>,
    pub constitution: PathBuf,
    pub specification: PathBuf,
    pub output: Option<PathBuf>,
    pub json: bool,
    pub deep_analysis: bool,
    pub api_config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub api_timeout: u64,
}

/// Run the full pipeline. Returns the process exit code: 0 when the gate
/// passes, 1 when any CRITICAL violation is present.
pub fn execute(opts: VerifyOptions) -> Result<i32> {
    check_inputs(&opts)?;
    let api_config = resolve_api_config(&opts)?;

    let extractor = Extractor::new()?;

    let mut requirements = load_requirement_batch(&extractor, &opts.human_inputs, "HUMAN_INPUT");
    requirements.extend(load_requirement_batch(
        &extractor,
        &opts.requirements,
        "REV_ENG",
    ));

    let constitution_lines = load_lines(&opts.constitution)?;
    let principles = extractor.extract_principles(&constitution_lines);

    let specification_lines = load_lines(&opts.specification)?;
    let specifications = extractor.extract_specifications(&specification_lines);

    println!(
        "Loaded: {} requirements, {} principles, {} specification items",
        requirements.len(),
        principles.len(),
        specifications.len()
    );
    let with_refs = requirements
        .iter()
        .filter(|r| !r.source_doc_refs.is_empty())
        .count();
    if with_refs > 0 {
        println!("Found {with_refs} requirements with source document references");
        if api_config.is_usable() {
            println!(
                "{} Deep analysis enabled - source documents will be fetched for violations",
                "✓".green()
            );
        }
    }

    println!("\n{}", "=".repeat(80));
    println!("{}", "RUNNING ADVERSARIAL VERIFICATION".bold());
    if api_config.is_usable() {
        println!("(with deep source document analysis)");
    }
    println!("{}", "=".repeat(80));

    let mut engine = VerificationEngine::new(requirements, principles, specifications);
    engine.run_checks()?;

    if api_config.is_usable() {
        let client = SourceDocumentClient::new(api_config.clone(), DocumentCache::new())?;
        let mut analyzer = DeepAnalyzer::new(client);
        engine.enrich_violations(&mut analyzer);
    }

    let report = if opts.json {
        render_json(engine.violations())?
    } else {
        let ctx = ReportContext {
            requirements: engine.requirements().len(),
            principles: engine.principles().len(),
            specifications: engine.specifications().len(),
            violations: engine.violations(),
            deep_analysis: api_config.is_usable(),
        };
        render_human(&ctx, opts.output.is_none())
    };

    match &opts.output {
        Some(path) => {
            fs::write(path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("\nReport written to: {}", path.display());
        }
        None => println!("{report}"),
    }

    let critical = engine.count_by_severity(Severity::Critical);
    Ok(if critical > 0 { 1 } else { 0 })
}

/// Every input file is mandatory; a missing or non-file path fails fast.
fn check_inputs(opts: &VerifyOptions) -> Result<()> {
    let all = opts
        .human_inputs
        .iter()
        .chain(&opts.requirements)
        .chain([&opts.constitution, &opts.specification]);

    for path in all {
        if !path.is_file() {
            bail!("File not found: {}", path.display());
        }
    }
    Ok(())
}

fn resolve_api_config(opts: &VerifyOptions) -> Result<ApiConfig> {
    let mut config = match &opts.api_config {
        Some(path) => ApiConfig::from_file(path)?,
        None => {
            let mut config = ApiConfig::default();
            if let Some(url) = &opts.api_url {
                config.base_url = url.clone();
            }
            if let Some(key) = &opts.api_key {
                config.api_key = key.clone();
            }
            config.timeout = opts.api_timeout;
            config
        }
    };

    if opts.deep_analysis && config.base_url.is_empty() {
        eprintln!(
            "{} deep analysis requested but no API URL provided; running without it",
            "warning:".yellow().bold()
        );
    }
    config.enabled = opts.deep_analysis && !config.base_url.is_empty();

    Ok(config)
}

/// Extract requirements from a batch of documents. A file that exists but
/// cannot be read is reported and skipped; the batch continues.
fn load_requirement_batch(
    extractor: &Extractor,
    paths: &[PathBuf],
    label_prefix: &str,
) -> Vec<Requirement> {
    let mut requirements = Vec::new();
    for path in paths {
        match load_lines(path) {
            Ok(lines) => {
                let source = format!("{label_prefix}:{}", file_label(path));
                requirements.extend(extractor.extract_requirements(&lines, &source));
            }
            Err(err) => {
                eprintln!(
                    "{} skipping {}: {err:#}",
                    "warning:".yellow().bold(),
                    path.display()
                );
            }
        }
    }
    requirements
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
