use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use specgate::commands::verify::{self, VerifyOptions};
use specgate::config::DEFAULT_API_TIMEOUT_SECS;

#[derive(Parser)]
#[command(name = "specgate")]
#[command(about = "Adversarial specification verification", long_about = None)]
#[command(version)]
struct Cli {
    /// Human input documents (one or more files)
    #[arg(short = 'i', long = "human-input", value_name = "FILE", num_args = 1.., required = true)]
    human_input: Vec<PathBuf>,

    /// Reverse-engineered requirements documents (one or more files)
    #[arg(short = 'r', long = "requirements", value_name = "FILE", num_args = 1.., required = true)]
    requirements: Vec<PathBuf>,

    /// Constitution of guiding principles
    #[arg(short = 'c', long, value_name = "FILE")]
    constitution: PathBuf,

    /// Specification document to verify
    #[arg(short = 's', long, value_name = "FILE")]
    specification: PathBuf,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Render violations as JSON for automated consumption
    #[arg(long)]
    json: bool,

    /// Fetch referenced source documents to enrich violations
    #[arg(long)]
    deep_analysis: bool,

    /// JSON file with source document API settings
    #[arg(long, value_name = "FILE")]
    api_config: Option<PathBuf>,

    /// Base URL of the source document API
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// API key for bearer authentication
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// API request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_API_TIMEOUT_SECS)]
    api_timeout: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = verify::execute(VerifyOptions {
        human_inputs: cli.human_input,
        requirements: cli.requirements,
        constitution: cli.constitution,
        specification: cli.specification,
        output: cli.output,
        json: cli.json,
        deep_analysis: cli.deep_analysis,
        api_config: cli.api_config,
        api_url: cli.api_url,
        api_key: cli.api_key,
        api_timeout: cli.api_timeout,
    })?;

    std::process::exit(code);
}
