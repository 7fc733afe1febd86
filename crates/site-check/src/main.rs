//! Build validation binary
//!
//! Run from the site directory before deploying. Exit status is the
//! contract: 0 when every check passed, 1 when any failed, 2 when the
//! check could not run at all.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use site_check::{DirSource, OutputFormat, Reporter, RuleSet, ValidationReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "validate-build")]
#[command(
    version,
    about = "Check that the site's required files exist and contain their expected markers"
)]
struct Args {
    /// Directory holding the site files
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// TOML rule table to use instead of the built-in one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&args) {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ValidationReport> {
    let rules = match &args.config {
        Some(path) => RuleSet::from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => RuleSet::default(),
    };

    tracing::debug!(
        root = %args.root.display(),
        files = rules.required_files.len(),
        "Starting build validation"
    );

    let source = DirSource::new(&args.root);
    let report = Reporter::new(args.format)
        .run(&source, &rules)
        .context("Failed to write validation output")?;
    Ok(report)
}
