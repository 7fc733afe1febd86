//! Validation output
//!
//! - **Console**: progress lines as each check runs, then a pass/fail banner
//! - **JSON**: the whole [`ValidationReport`] for pipeline tooling

mod console;
mod json;

use std::io::{self, Write};

use crate::error::SiteCheckError;
use crate::report::ValidationReport;
use crate::rules::RuleSet;
use crate::source::FileSource;
use crate::validator::{validate, validate_with};

pub use console::{ConsoleObserver, ConsoleReporter};
pub use json::JsonReporter;

/// Output format for validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable progress and banner
    #[default]
    Console,
    /// Compact JSON report
    Json,
    /// Pretty-printed JSON report
    JsonPretty,
}

/// Runs a check and writes its output in one format
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Validate `source` and write the output to stdout
    pub fn run<S: FileSource + ?Sized>(
        &self,
        source: &S,
        rules: &RuleSet,
    ) -> Result<ValidationReport, SiteCheckError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let report = self.run_to(source, rules, &mut out)?;
        ignore_broken_pipe(out.flush())?;
        Ok(report)
    }

    /// Validate `source` and write the output to `out`
    pub fn run_to<S, W>(
        &self,
        source: &S,
        rules: &RuleSet,
        out: &mut W,
    ) -> Result<ValidationReport, SiteCheckError>
    where
        S: FileSource + ?Sized,
        W: Write,
    {
        match self.format {
            OutputFormat::Console => {
                let mut observer = ConsoleObserver::new(&mut *out);
                let report = validate_with(source, rules, &mut observer);
                observer.finish()?;
                Ok(report)
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let report = validate(source, rules);
                let text = JsonReporter::format(&report, self.format == OutputFormat::JsonPretty)?;
                ignore_broken_pipe(writeln!(out, "{}", text))?;
                Ok(report)
            }
        }
    }
}

/// A reader that went away early does not change the verdict
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}
