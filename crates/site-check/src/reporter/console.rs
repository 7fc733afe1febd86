//! Console output for the build check
//!
//! Lines are written as each check completes so a failing run shows exactly
//! how far the scan got.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::report::{Issue, ValidationReport};
use crate::validator::ValidationObserver;

const RULE_WIDTH: usize = 50;

/// Streams progress lines to a writer
///
/// Observer callbacks cannot fail, so the first write error is held and
/// returned by [`ConsoleObserver::finish`]; later output is dropped. A closed
/// pipe (`validate-build | head`) just stops the output and is not an error.
pub struct ConsoleObserver<W: Write> {
    out: W,
    error: Option<io::Error>,
    closed: bool,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            error: None,
            closed: false,
        }
    }

    /// Return the writer, or the first error hit while writing
    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn line(&mut self, text: &str) {
        if self.closed || self.error.is_some() {
            return;
        }
        match writeln!(self.out, "{}", text) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => self.closed = true,
            Err(e) => self.error = Some(e),
        }
    }
}

impl<W: Write> ValidationObserver for ConsoleObserver<W> {
    fn on_start(&mut self) {
        self.line("🔍 Starting build validation...\n");
    }

    fn on_file_found(&mut self, file: &str, _size_bytes: u64) {
        self.line(&format!("✅ Found: {}", file));
    }

    fn on_rule_met(&mut self, _file: &str, rule: &str) {
        self.line(&format!("   ✓ Contains: {}", rule));
    }

    fn on_issue(&mut self, issue: &Issue) {
        self.line(&ConsoleReporter::issue_line(issue));
    }

    fn on_finish(&mut self, report: &ValidationReport) {
        self.line(&ConsoleReporter::summary(report));
    }
}

/// Line formatting for console output
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn issue_line(issue: &Issue) -> String {
        let marker = if issue.is_fatal() { "❌" } else { "⚠️ " };
        format!("{} {}", marker, issue.message())
    }

    /// Separator rule followed by the pass/fail banner
    pub fn summary(report: &ValidationReport) -> String {
        let mut output = String::new();
        let _ = writeln!(output);
        let _ = writeln!(output, "{}", "=".repeat(RULE_WIDTH));
        if report.all_valid {
            let _ = write!(
                output,
                "🎉 Build validation passed! All files are ready for deployment."
            );
        } else {
            let _ = write!(
                output,
                "💥 Build validation failed! Please fix the issues above."
            );
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use crate::source::MemorySource;
    use crate::validator::validate_with;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_streamed_lines() {
        let rules = RuleSet::builder()
            .file("index.html", &["<title>", "<nav>"])
            .file("styles.css", &["body {"])
            .build();
        let site = MemorySource::new().with_file("index.html", "<title>x</title>");
        let mut observer = ConsoleObserver::new(Vec::new());

        let report = validate_with(&site, &rules, &mut observer);
        let text = String::from_utf8(observer.finish().unwrap()).unwrap();

        let expected = [
            "🔍 Starting build validation...",
            "",
            "✅ Found: index.html",
            "   ✓ Contains: <title>",
            "❌ index.html: Missing required content \"<nav>\"",
            "❌ Missing required file: styles.css",
            "⚠️  index.html seems very small (16 bytes)",
            "",
            "==================================================",
            "💥 Build validation failed! Please fix the issues above.",
        ]
        .join("\n")
            + "\n";
        assert_eq!(text, expected);
        assert!(!report.all_valid);
    }

    #[test]
    fn test_summary_banner() {
        let passed = ValidationReport {
            all_valid: true,
            ..Default::default()
        };
        assert!(ConsoleReporter::summary(&passed).ends_with("ready for deployment."));

        let failed = ValidationReport::default();
        assert!(ConsoleReporter::summary(&failed).contains("Build validation failed!"));
    }

    struct FailingWriter {
        kind: io::ErrorKind,
        attempts: usize,
    }

    impl FailingWriter {
        fn new(kind: io::ErrorKind) -> Self {
            Self { kind, attempts: 0 }
        }
    }

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(self.kind, "write failed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_is_held_until_finish() {
        let mut observer = ConsoleObserver::new(FailingWriter::new(io::ErrorKind::Other));
        observer.on_start();
        observer.on_file_found("a", 1);
        let err = observer.finish().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_broken_pipe_stops_output_without_error() {
        let mut observer = ConsoleObserver::new(FailingWriter::new(io::ErrorKind::BrokenPipe));
        observer.on_start();
        observer.on_file_found("a", 1);
        observer.on_rule_met("a", "x");

        let writer = observer.finish().unwrap();
        assert_eq!(writer.attempts, 1);
    }
}
