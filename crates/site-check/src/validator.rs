//! The build check itself
//!
//! Files are checked one at a time in the order the [`RuleSet`] lists them.
//! A missing or unreadable file skips its own content rules but never stops
//! the scan; every rule of every readable file is evaluated. Sizes are
//! checked in a second pass over the files that exist. Nothing is thrown:
//! all findings land in the [`ValidationReport`] and are streamed to a
//! [`ValidationObserver`] as they are discovered.

use tracing::{debug, info};

use crate::report::{FileReport, Issue, ValidationReport};
use crate::rules::RuleSet;
use crate::source::FileSource;

/// Receives progress while a check runs. All methods default to no-ops.
pub trait ValidationObserver {
    fn on_start(&mut self) {}

    fn on_file_found(&mut self, _file: &str, _size_bytes: u64) {}

    fn on_rule_met(&mut self, _file: &str, _rule: &str) {}

    fn on_issue(&mut self, _issue: &Issue) {}

    fn on_finish(&mut self, _report: &ValidationReport) {}
}

impl ValidationObserver for () {}

/// Check `source` against `rules` without progress output
pub fn validate<S: FileSource + ?Sized>(source: &S, rules: &RuleSet) -> ValidationReport {
    validate_with(source, rules, &mut ())
}

/// Check `source` against `rules`, reporting progress to `observer`
pub fn validate_with<S, O>(source: &S, rules: &RuleSet, observer: &mut O) -> ValidationReport
where
    S: FileSource + ?Sized,
    O: ValidationObserver + ?Sized,
{
    let mut run = Run {
        issues: Vec::new(),
        observer,
    };
    run.observer.on_start();

    let mut files = Vec::with_capacity(rules.required_files.len());
    for name in &rules.required_files {
        files.push(run.check_contents(source, name, rules.rules_for(name)));
    }

    for file in files.iter_mut().filter(|f| f.exists) {
        run.check_size(file, rules.size.warn_below_bytes);
    }

    let all_valid = !run.issues.iter().any(Issue::is_fatal);
    let report = ValidationReport {
        files,
        issues: run.issues,
        all_valid,
    };

    info!(
        all_valid,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "Build validation finished"
    );
    run.observer.on_finish(&report);
    report
}

struct Run<'o, O: ?Sized> {
    issues: Vec<Issue>,
    observer: &'o mut O,
}

impl<O: ValidationObserver + ?Sized> Run<'_, O> {
    fn record(&mut self, issue: Issue) {
        debug!(file = issue.file(), issue = %issue.message(), "Check failed");
        self.observer.on_issue(&issue);
        self.issues.push(issue);
    }

    fn check_contents<S: FileSource + ?Sized>(
        &mut self,
        source: &S,
        name: &str,
        required: &[String],
    ) -> FileReport {
        let mut report = FileReport::new(name);

        let Some(size) = source.size(name) else {
            report.unchecked_rules = required.to_vec();
            self.record(Issue::MissingFile {
                file: name.to_string(),
            });
            return report;
        };

        report.exists = true;
        report.size_bytes = size;
        self.observer.on_file_found(name, size);

        let content = match source.read_to_string(name) {
            Ok(content) => content,
            Err(e) => {
                report.unchecked_rules = required.to_vec();
                self.record(Issue::UnreadableFile {
                    file: name.to_string(),
                    reason: e.to_string(),
                });
                return report;
            }
        };
        report.readable = true;

        for rule in required {
            if content.contains(rule.as_str()) {
                debug!(file = name, rule = %rule, "Rule met");
                self.observer.on_rule_met(name, rule);
                report.met_rules.push(rule.clone());
            } else {
                report.missing_rules.push(rule.clone());
                self.record(Issue::MissingContentRule {
                    file: name.to_string(),
                    rule: rule.clone(),
                });
            }
        }

        report
    }

    fn check_size(&mut self, report: &mut FileReport, warn_below: u64) {
        let size = report.size_bytes;
        if size == 0 {
            self.record(Issue::EmptyFile {
                file: report.file_name.clone(),
            });
        } else if size < warn_below {
            let issue = Issue::SmallFileWarning {
                file: report.file_name.clone(),
                size_bytes: size,
            };
            report.warnings.push(issue.message());
            self.record(issue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use pretty_assertions::assert_eq;

    const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Simple Web App</title>
    <link rel="stylesheet" href="styles.css">
</head>
<body>
    <button id="increment">Click me!</button>
    <span id="count">0</span>
    <script src="script.js"></script>
</body>
</html>
"#;

    const STYLES_CSS: &str = "body {\n    margin: 0;\n}\n\nbutton {\n    padding: 0.5rem 1rem;\n}\n";

    const SCRIPT_JS: &str = "document.getElementById('increment').addEventListener('click', onClick);\n";

    fn complete_site() -> MemorySource {
        MemorySource::new()
            .with_file("index.html", INDEX_HTML)
            .with_file("styles.css", STYLES_CSS)
            .with_file("script.js", SCRIPT_JS)
    }

    #[derive(Default)]
    struct Recording {
        events: Vec<String>,
    }

    impl ValidationObserver for Recording {
        fn on_start(&mut self) {
            self.events.push("start".to_string());
        }
        fn on_file_found(&mut self, file: &str, _size_bytes: u64) {
            self.events.push(format!("found {}", file));
        }
        fn on_rule_met(&mut self, file: &str, rule: &str) {
            self.events.push(format!("met {} {}", file, rule));
        }
        fn on_issue(&mut self, issue: &Issue) {
            self.events.push(format!("issue {}", issue.message()));
        }
        fn on_finish(&mut self, report: &ValidationReport) {
            self.events.push(format!("finish {}", report.all_valid));
        }
    }

    #[test]
    fn test_complete_site_passes_cleanly() {
        let report = validate(&complete_site(), &RuleSet::default());

        assert!(report.all_valid);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 0);
        assert!(report.files.iter().all(FileReport::is_valid));
        assert!(report.files.iter().all(|f| f.warnings.is_empty()));
        assert_eq!(report.file("index.html").unwrap().met_rules.len(), 4);
    }

    #[test]
    fn test_missing_file_leaves_rules_unchecked() {
        let mut site = complete_site();
        site.remove("styles.css");

        let report = validate(&site, &RuleSet::default());

        assert!(!report.all_valid);
        assert_eq!(report.exit_code(), 1);

        let styles = report.file("styles.css").unwrap();
        assert!(!styles.exists);
        assert!(styles.met_rules.is_empty());
        assert!(styles.missing_rules.is_empty());
        assert_eq!(styles.unchecked_rules, vec!["body {", "button {"]);

        assert_eq!(
            report.issues,
            vec![Issue::MissingFile {
                file: "styles.css".to_string()
            }]
        );
        // Scan continued past the missing file
        assert!(report.file("script.js").unwrap().is_valid());
    }

    #[test]
    fn test_single_missing_rule_is_reported_alone() {
        let site = complete_site().with_file(
            "script.js",
            "document.querySelector('#increment').addEventListener('click', onClick);\n",
        );

        let report = validate(&site, &RuleSet::default());

        assert!(!report.all_valid);
        let script = report.file("script.js").unwrap();
        assert_eq!(script.missing_rules, vec!["getElementById"]);
        assert_eq!(script.met_rules, vec!["addEventListener"]);
        assert_eq!(
            report.errors().cloned().collect::<Vec<_>>(),
            vec![Issue::MissingContentRule {
                file: "script.js".to_string(),
                rule: "getElementById".to_string(),
            }]
        );
    }

    #[test]
    fn test_every_missing_rule_is_reported() {
        let site = complete_site().with_file("index.html", "<html><body>nothing useful here at all</body></html>");

        let report = validate(&site, &RuleSet::default());

        let index = report.file("index.html").unwrap();
        assert_eq!(index.missing_rules.len(), 4);
        assert_eq!(report.error_count(), 4);
    }

    #[test]
    fn test_small_file_only_warns() {
        let rules = RuleSet::builder()
            .file("index.html", &["<!DOCTYPE html>", "<title>"])
            .file("script.js", &["a"])
            .build();
        let site = MemorySource::new()
            .with_file("index.html", INDEX_HTML)
            .with_file("script.js", "abcdefghij");

        let report = validate(&site, &rules);

        assert!(report.all_valid);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(
            report.issues,
            vec![Issue::SmallFileWarning {
                file: "script.js".to_string(),
                size_bytes: 10,
            }]
        );
        assert_eq!(
            report.file("script.js").unwrap().warnings,
            vec!["script.js seems very small (10 bytes)"]
        );
    }

    #[test]
    fn test_empty_file_fails() {
        let rules = RuleSet::builder().file("robots.txt", &[]).build();
        let site = MemorySource::new().with_file("robots.txt", "");

        let report = validate(&site, &rules);

        assert!(!report.all_valid);
        assert_eq!(
            report.issues,
            vec![Issue::EmptyFile {
                file: "robots.txt".to_string()
            }]
        );
        assert!(report.file("robots.txt").unwrap().warnings.is_empty());
    }

    #[test]
    fn test_empty_file_with_rules_reports_both() {
        let site = complete_site().with_file("styles.css", "");

        let report = validate(&site, &RuleSet::default());

        let kinds: Vec<_> = report.issues.iter().map(Issue::message).collect();
        assert_eq!(
            kinds,
            vec![
                "styles.css: Missing required content \"body {\"",
                "styles.css: Missing required content \"button {\"",
                "styles.css is empty",
            ]
        );
    }

    #[test]
    fn test_unreadable_file_fails_without_checking_rules() {
        let site = complete_site().with_unreadable("script.js", 120);

        let report = validate(&site, &RuleSet::default());

        assert!(!report.all_valid);
        let script = report.file("script.js").unwrap();
        assert!(script.exists);
        assert!(!script.readable);
        assert_eq!(script.unchecked_rules.len(), 2);
        assert!(matches!(
            report.issues.as_slice(),
            [Issue::UnreadableFile { file, .. }] if file == "script.js"
        ));
    }

    #[test]
    fn test_size_pass_runs_after_content_pass() {
        let rules = RuleSet::builder()
            .file("a.txt", &["zzz"])
            .file("b.txt", &[])
            .build();
        let site = MemorySource::new().with_file("a.txt", "tiny").with_file("b.txt", "");

        let report = validate(&site, &rules);

        let order: Vec<_> = report.issues.iter().map(Issue::message).collect();
        assert_eq!(
            order,
            vec![
                "a.txt: Missing required content \"zzz\"",
                "a.txt seems very small (4 bytes)",
                "b.txt is empty",
            ]
        );
    }

    #[test]
    fn test_observer_sees_events_in_discovery_order() {
        let rules = RuleSet::builder()
            .file("index.html", &["<title>", "<nav>"])
            .file("missing.css", &["body {"])
            .build();
        let site = MemorySource::new().with_file("index.html", INDEX_HTML);
        let mut recording = Recording::default();

        validate_with(&site, &rules, &mut recording);

        assert_eq!(
            recording.events,
            vec![
                "start",
                "found index.html",
                "met index.html <title>",
                "issue index.html: Missing required content \"<nav>\"",
                "issue Missing required file: missing.css",
                "finish false",
            ]
        );
    }

    #[test]
    fn test_rules_for_unlisted_file_are_ignored() {
        let mut rules = RuleSet::builder().file("index.html", &["<title>"]).build();
        rules
            .rules
            .insert("extra.js".to_string(), vec!["never".to_string()]);
        let site = MemorySource::new().with_file("index.html", INDEX_HTML);

        let report = validate(&site, &rules);
        assert!(report.all_valid);
        assert!(report.file("extra.js").is_none());
    }
}
