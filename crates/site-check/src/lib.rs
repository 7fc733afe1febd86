//! Pre-deployment check for the static counter site
//!
//! Confirms that every required file exists, contains each of its required
//! substrings, and is not empty. Problems are collected rather than raised:
//! a run always checks every file and every rule, then makes one pass/fail
//! decision.
//!
//! # Example
//!
//! ```
//! use site_check::{validate, MemorySource, RuleSet};
//!
//! let rules = RuleSet::builder()
//!     .file("index.html", &["<!DOCTYPE html>", "<title>"])
//!     .build();
//! let site = MemorySource::new().with_file("index.html", "<!DOCTYPE html><title>Hi</title>");
//!
//! let report = validate(&site, &rules);
//! assert!(report.all_valid);
//! // Under 50 bytes: reported, but not fatal
//! assert_eq!(report.warning_count(), 1);
//! ```
//!
//! The `validate-build` binary runs the built-in [`RuleSet`] against the
//! working directory and exits 0 on success, 1 on failure.

pub mod error;
pub mod report;
pub mod reporter;
pub mod rules;
pub mod source;
pub mod validator;

// Re-export main types for convenience
pub use error::SiteCheckError;
pub use report::{FileReport, Issue, Severity, ValidationReport};
pub use reporter::{OutputFormat, Reporter};
pub use rules::{RuleSet, SizeThresholds};
pub use source::{DirSource, FileSource, MemorySource};
pub use validator::{validate, validate_with, ValidationObserver};
