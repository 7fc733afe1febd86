//! Rule configuration for the build check
//!
//! A [`RuleSet`] lists the files a deployable site must contain, the literal
//! markers each file must include, and the size below which a file is
//! suspiciously small. [`RuleSet::default`] is the built-in table for the
//! counter site; other tables can be loaded from TOML:
//!
//! ```toml
//! required_files = ["index.html", "styles.css"]
//!
//! [rules]
//! "index.html" = ["<!DOCTYPE html>", "<title>"]
//! "styles.css" = ["body {"]
//!
//! [size]
//! warn_below_bytes = 50
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SiteCheckError;

/// Files below this size (but not empty) produce a warning
pub const DEFAULT_WARN_BELOW_BYTES: u64 = 50;

/// Required files and the substrings each must contain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Files checked, in this order
    pub required_files: Vec<String>,
    /// Required substrings per file, checked in order
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub size: SizeThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeThresholds {
    /// Non-empty files smaller than this are reported as warnings
    #[serde(default = "default_warn_below_bytes")]
    pub warn_below_bytes: u64,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            warn_below_bytes: DEFAULT_WARN_BELOW_BYTES,
        }
    }
}

fn default_warn_below_bytes() -> u64 {
    DEFAULT_WARN_BELOW_BYTES
}

impl Default for RuleSet {
    /// Markup, stylesheet and script of the counter site
    fn default() -> Self {
        Self::builder()
            .file(
                "index.html",
                &[
                    "<!DOCTYPE html>",
                    "<title>",
                    "<script src=\"script.js\">",
                    "<link rel=\"stylesheet\" href=\"styles.css\">",
                ],
            )
            .file("styles.css", &["body {", "button {"])
            .file("script.js", &["addEventListener", "getElementById"])
            .build()
    }
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Load a rule table from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed, or
    /// the table fails [`RuleSet::check`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SiteCheckError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SiteCheckError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Substrings required in `file`; empty when the file has no rules
    pub fn rules_for(&self, file: &str) -> &[String] {
        self.rules.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Reject tables that cannot be checked meaningfully
    pub fn check(&self) -> Result<(), SiteCheckError> {
        if self.required_files.is_empty() {
            return Err(SiteCheckError::InvalidConfig(
                "required_files is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for file in &self.required_files {
            if file.trim().is_empty() {
                return Err(SiteCheckError::InvalidConfig(
                    "required_files contains an empty name".to_string(),
                ));
            }
            if !seen.insert(file.as_str()) {
                return Err(SiteCheckError::InvalidConfig(format!(
                    "{} is listed twice in required_files",
                    file
                )));
            }
        }

        for (file, rules) in &self.rules {
            if !seen.contains(file.as_str()) {
                warn!(file = %file, "Rules given for a file that is not required; they will be ignored");
            }
            if rules.iter().any(String::is_empty) {
                return Err(SiteCheckError::InvalidConfig(format!(
                    "{} has an empty rule",
                    file
                )));
            }
        }

        Ok(())
    }
}

impl FromStr for RuleSet {
    type Err = SiteCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rules: RuleSet = toml::from_str(s)?;
        rules.check()?;
        Ok(rules)
    }
}

/// Builds a [`RuleSet`] file by file, preserving insertion order
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    required_files: Vec<String>,
    rules: BTreeMap<String, Vec<String>>,
    size: SizeThresholds,
}

impl RuleSetBuilder {
    /// Require `name` and every substring in `required`
    pub fn file(mut self, name: &str, required: &[&str]) -> Self {
        self.required_files.push(name.to_string());
        if !required.is_empty() {
            self.rules.insert(
                name.to_string(),
                required.iter().map(|r| r.to_string()).collect(),
            );
        }
        self
    }

    pub fn warn_below_bytes(mut self, bytes: u64) -> Self {
        self.size.warn_below_bytes = bytes;
        self
    }

    pub fn build(self) -> RuleSet {
        RuleSet {
            required_files: self.required_files,
            rules: self.rules,
            size: self.size,
        }
    }
}
