//! Results of one validation run

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Fails the build
    Error,
    /// Reported only
    Warning,
}

/// A problem found while checking a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    MissingFile { file: String },
    MissingContentRule { file: String, rule: String },
    EmptyFile { file: String },
    UnreadableFile { file: String, reason: String },
    SmallFileWarning { file: String, size_bytes: u64 },
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::SmallFileWarning { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn file(&self) -> &str {
        match self {
            Issue::MissingFile { file }
            | Issue::MissingContentRule { file, .. }
            | Issue::EmptyFile { file }
            | Issue::UnreadableFile { file, .. }
            | Issue::SmallFileWarning { file, .. } => file,
        }
    }

    /// One-line description, without the file-status marker
    pub fn message(&self) -> String {
        match self {
            Issue::MissingFile { file } => format!("Missing required file: {}", file),
            Issue::MissingContentRule { file, rule } => {
                format!("{}: Missing required content \"{}\"", file, rule)
            }
            Issue::EmptyFile { file } => format!("{} is empty", file),
            Issue::UnreadableFile { file, reason } => {
                format!("{}: Could not be read ({})", file, reason)
            }
            Issue::SmallFileWarning { file, size_bytes } => {
                format!("{} seems very small ({} bytes)", file, size_bytes)
            }
        }
    }
}

/// Outcome for a single required file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file_name: String,
    pub exists: bool,
    /// Whether the contents were read and checked
    pub readable: bool,
    /// Zero when the file does not exist
    pub size_bytes: u64,
    pub met_rules: Vec<String>,
    pub missing_rules: Vec<String>,
    /// Rules that were never evaluated because the file was missing or
    /// could not be read
    pub unchecked_rules: Vec<String>,
    pub warnings: Vec<String>,
}

impl FileReport {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.exists && self.readable && self.missing_rules.is_empty() && self.size_bytes > 0
    }
}

/// Everything one validation run found, in the order it was found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub files: Vec<FileReport>,
    pub issues: Vec<Issue>,
    pub all_valid: bool,
}

impl ValidationReport {
    pub fn file(&self, name: &str) -> Option<&FileReport> {
        self.files.iter().find(|f| f.file_name == name)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_fatal())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.is_fatal())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Process exit status: 0 when every check passed, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.all_valid {
            0
        } else {
            1
        }
    }
}
