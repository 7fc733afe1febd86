//! JSON reporter for validation results

use crate::error::SiteCheckError;
use crate::report::ValidationReport;

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Serialize the report, optionally pretty-printed
    pub fn format(report: &ValidationReport, pretty: bool) -> Result<String, SiteCheckError> {
        let text = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(text)
    }
}
