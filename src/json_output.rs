//! JSON output format for gram reports
//!
//! `--format json` implementation

use crate::report::Report;
use serde::Serialize;

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'r> {
    /// Crate version that produced the report
    pub version: String,
    /// Format name
    pub format: String,
    #[serde(flatten)]
    pub report: &'r Report,
}

impl<'r> JsonOutput<'r> {
    /// Wrap a report with version and format identifiers
    pub fn new(report: &'r Report) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "bingram-json-v1".to_string(),
            report,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
