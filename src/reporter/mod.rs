//! Reporting module for rendering scan results.

mod sarif;
mod text;

pub use sarif::*;
pub use text::*;

use crate::models::ScanResult;
use serde::{Deserialize, Serialize};

/// Output format enumeration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
    /// SARIF (Static Analysis Results Interchange Format)
    Sarif,
}

/// Report generator trait.
pub trait Reporter {
    /// Render a report from a scan result.
    fn generate(&self, result: &ScanResult) -> String;
}

/// Create a reporter based on output format.
pub fn create_reporter(format: OutputFormat) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Text => Box::new(TextReporter::new()),
        OutputFormat::Json => Box::new(JsonReporter::new()),
        OutputFormat::Sarif => Box::new(SarifReporter::new()),
    }
}

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn generate(&self, result: &ScanResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}
