//! SARIF (Static Analysis Results Interchange Format) reporter.

use super::Reporter;
use crate::models::{Finding, ScanResult, Severity};
use serde_json::{json, Value};

/// SARIF 2.1.0 reporter. Each finding maps to one result entry keyed by its
/// rule id; the location region is emitted only when the finding carries a
/// file path.
pub struct SarifReporter {
    tool_name: String,
    tool_version: String,
}

impl SarifReporter {
    /// Create a new SARIF reporter.
    pub fn new() -> Self {
        Self {
            tool_name: "risk-audit".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Convert severity to SARIF level.
    fn severity_to_level(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => "error",
            Severity::Medium => "warning",
            Severity::Low => "note",
        }
    }

    /// Build a SARIF result from a finding.
    fn build_result(&self, finding: &Finding) -> Value {
        let message = match &finding.fix {
            Some(fix) => format!("{}\nFix: {}", finding.message, fix),
            None => finding.message.clone(),
        };

        let locations = match &finding.file {
            Some(file) => json!([{
                "physicalLocation": {
                    "artifactLocation": { "uri": file },
                    "region": {
                        "startLine": finding.range.start.line,
                        "startColumn": finding.range.start.column,
                        "endLine": finding.range.end.line,
                        "endColumn": finding.range.end.column
                    }
                }
            }]),
            None => json!([]),
        };

        json!({
            "ruleId": finding.rule_id,
            "level": Self::severity_to_level(finding.severity),
            "message": { "text": message },
            "fingerprints": { "primary": finding.id },
            "locations": locations
        })
    }
}

impl Default for SarifReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for SarifReporter {
    fn generate(&self, result: &ScanResult) -> String {
        let results: Vec<Value> = result
            .findings
            .iter()
            .map(|f| self.build_result(f))
            .collect();

        let sarif = json!({
            "version": "2.1.0",
            "$schema": "https://schemastore.azurewebsites.net/schemas/json/sarif-2.1.0-rtm.5.json",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": self.tool_name,
                        "version": self.tool_version,
                        "informationUri": "https://github.com/riskaudit/risk-audit",
                        "rules": []
                    }
                },
                "results": results
            }]
        });

        serde_json::to_string_pretty(&sarif).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}
