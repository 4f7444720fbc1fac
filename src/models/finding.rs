//! Finding data models.

use serde::{Deserialize, Serialize};

/// Severity level of a finding, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A 1-based line/column pair in a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A source range between two positions.
///
/// Produced from a half-open byte-offset span `[start, end)` over the
/// original buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// One reported potential vulnerability instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Stable identifier derived from `(file, start line, end line, rule id)`.
    /// Recomputing it for the same inputs on a later run yields the same
    /// value, so findings can be diffed across invocations.
    pub id: String,

    /// Identifier of the rule that produced this finding.
    pub rule_id: String,

    /// Severity inherited from the rule.
    pub severity: Severity,

    /// Scanned file path; absent for in-memory buffers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Source range of the match.
    pub range: Range,

    /// Exact matched substring.
    pub snippet: String,

    /// Human-readable message (the rule title, possibly taint-annotated).
    pub message: String,

    /// Static remediation hint from the rule, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

/// Result of scanning a project directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// All findings across scanned files.
    pub findings: Vec<Finding>,

    /// Scan statistics.
    pub stats: ScanStats,
}

impl ScanResult {
    /// Get findings with a specific severity.
    pub fn findings_by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Get the highest severity among the findings.
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}

/// Statistics about a scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    /// Number of files scanned
    pub files_scanned: usize,

    /// Scan duration in milliseconds
    pub duration_ms: u64,
}
