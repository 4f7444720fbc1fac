//! Scan configuration.
//!
//! Configuration is discovered from an rc file at the scanned root. A
//! missing or malformed file degrades to no configuration: every filter
//! becomes a no-op rather than an error. Unknown fields are ignored.

use crate::models::Severity;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// File names probed at the scan root, in order. The first readable,
/// parseable one wins.
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    ".riskauditrc",
    ".riskauditrc.yaml",
    ".riskauditrc.yml",
    ".riskauditrc.json",
];

/// Optional scan configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    /// Substrings a path must contain to be scanned (empty = all).
    pub include: Option<Vec<String>>,

    /// Substrings that exclude a path from scanning.
    pub exclude: Option<Vec<String>>,

    /// Minimum severity below which findings are suppressed.
    pub severity_min: Option<Severity>,

    /// Rule activation sets.
    pub rules: Option<RuleFilterConfig>,
}

/// Rule enable/disable sets.
///
/// Disable is applied after the enable inclusion check, so a rule listed in
/// both sets is removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleFilterConfig {
    pub enable: Vec<String>,
    pub disable: Vec<String>,
}

impl ScanConfig {
    /// Discover configuration at a scan root. Returns `None` when no rc file
    /// exists or none of them parses.
    pub fn discover(root: &Path) -> Option<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = root.join(name);
            let Ok(text) = std::fs::read_to_string(&path) else {
                continue;
            };
            let parsed = if name.ends_with(".json") {
                serde_json::from_str::<ScanConfig>(&text).ok()
            } else {
                // YAML is a superset of JSON, so the extensionless rc file
                // accepts either syntax
                serde_yaml::from_str::<ScanConfig>(&text).ok()
            };
            match parsed {
                Some(config) => {
                    debug!("Loaded scan configuration from {}", path.display());
                    return Some(config);
                }
                None => {
                    debug!("Ignoring malformed configuration file {}", path.display());
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".riskauditrc.yaml"),
            "severityMin: medium\nrules:\n  disable: [VBC300]\n",
        )
        .unwrap();

        let config = ScanConfig::discover(dir.path()).expect("config");
        assert_eq!(config.severity_min, Some(Severity::Medium));
        assert_eq!(config.rules.unwrap().disable, vec!["VBC300"]);
    }

    #[test]
    fn discovers_json_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".riskauditrc.json"),
            r#"{"severityMin": "critical", "exclude": ["vendor"]}"#,
        )
        .unwrap();

        let config = ScanConfig::discover(dir.path()).expect("config");
        assert_eq!(config.severity_min, Some(Severity::Critical));
        assert_eq!(config.exclude, Some(vec!["vendor".to_string()]));
    }

    #[test]
    fn malformed_config_is_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".riskauditrc.yaml"), ": : : not yaml [").unwrap();
        assert!(ScanConfig::discover(dir.path()).is_none());
    }

    #[test]
    fn missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ScanConfig::discover(dir.path()).is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".riskauditrc.json"),
            r#"{"severityMin": "low", "futureOption": true}"#,
        )
        .unwrap();
        let config = ScanConfig::discover(dir.path()).expect("config");
        assert_eq!(config.severity_min, Some(Severity::Low));
    }
}
