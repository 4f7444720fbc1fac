//! Sidecar rule loading.
//!
//! Additional signatures can be supplied as YAML files in a `rules/`
//! directory next to the scanned root or under the current working
//! directory. Each file holds one rule or a list of rules. Candidates that
//! fail the acceptance check are dropped; missing directories and unparsable
//! files contribute nothing. Loading never aborts a scan.

use crate::models::{Rule, RuleSpec};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories probed for sidecar rule files.
pub fn sidecar_dirs(root: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(root) = root {
        dirs.push(root.join("rules"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        let cwd_rules = cwd.join("rules");
        if !dirs.contains(&cwd_rules) {
            dirs.push(cwd_rules);
        }
    }
    dirs
}

/// Load and validate rules from YAML files in the given directories.
pub fn load_yaml_rules(dirs: &[PathBuf]) -> Vec<Rule> {
    let mut rules = Vec::new();
    for dir in dirs {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
                .unwrap_or(false);
            if !is_yaml {
                continue;
            }
            let Ok(text) = std::fs::read_to_string(&path) else {
                continue;
            };
            let Ok(doc) = serde_yaml::from_str::<serde_yaml::Value>(&text) else {
                debug!("Skipping unparsable rule file: {}", path.display());
                continue;
            };
            let candidates = match doc {
                serde_yaml::Value::Sequence(items) => items,
                other => vec![other],
            };
            for candidate in candidates {
                match serde_yaml::from_value::<RuleSpec>(candidate) {
                    Ok(spec) => match spec.validate() {
                        Some(rule) => rules.push(rule),
                        None => debug!("Dropping invalid rule candidate in {}", path.display()),
                    },
                    Err(e) => debug!("Dropping malformed rule in {}: {}", path.display(), e),
                }
            }
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_valid_rules_and_drops_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let rules_dir = dir.path().join("rules");
        std::fs::create_dir(&rules_dir).unwrap();
        std::fs::write(
            rules_dir.join("custom.yaml"),
            concat!(
                "- id: CUS001\n",
                "  title: Custom eval\n",
                "  severity: critical\n",
                "  language: any\n",
                "  pattern: '\\beval\\s*\\('\n",
                "- id: CUS002\n",
                "  title: Broken pattern\n",
                "  severity: low\n",
                "  language: js\n",
                "  pattern: '([unclosed'\n",
                "- id: CUS003\n",
                "  title: Bad severity\n",
                "  severity: catastrophic\n",
                "  language: js\n",
                "  pattern: x\n",
            ),
        )
        .unwrap();

        let rules = load_yaml_rules(&[rules_dir]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "CUS001");
    }

    #[test]
    fn missing_directory_is_empty() {
        let rules = load_yaml_rules(&[PathBuf::from("/nonexistent/rules")]);
        assert!(rules.is_empty());
    }

    #[test]
    fn single_document_rule_file() {
        let dir = tempfile::tempdir().unwrap();
        let rules_dir = dir.path().join("rules");
        std::fs::create_dir(&rules_dir).unwrap();
        std::fs::write(
            rules_dir.join("one.yml"),
            "id: ONE001\ntitle: Single\nseverity: medium\nlanguage: python\npattern: danger\n",
        )
        .unwrap();

        let rules = load_yaml_rules(&[rules_dir]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "ONE001");
    }
}
