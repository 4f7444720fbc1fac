//! Rule data models.
//!
//! A [`Rule`] is an immutable, validated signature. External candidates enter
//! only through [`RuleSpec::validate`]; a candidate with a missing field or a
//! pattern that does not compile is dropped, never fatal.

use super::Severity;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;

/// Language scope of a rule or a scanned buffer.
///
/// The wildcard is a variant, not a sentinel string, so a typo in a scope
/// cannot silently widen a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "js")]
    JavaScript,
    #[serde(rename = "ts")]
    TypeScript,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "any")]
    Any,
}

impl Language {
    /// Detect language from a file path's extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "py" => Language::Python,
            _ => Language::Any,
        }
    }

    /// Whether a rule scoped to `self` applies to a buffer detected as
    /// `detected`. Rules never cross-match an explicitly different language;
    /// the wildcard on either side matches everything.
    pub fn applies_to(self, detected: Language) -> bool {
        self == Language::Any || detected == Language::Any || self == detected
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::JavaScript => write!(f, "js"),
            Language::TypeScript => write!(f, "ts"),
            Language::Python => write!(f, "python"),
            Language::Any => write!(f, "any"),
        }
    }
}

/// An immutable vulnerability signature.
///
/// The pattern carries case-insensitive, global-scan semantics: it is
/// compiled once per load and applied repeatedly across a whole buffer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Unique, stable identifier. Built-in ids are namespaced by category
    /// prefix and must not change across releases: SARIF consumers key off
    /// them.
    pub id: String,

    /// Short title, used as the finding message.
    pub title: String,

    /// Severity assigned to every match.
    pub severity: Severity,

    /// Language scope.
    pub language: Language,

    /// Longer description of the vulnerability class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Compiled matching pattern.
    #[serde(serialize_with = "serialize_pattern")]
    pub pattern: Regex,

    /// Static remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

fn serialize_pattern<S: Serializer>(pattern: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(pattern.as_str())
}

/// Compile a rule pattern with the registry's semantics.
pub(crate) fn compile_pattern(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

/// An unvalidated rule candidate, as read from an external definition file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub severity: Severity,
    pub language: Language,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub fix: Option<String>,
}

impl RuleSpec {
    /// Acceptance check for externally supplied rules: non-empty id, title
    /// and pattern, and a pattern that compiles. Returns `None` for rejects.
    pub fn validate(self) -> Option<Rule> {
        if self.id.trim().is_empty() || self.title.trim().is_empty() {
            return None;
        }
        if self.pattern.is_empty() {
            return None;
        }
        let pattern = compile_pattern(&self.pattern).ok()?;
        Some(Rule {
            id: self.id,
            title: self.title,
            severity: self.severity,
            language: self.language,
            description: self.description,
            pattern,
            fix: self.fix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_detection_from_extension() {
        assert_eq!(Language::from_path(Path::new("a/b.js")), Language::JavaScript);
        assert_eq!(Language::from_path(Path::new("c.tsx")), Language::TypeScript);
        assert_eq!(Language::from_path(Path::new("app.py")), Language::Python);
        assert_eq!(Language::from_path(Path::new("README.md")), Language::Any);
        assert_eq!(Language::from_path(Path::new("Makefile")), Language::Any);
    }

    #[test]
    fn wildcard_applies_both_ways() {
        assert!(Language::Any.applies_to(Language::Python));
        assert!(Language::Python.applies_to(Language::Any));
        assert!(Language::JavaScript.applies_to(Language::JavaScript));
        assert!(!Language::JavaScript.applies_to(Language::TypeScript));
        assert!(!Language::TypeScript.applies_to(Language::Python));
    }

    #[test]
    fn spec_validation_accepts_complete_rule() {
        let spec = RuleSpec {
            id: "X001".into(),
            title: "Example".into(),
            severity: Severity::Low,
            language: Language::Any,
            description: None,
            pattern: r"\beval\s*\(".into(),
            fix: None,
        };
        let rule = spec.validate().expect("valid rule");
        assert_eq!(rule.id, "X001");
        assert!(rule.pattern.is_match("EVAL ("));
    }

    #[test]
    fn spec_validation_drops_bad_pattern() {
        let spec = RuleSpec {
            id: "X002".into(),
            title: "Broken".into(),
            severity: Severity::Low,
            language: Language::Any,
            description: None,
            pattern: "([unclosed".into(),
            fix: None,
        };
        assert!(spec.validate().is_none());
    }

    #[test]
    fn spec_validation_drops_empty_fields() {
        let spec = RuleSpec {
            id: " ".into(),
            title: "T".into(),
            severity: Severity::Low,
            language: Language::Any,
            description: None,
            pattern: "x".into(),
            fix: None,
        };
        assert!(spec.validate().is_none());
    }

    #[test]
    fn rule_serializes_pattern_as_source() {
        let rule = RuleSpec {
            id: "X003".into(),
            title: "T".into(),
            severity: Severity::Medium,
            language: Language::JavaScript,
            description: None,
            pattern: r"\bfoo\b".into(),
            fix: None,
        }
        .validate()
        .unwrap();
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["pattern"], r"\bfoo\b");
        assert_eq!(json["language"], "js");
    }
}
