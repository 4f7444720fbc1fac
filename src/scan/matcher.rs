//! Pattern matcher: applies the rule registry to one text buffer.

use super::LineIndex;
use crate::models::{Finding, Language, Rule};

/// Maximum matches emitted per rule per file. Excess matches are silently
/// discarded, bounding worst-case output on pathological inputs such as
/// minified bundles.
pub const MATCH_CAP: usize = 200;

/// Scan a buffer with every applicable rule and produce raw findings.
///
/// A rule applies when its language scope is the wildcard, the detected
/// language is the wildcard, or the two are equal. Matches within one rule
/// are discovered left-to-right by offset; rules are evaluated in registry
/// order. Zero matches is a valid empty result, never an error.
pub fn scan_text(
    text: &str,
    rules: &[Rule],
    language: Language,
    file: Option<&str>,
) -> Vec<Finding> {
    let index = LineIndex::new(text);
    let mut findings = Vec::new();

    for rule in rules {
        if !rule.language.applies_to(language) {
            continue;
        }
        let mut at = 0;
        let mut matched = 0;
        while at <= text.len() {
            let Some(m) = rule.pattern.find_at(text, at) else {
                break;
            };
            findings.push(Finding {
                // provisional id; the assembler replaces it with the stable one
                id: format!(
                    "{}:{}:{}-{}",
                    rule.id,
                    file.unwrap_or("memory"),
                    m.start(),
                    m.end()
                ),
                rule_id: rule.id.clone(),
                severity: rule.severity,
                file: file.map(str::to_string),
                range: index.range(m.start(), m.end()),
                snippet: text[m.start()..m.end()].to_string(),
                message: rule.title.clone(),
                fix: rule.fix.clone(),
            });
            matched += 1;
            if matched >= MATCH_CAP {
                break;
            }
            at = if m.end() > m.start() {
                m.end()
            } else {
                // a zero-length match must not stall the scan: skip one character
                m.end() + text[m.end()..].chars().next().map_or(1, char::len_utf8)
            };
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{compile_pattern, Severity};
    use crate::rules::builtin_rules;

    fn test_rule(id: &str, pattern: &str, language: Language) -> Rule {
        Rule {
            id: id.to_string(),
            title: format!("rule {id}"),
            severity: Severity::Medium,
            language,
            description: None,
            pattern: compile_pattern(pattern).unwrap(),
            fix: None,
        }
    }

    #[test]
    fn detects_unsafe_html_sink_with_exact_snippet() {
        let rules = builtin_rules();
        let findings = scan_text(
            "div.innerHTML = user;",
            &rules,
            Language::JavaScript,
            Some("app.js"),
        );
        let xss: Vec<_> = findings.iter().filter(|f| f.rule_id == "VBC001").collect();
        assert_eq!(xss.len(), 1);
        assert_eq!(xss[0].severity, Severity::Medium);
        assert_eq!(xss[0].snippet, "innerHTML = user;");
        assert_eq!(xss[0].range.start.line, 1);
    }

    #[test]
    fn rules_never_cross_match_an_explicit_language() {
        let rules = vec![test_rule("PY1", "danger", Language::Python)];
        assert!(scan_text("danger", &rules, Language::JavaScript, None).is_empty());
        assert_eq!(scan_text("danger", &rules, Language::Python, None).len(), 1);
        // wildcard buffer matches every rule
        assert_eq!(scan_text("danger", &rules, Language::Any, None).len(), 1);
    }

    #[test]
    fn match_cap_is_hit_not_exceeded() {
        let rules = vec![test_rule("CAP1", "x", Language::Any)];
        let text = "x".repeat(500);
        let findings = scan_text(&text, &rules, Language::Any, Some("big.js"));
        assert_eq!(findings.len(), MATCH_CAP);
    }

    #[test]
    fn zero_length_pattern_terminates() {
        let rules = vec![test_rule("ZERO1", "a*", Language::Any)];
        let findings = scan_text("bbbb", &rules, Language::Any, None);
        // every position yields an empty match until the cap or end of input
        assert!(findings.len() <= MATCH_CAP);
        assert!(!findings.is_empty());
    }

    #[test]
    fn matches_are_left_to_right_within_a_rule() {
        let rules = vec![test_rule("ORD1", "ab", Language::Any)];
        let findings = scan_text("ab ab ab", &rules, Language::Any, None);
        let columns: Vec<usize> = findings.iter().map(|f| f.range.start.column).collect();
        assert_eq!(columns, vec![1, 4, 7]);
    }

    #[test]
    fn zero_matches_is_empty_result() {
        let rules = builtin_rules();
        let findings = scan_text("let x = 1;", &rules, Language::JavaScript, None);
        assert!(findings.is_empty());
    }

    #[test]
    fn patterns_are_case_insensitive() {
        let rules = vec![test_rule("CASE1", "eval", Language::Any)];
        assert_eq!(scan_text("EVAL(", &rules, Language::Any, None).len(), 1);
    }

    #[test]
    fn multiline_positions_are_exact() {
        let rules = vec![test_rule("POS1", "needle", Language::Any)];
        let findings = scan_text("line one\nline two needle here", &rules, Language::Any, None);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].range.start.line, 2);
        assert_eq!(findings[0].range.start.column, 10);
        assert_eq!(findings[0].range.end.line, 2);
        assert_eq!(findings[0].range.end.column, 16);
    }
}
