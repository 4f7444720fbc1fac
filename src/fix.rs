//! Quick-fix suggestion heuristics.
//!
//! Line-oriented, dry-run rewrites for a few common findings. Suggestions
//! are rendered as a patch-like text; nothing is written back to disk.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A proposed single-line rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixSuggestion {
    pub file: String,
    pub line: usize,
    pub original: String,
    pub proposed: String,
    pub description: String,
}

/// Propose quick fixes for a file. An unreadable file yields no suggestions.
pub fn propose_fixes_for_file(path: &Path) -> Vec<FixSuggestion> {
    let Ok(text) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    propose_fixes(&text, &path.to_string_lossy())
}

/// Propose quick fixes for a buffer.
pub fn propose_fixes(text: &str, file: &str) -> Vec<FixSuggestion> {
    let inner_html = Regex::new(r"\binnerHTML\s*=").expect("fix pattern must compile");
    let exec_call = Regex::new(r"child_process\.exec\s*\(").expect("fix pattern must compile");
    let subprocess_call =
        Regex::new(r"subprocess\.(?:run|Popen|call|check_output)\s*\(").expect("fix pattern must compile");
    let shell_true = Regex::new(r",?\s*shell\s*=\s*True\s*").expect("fix pattern must compile");

    let mut suggestions = Vec::new();
    let mut push = |line_no: usize, original: &str, proposed: String, description: &str| {
        if original != proposed {
            suggestions.push(FixSuggestion {
                file: file.to_string(),
                line: line_no + 1,
                original: original.to_string(),
                proposed,
                description: description.to_string(),
            });
        }
    };

    for (i, line) in text.lines().enumerate() {
        if inner_html.is_match(line) {
            push(
                i,
                line,
                inner_html.replace(line, "textContent =").into_owned(),
                "Prefer textContent over innerHTML to avoid XSS.",
            );
        }
        if exec_call.is_match(line) {
            push(
                i,
                line,
                exec_call
                    .replace(line, "child_process.execFile(")
                    .into_owned(),
                "Use execFile with args array instead of exec.",
            );
        }
        if subprocess_call.is_match(line) && shell_true.is_match(line) {
            push(
                i,
                line,
                shell_true.replace(line, " ").into_owned(),
                "Avoid shell=True; pass an args list and validate inputs.",
            );
        }
    }

    suggestions
}

/// Render suggestions as a unified-diff-like dry-run patch, grouped by file.
pub fn format_suggestions_as_patch(suggestions: &[FixSuggestion]) -> String {
    if suggestions.is_empty() {
        return "No quick-fix suggestions found.".to_string();
    }

    let mut by_file: BTreeMap<&str, Vec<&FixSuggestion>> = BTreeMap::new();
    for suggestion in suggestions {
        by_file.entry(&suggestion.file).or_default().push(suggestion);
    }

    let mut chunks = Vec::new();
    for (file, list) in by_file {
        chunks.push(format!("--- {}", file));
        chunks.push(format!("+++ {} (proposed)", file));
        for s in list {
            chunks.push(format!("@@ line {} @@", s.line));
            chunks.push(format!("- {}", s.original));
            chunks.push(format!("+ {}", s.proposed));
            chunks.push(format!("# {}", s.description));
        }
    }
    chunks.join("\n")
}
