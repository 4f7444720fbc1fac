//! Finding assembly: deduplication, taint annotation, stable identity.

use crate::models::Finding;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashSet};

/// Compute the stable identifier for a finding.
///
/// The id is a function of `(file, start line, end line, rule id)` only, so
/// the same match site keeps its identity across runs and can be diffed.
pub fn stable_id(file: Option<&str>, start_line: usize, end_line: usize, rule_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!(
        "{}:{}-{}:{}",
        file.unwrap_or(""),
        start_line,
        end_line,
        rule_id
    ));
    let digest = hasher.finalize();
    digest
        .iter()
        .take(6)
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Produce the canonical finding list for one buffer.
///
/// Duplicates on `(rule id, file, start line/column, end line/column)` are
/// dropped, first occurrence wins. A finding whose snippet contains a
/// tainted name gets a `[tainted: <name>]` marker appended to its message;
/// the first name in sorted order wins. Every surviving finding gets the
/// stable id, replacing the matcher's provisional one.
pub fn assemble(raw: Vec<Finding>, tainted: &BTreeSet<String>) -> Vec<Finding> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());

    for mut finding in raw {
        let key = (
            finding.rule_id.clone(),
            finding.file.clone(),
            finding.range.start.line,
            finding.range.start.column,
            finding.range.end.line,
            finding.range.end.column,
        );
        if !seen.insert(key) {
            continue;
        }
        if let Some(name) = tainted.iter().find(|t| finding.snippet.contains(t.as_str())) {
            finding.message = format!("{} [tainted: {}]", finding.message, name);
        }
        finding.id = stable_id(
            finding.file.as_deref(),
            finding.range.start.line,
            finding.range.end.line,
            &finding.rule_id,
        );
        out.push(finding);
    }

    out
}
