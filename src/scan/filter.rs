//! Severity and rule filtering.
//!
//! Two independent, composable filters driven by optional configuration.
//! Both are pure functions over their input lists.

use crate::config::ScanConfig;
use crate::models::{Finding, Rule, Severity};

/// Apply configured rule activation to a rule list.
///
/// With a non-empty `enable` set only listed ids survive; any id in
/// `disable` is then removed. Disable wins over enable for a rule appearing
/// in both: the disable check runs after the enable inclusion check. Absent
/// configuration passes every rule through unchanged.
pub fn apply_rule_filters(rules: Vec<Rule>, config: Option<&ScanConfig>) -> Vec<Rule> {
    let Some(filters) = config.and_then(|c| c.rules.as_ref()) else {
        return rules;
    };
    rules
        .into_iter()
        .filter(|rule| {
            let enabled =
                filters.enable.is_empty() || filters.enable.iter().any(|id| id == &rule.id);
            enabled && !filters.disable.iter().any(|id| id == &rule.id)
        })
        .collect()
}

/// Drop findings strictly below a minimum severity.
///
/// No floor passes every finding through unchanged.
pub fn filter_by_severity(findings: Vec<Finding>, floor: Option<Severity>) -> Vec<Finding> {
    let Some(floor) = floor else {
        return findings;
    };
    findings
        .into_iter()
        .filter(|f| f.severity >= floor)
        .collect()
}
