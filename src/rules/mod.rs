//! Rule registry: built-in signatures plus externally supplied definitions.

mod builtin;
mod loader;

pub use builtin::builtin_rules;
pub use loader::{load_yaml_rules, sidecar_dirs};

use crate::models::Rule;
use std::path::Path;
use tracing::debug;

/// An ordered collection of validated rules for one scan invocation.
///
/// Iteration order is built-ins first, then externals in load order; the
/// matcher evaluates rules in this order.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Only the built-in rule set.
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Built-ins, sidecar YAML rules discovered relative to `root`, and any
    /// caller-supplied extras.
    pub fn load(root: Option<&Path>, extra: Vec<Rule>) -> Self {
        let mut rules = builtin_rules();
        let sidecar = load_yaml_rules(&sidecar_dirs(root));
        if !sidecar.is_empty() {
            debug!("Loaded {} sidecar rules", sidecar.len());
        }
        rules.extend(sidecar);
        rules.extend(extra);
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, RuleSpec, Severity};

    #[test]
    fn builtins_come_first() {
        let extra = RuleSpec {
            id: "EXT001".into(),
            title: "Extra".into(),
            severity: Severity::Low,
            language: Language::Any,
            description: None,
            pattern: "extra".into(),
            fix: None,
        }
        .validate()
        .unwrap();

        let registry = RuleRegistry::load(None, vec![extra]);
        assert_eq!(registry.rules().first().unwrap().id, "VBC001");
        assert_eq!(registry.rules().last().unwrap().id, "EXT001");
        assert_eq!(registry.len(), builtin_rules().len() + 1);
    }
}
