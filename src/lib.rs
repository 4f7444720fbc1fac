//! risk-audit - Pattern-Based Source Code Risk Auditor
//!
//! A zero-setup security scanner that applies language-scoped vulnerability
//! signatures (XSS sinks, shell/SQL/NoSQL injection points, SSRF-prone
//! calls, path traversal) to raw file text and emits structured findings
//! with precise source locations.
//!
//! # Features
//!
//! - **Pattern matching**: regex signatures with per-rule match caps and
//!   exact source ranges
//! - **Taint annotation**: shallow untrusted-source heuristic that marks
//!   findings whose snippet mentions a tainted variable
//! - **Stable identities**: hash-derived finding ids that survive re-runs,
//!   enabling cross-run diffing
//! - **Sidecar rules**: YAML-defined signatures merged after validation
//! - **Reporting**: human-readable text, JSON, and SARIF 2.1.0 output
//! - **MCP server**: scanner exposed as remote tools over stdio
//!
//! # Example Usage
//!
//! ```no_run
//! use risk_audit::Scanner;
//! use std::path::Path;
//!
//! let scanner = Scanner::for_root(Path::new("."));
//! let result = scanner.scan_project(Path::new("."), None, None)?;
//! println!("Found {} findings", result.findings.len());
//! # Ok::<(), risk_audit::AuditError>(())
//! ```

pub mod config;
pub mod error;
pub mod fix;
pub mod mcp;
pub mod models;
pub mod reporter;
pub mod rules;
pub mod scan;
pub mod walker;

// Re-export commonly used types
pub use config::{RuleFilterConfig, ScanConfig};
pub use error::{AuditError, Result};
pub use models::{Finding, Language, Position, Range, Rule, RuleSpec, ScanResult, ScanStats, Severity};
pub use rules::RuleRegistry;

use rayon::prelude::*;
use scan::{apply_rule_filters, assemble, collect_tainted_variables, filter_by_severity, scan_text};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};
use walker::walk_files;

/// Scanner holding one invocation's rule set and configuration.
///
/// Scanning is stateless per buffer: no mutable state is shared across
/// files, so the project entry point fans out per-file work in parallel
/// with no coordination beyond collecting results.
pub struct Scanner {
    config: Option<ScanConfig>,
    rules: Vec<Rule>,
}

impl Scanner {
    /// Build a scanner for a root: discovers rc-file configuration, loads
    /// built-in plus sidecar rules, and applies rule activation filters.
    pub fn for_root(root: &Path) -> Self {
        let config = ScanConfig::discover(root);
        Self::new(root, config)
    }

    /// Build a scanner with explicit configuration.
    pub fn new(root: &Path, config: Option<ScanConfig>) -> Self {
        Self::with_rules(root, config, Vec::new())
    }

    /// Build a scanner with explicit configuration and extra rules appended
    /// to the registry.
    pub fn with_rules(root: &Path, config: Option<ScanConfig>, extra: Vec<Rule>) -> Self {
        let registry = RuleRegistry::load(Some(root), extra);
        let rules = apply_rule_filters(registry.into_rules(), config.as_ref());
        debug!("Scanner initialized with {} active rules", rules.len());
        Self { config, rules }
    }

    /// The active, filter-applied rule set.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Scan an in-memory buffer: match, collect taint, assemble, and apply
    /// the severity floor. Deterministic for fixed inputs, including ids.
    pub fn scan_buffer(&self, text: &str, language: Language, file: Option<&str>) -> Vec<Finding> {
        let raw = scan_text(text, &self.rules, language, file);
        let tainted = collect_tainted_variables(text, language);
        let assembled = assemble(raw, &tainted);
        filter_by_severity(
            assembled,
            self.config.as_ref().and_then(|c| c.severity_min),
        )
    }

    /// Scan a single file. An unreadable file yields an empty finding list
    /// rather than an error.
    pub fn scan_file(&self, path: &Path) -> Vec<Finding> {
        let Ok(content) = std::fs::read_to_string(path) else {
            debug!("Skipping unreadable file: {}", path.display());
            return Vec::new();
        };
        let language = Language::from_path(path);
        self.scan_buffer(&content, language, Some(&path.to_string_lossy()))
    }

    /// Scan a directory tree. Files are scanned independently in parallel;
    /// per-file results are concatenated in walk order.
    pub fn scan_project(
        &self,
        root: &Path,
        include: Option<&[String]>,
        exclude: Option<&[String]>,
    ) -> Result<ScanResult> {
        if !root.is_dir() {
            return Err(AuditError::TargetNotFound(root.display().to_string()));
        }
        let start = Instant::now();

        let empty: &[String] = &[];
        let config_include = self.config.as_ref().and_then(|c| c.include.as_deref());
        let config_exclude = self.config.as_ref().and_then(|c| c.exclude.as_deref());
        let include = include.or(config_include).unwrap_or(empty);
        let exclude = exclude.or(config_exclude).unwrap_or(empty);

        let files = walk_files(root, include, exclude);
        let files_scanned = files.len();

        let findings: Vec<Finding> = files
            .par_iter()
            .map(|path| self.scan_file(path))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Scanned {} files in {}ms, {} findings",
            files_scanned,
            duration_ms,
            findings.len()
        );

        Ok(ScanResult {
            findings,
            stats: ScanStats {
                files_scanned,
                duration_ms,
            },
        })
    }
}
