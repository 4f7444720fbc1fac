//! Error types for the risk auditor.

use thiserror::Error;

/// Main error type for the risk auditor.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scan target not found: {0}")]
    TargetNotFound(String),
}

/// Result type alias for auditor operations.
pub type Result<T> = std::result::Result<T, AuditError>;
