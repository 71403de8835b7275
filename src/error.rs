use itertools::Itertools;
use thiserror::Error;

/// A structural reason why a connection attempt cannot be committed.
///
/// These are returned as data inside a [`ValidationResult`](crate::graph::ValidationResult)
/// so the editor can decide how to present them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("self-connection forbidden")]
    SelfConnection,

    #[error("must connect output to input")]
    HandleMismatch,

    #[error("duplicate connection")]
    Duplicate,

    #[error("circular dependency")]
    CircularDependency,

    #[error("node '{0}' is not part of the current canvas")]
    UnknownNode(String),
}

/// Errors returned when finishing a connection drag.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectionError {
    #[error("no connection is being dragged")]
    NotConnecting,

    #[error("connection rejected: {}", format_issues(.0))]
    Rejected(Vec<ValidationIssue>),
}

/// Errors that abort an import as a whole. Individual bad records never do.
#[derive(Error, Debug, Clone)]
pub enum ImportError {
    #[error("Failed to parse connection export JSON: {0}")]
    InvalidJson(String),

    #[error("Connection export has no 'connections' array")]
    MissingConnections,

    #[error("Snapshot encoding failed: {0}")]
    Snapshot(String),
}

/// Errors raised while loading canvas configuration.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to parse canvas config: {0}")]
    Parse(String),

    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid value for '{field}': {message}")]
    OutOfRange { field: &'static str, message: String },
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().join(", ")
}
