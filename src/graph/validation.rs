use super::connection::{Connection, ConnectionAttempt};
use super::traversal::Adjacency;
use crate::error::ValidationIssue;
use ahash::AHashSet;
use serde::Serialize;

/// Outcome of checking a connection attempt against the current graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(serialize_with = "serialize_issues")]
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn has(&self, issue: &ValidationIssue) -> bool {
        self.errors.contains(issue)
    }
}

/// Checks an attempt against `connections` without mutating anything.
///
/// Every applicable issue is reported, in this order: self-connection,
/// handle mismatch, duplicate pair, circular dependency, unknown endpoints.
/// The cycle check is skipped for self-connections, which are already fatal.
/// When `known_nodes` is `None` endpoint existence is not checked.
pub fn validate_attempt(
    attempt: &ConnectionAttempt,
    connections: &[Connection],
    known_nodes: Option<&AHashSet<&str>>,
) -> ValidationResult {
    let mut errors = Vec::new();
    let is_self = attempt.source == attempt.target;

    if is_self {
        errors.push(ValidationIssue::SelfConnection);
    }

    if attempt.target_handle != attempt.source_handle.opposite() {
        errors.push(ValidationIssue::HandleMismatch);
    }

    if connections
        .iter()
        .any(|c| c.spans(&attempt.source, &attempt.target))
    {
        errors.push(ValidationIssue::Duplicate);
    }

    if !is_self && Adjacency::new(connections).would_close_cycle(&attempt.source, &attempt.target)
    {
        errors.push(ValidationIssue::CircularDependency);
    }

    if let Some(known) = known_nodes {
        for endpoint in [&attempt.source, &attempt.target] {
            if !known.contains(endpoint.as_str()) {
                let issue = ValidationIssue::UnknownNode(endpoint.clone());
                if !errors.contains(&issue) {
                    errors.push(issue);
                }
            }
        }
    }

    ValidationResult::from_issues(errors)
}

fn serialize_issues<S>(issues: &[ValidationIssue], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(issues.iter().map(ToString::to_string))
}
