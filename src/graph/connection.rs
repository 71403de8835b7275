use crate::geometry::{HandleKind, Point};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A committed, directed edge `source -> target` between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: HandleKind,
    pub target_handle: HandleKind,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created: DateTime<Utc>,
    pub is_valid: bool,
}

impl Connection {
    pub(crate) fn from_attempt(attempt: &ConnectionAttempt) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source: attempt.source.clone(),
            target: attempt.target.clone(),
            source_handle: attempt.source_handle,
            target_handle: attempt.target_handle,
            // Exports store milliseconds; truncating here keeps them lossless.
            created: Utc::now().trunc_subsecs(3),
            is_valid: true,
        }
    }

    /// Whether this edge touches `node_id` on either end.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// Whether this edge spans the unordered pair `{a, b}`.
    pub fn spans(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// The other endpoint, if `node_id` is one of the two.
    pub fn other_end(&self, node_id: &str) -> Option<&str> {
        if self.source == node_id {
            Some(&self.target)
        } else if self.target == node_id {
            Some(&self.source)
        } else {
            None
        }
    }

    pub(crate) fn as_attempt(&self) -> ConnectionAttempt {
        ConnectionAttempt {
            source: self.source.clone(),
            target: self.target.clone(),
            source_handle: self.source_handle,
            target_handle: self.target_handle,
        }
    }
}

/// Both endpoints of a prospective connection, ready for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionAttempt {
    pub source: String,
    pub target: String,
    pub source_handle: HandleKind,
    pub target_handle: HandleKind,
}

impl ConnectionAttempt {
    pub fn new(
        source: impl Into<String>,
        source_handle: HandleKind,
        target: impl Into<String>,
        target_handle: HandleKind,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle,
            target_handle,
        }
    }
}

/// A connection currently being dragged out of a handle. Positions are in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveConnection {
    pub source_node_id: String,
    pub source_handle: HandleKind,
    pub start_position: Point,
    pub current_position: Point,
}
