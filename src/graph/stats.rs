use super::connection::Connection;
use ahash::AHashMap;
use serde::Serialize;

/// Aggregate counts over the connection list, for validation panels and badges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStats {
    pub total_connections: usize,
    pub valid_connections: usize,
    pub invalid_connections: usize,
    /// Number of connections touching each node. Nodes without connections are absent.
    pub connections_per_node: AHashMap<String, usize>,
}

impl ConnectionStats {
    pub(crate) fn collect(connections: &[Connection]) -> Self {
        let mut stats = ConnectionStats {
            total_connections: connections.len(),
            ..Default::default()
        };
        for connection in connections {
            if connection.is_valid {
                stats.valid_connections += 1;
            } else {
                stats.invalid_connections += 1;
            }
            *stats
                .connections_per_node
                .entry(connection.source.clone())
                .or_default() += 1;
            *stats
                .connections_per_node
                .entry(connection.target.clone())
                .or_default() += 1;
        }
        stats
    }

    pub fn count_for(&self, node_id: &str) -> usize {
        self.connections_per_node.get(node_id).copied().unwrap_or(0)
    }
}
