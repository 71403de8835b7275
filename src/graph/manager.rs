use super::connection::{ActiveConnection, Connection, ConnectionAttempt};
use super::export::{ConnectionExport, ExportMetadata, ImportReport};
use super::node::Node;
use super::stats::ConnectionStats;
use super::traversal::Adjacency;
use super::validation::{ValidationResult, validate_attempt};
use crate::error::{ConnectionError, ImportError};
use crate::geometry::{
    BezierPath, CanvasState, HandleKind, NodeDimensions, Point, handle_screen_position,
};
use ahash::AHashSet;
use itertools::Itertools;
use serde_json::Value;

/// Owns the connection graph of one canvas and every mutation applied to it.
///
/// The manager is a two-state machine: *Idle* when no connection is being
/// dragged, *Connecting* while an [`ActiveConnection`] exists. Every committed
/// connection has passed [`ConnectionManager::validate_connection`], so the
/// graph never holds self-loops, duplicate node pairs or cycles.
#[derive(Debug, Clone, Default)]
pub struct ConnectionManager {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    active: Option<ActiveConnection>,
    canvas_state: CanvasState,
    dimensions: NodeDimensions,
    /// Ids of imported connections flagged only because an endpoint was missing.
    missing_endpoints: AHashSet<String>,
}

/// Configures a [`ConnectionManager`] before the first edit.
pub struct ConnectionManagerBuilder {
    nodes: Vec<Node>,
    canvas_state: CanvasState,
    dimensions: NodeDimensions,
}

impl ConnectionManagerBuilder {
    /// Creates a builder with no nodes, the identity view and default node size.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            canvas_state: CanvasState::default(),
            dimensions: NodeDimensions::default(),
        }
    }

    /// Sets the initial node snapshot.
    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Sets the view transform used for handle positions and paths.
    pub fn with_canvas_state(mut self, state: CanvasState) -> Self {
        self.canvas_state = state;
        self
    }

    /// Sets the node size used for handle positions.
    pub fn with_dimensions(mut self, dimensions: NodeDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Builds an idle manager with no connections.
    pub fn build(self) -> ConnectionManager {
        ConnectionManager {
            nodes: self.nodes,
            connections: Vec::new(),
            active: None,
            canvas_state: self.canvas_state,
            dimensions: self.dimensions,
            missing_endpoints: AHashSet::new(),
        }
    }
}

impl Default for ConnectionManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ConnectionManagerBuilder {
        ConnectionManagerBuilder::new()
    }

    // --- Read-only views ---

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn active_connection(&self) -> Option<&ActiveConnection> {
        self.active.as_ref()
    }

    pub fn is_connecting(&self) -> bool {
        self.active.is_some()
    }

    pub fn canvas_state(&self) -> &CanvasState {
        &self.canvas_state
    }

    pub fn dimensions(&self) -> NodeDimensions {
        self.dimensions
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    // --- Snapshot updates ---

    /// Replaces the node snapshot and drops every connection that references a
    /// node no longer present. Returns the number of connections removed.
    ///
    /// Surviving connections have both endpoints on the canvas, so those an
    /// import flagged for a missing endpoint become valid again. Records that
    /// arrived already marked invalid keep their flag. A drag that started
    /// from a removed node is cancelled.
    pub fn update_nodes(&mut self, nodes: Vec<Node>) -> usize {
        self.nodes = nodes;
        let known: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();

        let before = self.connections.len();
        self.connections
            .retain(|c| known.contains(c.source.as_str()) && known.contains(c.target.as_str()));
        let removed = before - self.connections.len();
        for connection in &mut self.connections {
            if self.missing_endpoints.remove(&connection.id) {
                connection.is_valid = true;
            }
        }
        // Every id left belonged to a connection removed above.
        self.missing_endpoints.clear();

        if self
            .active
            .as_ref()
            .is_some_and(|a| !known.contains(a.source_node_id.as_str()))
        {
            log::debug!("Cancelling connection drag: source node was removed");
            self.active = None;
        }

        if removed > 0 {
            log::warn!(
                "Removed {} connection(s) referencing nodes no longer on the canvas",
                removed
            );
        }
        removed
    }

    pub fn update_canvas_state(&mut self, state: CanvasState) {
        self.canvas_state = state;
    }

    /// Records a node's new canvas position. Connections reference nodes by id,
    /// so none of them change; paths are recomputed on demand.
    pub fn update_connections_for_node_move(&mut self, node_id: &str, position: Point) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == node_id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    // --- Validation ---

    pub fn validate_connection(&self, attempt: &ConnectionAttempt) -> ValidationResult {
        let known: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        validate_attempt(attempt, &self.connections, Some(&known))
    }

    /// Whether `to` can be reached from `from` by following connections.
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        Adjacency::new(&self.connections).has_path(from, to)
    }

    // --- Connection drag lifecycle ---

    /// Starts dragging a connection out of `handle` on `node_id`.
    ///
    /// Any drag already in progress is discarded without creating a connection.
    pub fn start_connection(&mut self, node_id: &str, handle: HandleKind, screen_position: Point) {
        if let Some(previous) = &self.active {
            log::debug!(
                "Replacing connection drag from '{}' with one from '{}'",
                previous.source_node_id,
                node_id
            );
        }
        self.active = Some(ActiveConnection {
            source_node_id: node_id.to_string(),
            source_handle: handle,
            start_position: screen_position,
            current_position: screen_position,
        });
    }

    pub fn update_connection_position(&mut self, screen_position: Point) {
        if let Some(active) = &mut self.active {
            active.current_position = screen_position;
        }
    }

    /// Finishes the current drag on `target_node_id`.
    ///
    /// On rejection the drag stays active so the pointer can be dropped on a
    /// different handle; call [`ConnectionManager::cancel_connection`] to abandon it.
    pub fn try_complete_connection(
        &mut self,
        target_node_id: &str,
        target_handle: HandleKind,
    ) -> Result<Connection, ConnectionError> {
        let active = self.active.as_ref().ok_or(ConnectionError::NotConnecting)?;
        let attempt = ConnectionAttempt::new(
            active.source_node_id.clone(),
            active.source_handle,
            target_node_id,
            target_handle,
        );

        let result = self.validate_connection(&attempt);
        if !result.is_valid {
            log::debug!(
                "Rejected connection '{}' -> '{}': {:?}",
                attempt.source,
                attempt.target,
                result.errors
            );
            return Err(ConnectionError::Rejected(result.errors));
        }

        let connection = Connection::from_attempt(&attempt);
        log::info!(
            "Connected '{}' ({}) -> '{}' ({}) as {}",
            connection.source,
            connection.source_handle,
            connection.target,
            connection.target_handle,
            connection.id
        );
        self.connections.push(connection.clone());
        self.active = None;
        Ok(connection)
    }

    /// [`ConnectionManager::try_complete_connection`] reduced to success or failure.
    pub fn complete_connection(&mut self, target_node_id: &str, target_handle: HandleKind) -> bool {
        self.try_complete_connection(target_node_id, target_handle)
            .is_ok()
    }

    pub fn cancel_connection(&mut self) {
        self.active = None;
    }

    // --- Deletion ---

    pub fn delete_connection(&mut self, connection_id: &str) -> bool {
        match self.connections.iter().position(|c| c.id == connection_id) {
            Some(index) => {
                self.connections.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every connection touching `node_id` and returns how many were removed.
    pub fn delete_connections_for_node(&mut self, node_id: &str) -> usize {
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(node_id));
        before - self.connections.len()
    }

    pub fn clear_connections(&mut self) {
        self.connections.clear();
        self.missing_endpoints.clear();
        self.active = None;
    }

    // --- Queries ---

    pub fn get_connection_stats(&self) -> ConnectionStats {
        ConnectionStats::collect(&self.connections)
    }

    pub fn get_connections_for_node(&self, node_id: &str) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| c.touches(node_id))
            .collect()
    }

    /// Ids of nodes sharing a connection with `node_id`, in connection order, without repeats.
    pub fn get_connected_nodes(&self, node_id: &str) -> Vec<String> {
        self.connections
            .iter()
            .filter_map(|c| c.other_end(node_id))
            .unique()
            .map(str::to_string)
            .collect()
    }

    /// Node ids ordered so that every connection points forward.
    ///
    /// This is the evaluation order a code generator needs. Nodes that are not
    /// connected keep their snapshot order relative to each other.
    pub fn topological_order(&self) -> Vec<String> {
        let ids: Vec<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        Adjacency::new(&self.connections).topological_order(&ids)
    }

    // --- Rendering helpers ---

    /// SVG path for a committed connection under the stored canvas state.
    pub fn connection_path(&self, connection_id: &str) -> Option<String> {
        let connection = self.connections.iter().find(|c| c.id == connection_id)?;
        let source = self.node(&connection.source)?;
        let target = self.node(&connection.target)?;
        let start = handle_screen_position(
            source.position,
            connection.source_handle,
            &self.canvas_state,
            self.dimensions,
        );
        let end = handle_screen_position(
            target.position,
            connection.target_handle,
            &self.canvas_state,
            self.dimensions,
        );
        Some(BezierPath::between(start, end).to_string())
    }

    /// SVG path for the connection currently being dragged.
    pub fn active_connection_path(&self) -> Option<String> {
        self.active
            .as_ref()
            .map(|a| BezierPath::between(a.start_position, a.current_position).to_string())
    }

    // --- Import / export ---

    pub fn export_connections(&self) -> ConnectionExport {
        ConnectionExport {
            connections: self.connections.clone(),
            metadata: ExportMetadata {
                total_connections: self.connections.len(),
                canvas_state: self.canvas_state,
            },
        }
    }

    /// Replaces the connection list with the records in `data`.
    ///
    /// Records are read one at a time. Malformed records, duplicate ids and
    /// records that would break the graph rules (self-loop, same handle kinds,
    /// duplicate pair, cycle) are dropped. Records whose endpoints are missing
    /// from the node snapshot are kept with `is_valid = false` until
    /// [`ConnectionManager::update_nodes`] supplies both nodes. Records that
    /// arrive with `isValid: false` stay flagged. Only a document
    /// without a `connections` array is rejected outright, leaving state untouched.
    pub fn import_connections(&mut self, data: &Value) -> Result<ImportReport, ImportError> {
        let records = data
            .get("connections")
            .and_then(Value::as_array)
            .ok_or(ImportError::MissingConnections)?;

        let known: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut report = ImportReport::default();
        let mut accepted: Vec<Connection> = Vec::with_capacity(records.len());
        let mut missing: AHashSet<String> = AHashSet::new();

        for (index, record) in records.iter().enumerate() {
            let mut connection: Connection = match serde_json::from_value(record.clone()) {
                Ok(connection) => connection,
                Err(e) => {
                    log::warn!("Dropping connection record #{}: {}", index, e);
                    report.dropped += 1;
                    continue;
                }
            };

            if accepted.iter().any(|c| c.id == connection.id) {
                log::warn!("Dropping connection '{}': duplicate id", connection.id);
                report.dropped += 1;
                continue;
            }

            let result = validate_attempt(&connection.as_attempt(), &accepted, None);
            if !result.is_valid {
                log::warn!(
                    "Dropping connection '{}': {:?}",
                    connection.id,
                    result.errors
                );
                report.dropped += 1;
                continue;
            }

            let present = known.contains(connection.source.as_str())
                && known.contains(connection.target.as_str());
            if connection.is_valid && !present {
                connection.is_valid = false;
                missing.insert(connection.id.clone());
            }
            if connection.is_valid {
                report.imported += 1;
            } else {
                report.flagged += 1;
            }
            accepted.push(connection);
        }

        log::info!(
            "Imported {} connection(s): {} flagged, {} dropped",
            report.kept(),
            report.flagged,
            report.dropped
        );
        self.connections = accepted;
        self.missing_endpoints = missing;
        self.active = None;
        Ok(report)
    }

    pub fn import_connections_json(&mut self, json: &str) -> Result<ImportReport, ImportError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
        self.import_connections(&value)
    }

    /// Imports a typed export, e.g. one decoded from a binary snapshot.
    pub fn import_export(&mut self, export: &ConnectionExport) -> Result<ImportReport, ImportError> {
        let value =
            serde_json::to_value(export).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
        self.import_connections(&value)
    }
}
