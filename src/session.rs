use crate::config::CanvasConfig;
use crate::geometry::{CanvasState, Point, Size};
use crate::graph::{ConnectionManager, Node, NodeData};
use crate::placement::NodePositioner;
use std::sync::{Arc, Mutex};

/// A session shared between threads. The single mutex guards the whole graph,
/// so validation always sees a consistent snapshot.
pub type SharedSession = Arc<Mutex<CanvasSession>>;

/// One editing session on one canvas.
///
/// Owns the connection graph, the viewport size and placement settings. The
/// view transform lives in the manager only, so placement and rendering
/// always agree on it. The editor constructs it and hands out references
/// to the renderer, toolbar actions and export routines; there is no global
/// instance.
#[derive(Debug, Clone)]
pub struct CanvasSession {
    manager: ConnectionManager,
    positioner: NodePositioner,
    viewport: Size,
}

impl CanvasSession {
    pub fn new(viewport: Size) -> Self {
        Self::from_config(&CanvasConfig::default(), viewport)
    }

    pub fn from_config(config: &CanvasConfig, viewport: Size) -> Self {
        let manager = ConnectionManager::builder()
            .with_canvas_state(config.canvas_state)
            .with_dimensions(config.dimensions)
            .build();
        Self {
            manager,
            positioner: NodePositioner::new(config.positioning, config.dimensions),
            viewport,
        }
    }

    /// Drops every node and connection, keeping the view and settings.
    pub fn reset(&mut self) {
        self.manager = ConnectionManager::builder()
            .with_canvas_state(*self.manager.canvas_state())
            .with_dimensions(self.positioner.dimensions)
            .build();
    }

    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ConnectionManager {
        &mut self.manager
    }

    pub fn positioner(&self) -> &NodePositioner {
        &self.positioner
    }

    pub fn nodes(&self) -> &[Node] {
        self.manager.nodes()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn canvas_state(&self) -> &CanvasState {
        self.manager.canvas_state()
    }

    /// Applies a pan or zoom produced by the editor's gesture handling.
    pub fn set_canvas_state(&mut self, state: CanvasState) {
        self.manager.update_canvas_state(state);
    }

    /// Adds a node at a free spot in the visible area.
    pub fn add_node(&mut self, data: NodeData) -> Node {
        let position = self.positioner.calculate_optimal_node_position(
            self.viewport,
            self.manager.canvas_state(),
            self.manager.nodes(),
        );
        let node = Node::new(uuid::Uuid::new_v4().to_string(), position, data);
        let mut nodes = self.manager.nodes().to_vec();
        nodes.push(node.clone());
        self.manager.update_nodes(nodes);
        log::debug!("Added {} node '{}' at {}", node.kind(), node.id, node.position);
        node
    }

    /// Adds several nodes, placing each clear of the others.
    pub fn add_nodes(&mut self, payloads: Vec<NodeData>) -> Vec<Node> {
        let positions = self.positioner.calculate_multiple_node_positions(
            payloads.len(),
            self.viewport,
            self.manager.canvas_state(),
            self.manager.nodes(),
        );
        let added: Vec<Node> = payloads
            .into_iter()
            .zip(positions)
            .map(|(data, position)| Node::new(uuid::Uuid::new_v4().to_string(), position, data))
            .collect();
        let mut nodes = self.manager.nodes().to_vec();
        nodes.extend(added.iter().cloned());
        self.manager.update_nodes(nodes);
        added
    }

    /// Removes a node and every connection touching it.
    ///
    /// Returns the number of connections removed, or `None` if the node does not exist.
    pub fn remove_node(&mut self, node_id: &str) -> Option<usize> {
        self.manager.node(node_id)?;
        let nodes: Vec<Node> = self
            .manager
            .nodes()
            .iter()
            .filter(|n| n.id != node_id)
            .cloned()
            .collect();
        Some(self.manager.update_nodes(nodes))
    }

    pub fn move_node(&mut self, node_id: &str, position: Point) -> bool {
        self.manager
            .update_connections_for_node_move(node_id, position)
    }

    /// Changes the zoom level and re-flows node positions so none end up off-screen.
    pub fn zoom_to(&mut self, zoom: f64) {
        let current = *self.manager.canvas_state();
        let old_zoom = current.zoom;
        let state = CanvasState::new(zoom, current.offset);
        let nodes = self.positioner.update_node_positions_for_zoom(
            self.manager.nodes(),
            old_zoom,
            zoom,
            self.viewport,
            &state,
        );
        self.set_canvas_state(state);
        self.manager.update_nodes(nodes);
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }
}
