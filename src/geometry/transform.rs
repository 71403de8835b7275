use super::point::{CanvasState, HANDLE_INSET, HandleKind, NodeDimensions, Point};

/// Converts a screen-space point into canvas space: `(screen - offset) / zoom`.
pub fn screen_to_canvas(point: Point, state: &CanvasState) -> Point {
    let zoom = state.effective_zoom();
    Point::new(
        (point.x - state.offset.x) / zoom,
        (point.y - state.offset.y) / zoom,
    )
}

/// Converts a canvas-space point into screen space: `canvas * zoom + offset`.
pub fn canvas_to_screen(point: Point, state: &CanvasState) -> Point {
    let zoom = state.effective_zoom();
    Point::new(
        point.x * zoom + state.offset.x,
        point.y * zoom + state.offset.y,
    )
}

/// Canvas-space position of a node's connector handle.
///
/// Handles sit vertically centred on the node, `HANDLE_INSET` units outside
/// the left (input) or right (output) edge.
pub fn handle_canvas_position(
    node_position: Point,
    handle: HandleKind,
    dims: NodeDimensions,
) -> Point {
    let y = node_position.y + dims.height / 2.0;
    match handle {
        HandleKind::Input => Point::new(node_position.x - HANDLE_INSET, y),
        HandleKind::Output => Point::new(node_position.x + dims.width + HANDLE_INSET, y),
    }
}

/// Screen-space position of a node's connector handle under the given view transform.
pub fn handle_screen_position(
    node_position: Point,
    handle: HandleKind,
    state: &CanvasState,
    dims: NodeDimensions,
) -> Point {
    canvas_to_screen(handle_canvas_position(node_position, handle, dims), state)
}
