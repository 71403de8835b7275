//! Tests for viewport bounds, collision-free placement and grid arrangement.
mod common;
use common::*;
use strategy_canvas::placement::{PlacementRange, safe_area};
use strategy_canvas::prelude::*;

fn inside(rect: Rect, node: Point, dims: NodeDimensions) -> bool {
    node.x >= rect.x - 1e-9
        && node.y >= rect.y - 1e-9
        && node.x + dims.width <= rect.right() + 1e-9
        && node.y + dims.height <= rect.bottom() + 1e-9
}

#[test]
fn test_viewport_bounds_in_canvas_space() {
    let positioner = NodePositioner::default();
    let state = CanvasState::new(0.5, Point::new(100.0, 40.0));
    let bounds = positioner.get_viewport_bounds(viewport(), &state);
    assert_eq!(bounds, Rect::new(-200.0, -80.0, 2400.0, 1600.0));

    let safe = positioner.get_safe_area(viewport(), &state);
    assert_eq!(safe, Rect::new(-150.0, -30.0, 2300.0, 1500.0));
}

#[test]
fn test_empty_canvas_places_inside_safe_area() {
    let positioner = NodePositioner::default();
    let state = CanvasState::default();
    let position =
        positioner.calculate_optimal_node_position::<Node>(viewport(), &state, &[]);

    let safe = positioner.get_safe_area(viewport(), &state);
    assert!(position.x > safe.x && position.x < safe.right());
    assert!(position.y > safe.y && position.y < safe.bottom());
    assert!(inside(safe, position, positioner.dimensions));
    // Centred in the safe area.
    assert_eq!(position, Point::new(480.0, 340.0));
}

#[test]
fn test_occupied_centre_is_avoided() {
    let positioner = NodePositioner::default();
    let state = CanvasState::default();
    let existing = vec![data_node("X", Point::new(480.0, 340.0))];

    let position = positioner.calculate_optimal_node_position(viewport(), &state, &existing);
    let dims = positioner.dimensions;
    let blocked = Rect::from_node(existing[0].position, dims).inflate(positioner.config.node_spacing);
    assert!(!Rect::from_node(position, dims).intersects(&blocked));
    assert!(inside(positioner.get_safe_area(viewport(), &state), position, dims));
}

#[test]
fn test_full_viewport_still_returns_in_bounds_point() {
    let positioner = NodePositioner::default();
    let state = CanvasState::default();
    let small = Size::new(400.0, 300.0);
    let existing: Vec<Point> = (0..6)
        .flat_map(|row| (0..6).map(move |col| Point::new(col as f64 * 60.0, row as f64 * 60.0)))
        .collect();

    let position = positioner.calculate_optimal_node_position(small, &state, &existing);
    let range = PlacementRange::within(positioner.get_safe_area(small, &state), positioner.dimensions);
    assert!(range.contains(position));
}

#[test]
fn test_ensure_within_bounds() {
    let positioner = NodePositioner::default();
    let state = CanvasState::default();

    let valid = Point::new(200.0, 200.0);
    assert_eq!(positioner.ensure_node_within_bounds(valid, viewport(), &state), valid);

    let far = Point::new(5000.0, -5000.0);
    let clamped = positioner.ensure_node_within_bounds(far, viewport(), &state);
    // Safe area is (50, 50)..(1150, 750); node is 240×120.
    assert_eq!(clamped, Point::new(910.0, 50.0));
}

#[test]
fn test_multiple_positions_keep_spacing() {
    let positioner = NodePositioner::default();
    let state = CanvasState::default();
    let existing = vec![indicator_node("X", Point::new(480.0, 340.0))];

    let positions = positioner.calculate_multiple_node_positions(5, viewport(), &state, &existing);
    assert_eq!(positions.len(), 5);

    let dims = positioner.dimensions;
    let spacing = positioner.config.node_spacing;
    let safe = positioner.get_safe_area(viewport(), &state);
    let mut all: Vec<Point> = vec![existing[0].position];
    all.extend(positions.iter().copied());

    for (i, a) in all.iter().enumerate() {
        for b in all.iter().skip(i + 1) {
            let ra = Rect::from_node(*a, dims);
            let rb = Rect::from_node(*b, dims);
            assert!(ra.center().distance_to(rb.center()) >= spacing);
            assert!(!ra.inflate(spacing).intersects(&rb));
        }
    }
    for position in &positions {
        assert!(inside(safe, *position, dims));
    }
}

#[test]
fn test_crowded_batch_keeps_centre_spacing() {
    let positioner = NodePositioner::default();
    let state = CanvasState::default();
    let spacing = positioner.config.node_spacing;

    for size in [Size::new(300.0, 200.0), Size::new(400.0, 300.0)] {
        let positions = positioner.calculate_multiple_node_positions::<Point>(4, size, &state, &[]);
        assert_eq!(positions.len(), 4);

        let safe = positioner.get_safe_area(size, &state);
        let range = PlacementRange::within(safe, positioner.dimensions);
        assert!(range.contains(positions[0]));
        for (i, a) in positions.iter().enumerate() {
            for b in positions.iter().skip(i + 1) {
                assert!(
                    a.distance_to(*b) >= spacing,
                    "{} and {} are closer than {} in a {:?} viewport",
                    a,
                    b,
                    spacing,
                    size
                );
            }
        }
    }
}

#[test]
fn test_multiple_positions_zero_count() {
    let positioner = NodePositioner::default();
    let positions = positioner.calculate_multiple_node_positions::<Point>(
        0,
        viewport(),
        &CanvasState::default(),
        &[],
    );
    assert!(positions.is_empty());
}

#[test]
fn test_zoom_reflow_identity() {
    let positioner = NodePositioner::default();
    let nodes = four_nodes();
    let state = CanvasState::new(1.5, Point::ORIGIN);
    let same = positioner.update_node_positions_for_zoom(&nodes, 1.5, 1.5, viewport(), &state);
    assert_eq!(same, nodes);
}

#[test]
fn test_zoom_reflow_keeps_nodes_visible() {
    let positioner = NodePositioner::default();
    let nodes = four_nodes();
    let state = CanvasState::new(2.0, Point::ORIGIN);
    let reflowed = positioner.update_node_positions_for_zoom(&nodes, 1.0, 2.0, viewport(), &state);

    let safe = positioner.get_safe_area(viewport(), &state);
    assert_eq!(reflowed.len(), nodes.len());
    for (before, after) in nodes.iter().zip(&reflowed) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.data, after.data);
        assert!(safe.x <= after.position.x && after.position.x <= safe.right());
        assert!(safe.y <= after.position.y && after.position.y <= safe.bottom());
    }
}

#[test]
fn test_arrangement_square_grid() {
    let arrangement =
        calculate_node_arrangement(9, Size::new(1000.0, 1000.0), NodeDimensions::default(), 30.0);
    assert_eq!(arrangement.rows, 3);
    assert_eq!(arrangement.cols, 3);
    assert_eq!(arrangement.spacing, 30.0);
}

#[test]
fn test_arrangement_edge_cases() {
    let dims = NodeDimensions::default();
    let area = Size::new(1000.0, 1000.0);

    let none = calculate_node_arrangement(0, area, dims, 30.0);
    assert_eq!((none.rows, none.cols), (0, 0));
    let one = calculate_node_arrangement(1, area, dims, 30.0);
    assert_eq!((one.rows, one.cols), (1, 1));

    let narrow = calculate_node_arrangement(4, Size::new(300.0, 1000.0), dims, 30.0);
    assert_eq!((narrow.rows, narrow.cols), (4, 1));
}

#[test]
fn test_arrangement_widens_for_short_areas() {
    // Four columns fit across, but only two rows fit down.
    let arrangement =
        calculate_node_arrangement(8, Size::new(1100.0, 300.0), NodeDimensions::default(), 30.0);
    assert_eq!((arrangement.rows, arrangement.cols), (2, 4));
}

#[test]
fn test_arrangement_positions() {
    let dims = NodeDimensions::default();
    let arrangement = calculate_node_arrangement(5, Size::new(1000.0, 1000.0), dims, 30.0);
    let positions = arrangement.positions(Point::new(10.0, 10.0), dims, 5);
    assert_eq!(positions.len(), 5);
    assert_eq!(positions[0], Point::new(10.0, 10.0));
    assert_eq!(positions[1], Point::new(280.0, 10.0));
    assert_eq!(positions[3], Point::new(10.0, 160.0));
}

#[test]
fn test_safe_area_helper() {
    let area = safe_area(Rect::new(0.0, 0.0, 1200.0, 800.0), 50.0);
    assert_eq!(area, Rect::new(50.0, 50.0, 1100.0, 700.0));
}
