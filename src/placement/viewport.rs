use crate::geometry::{CanvasState, NodeDimensions, Point, Rect, Size, screen_to_canvas};

/// The visible part of the canvas, in canvas space.
///
/// `viewport` is the on-screen size of the canvas element; its top-left
/// corner is the screen origin the canvas state is relative to.
pub fn viewport_bounds(viewport: Size, state: &CanvasState) -> Rect {
    let top_left = screen_to_canvas(Point::ORIGIN, state);
    let bottom_right = screen_to_canvas(Point::new(viewport.width, viewport.height), state);
    Rect::new(
        top_left.x,
        top_left.y,
        (bottom_right.x - top_left.x).max(0.0),
        (bottom_right.y - top_left.y).max(0.0),
    )
}

/// The viewport inset by `margin` on every side. Collapses to the viewport
/// centre when the margin is larger than half the viewport.
pub fn safe_area(bounds: Rect, margin: f64) -> Rect {
    let margin = margin.max(0.0);
    let inset_x = margin.min(bounds.width / 2.0);
    let inset_y = margin.min(bounds.height / 2.0);
    Rect::new(
        bounds.x + inset_x,
        bounds.y + inset_y,
        bounds.width - inset_x * 2.0,
        bounds.height - inset_y * 2.0,
    )
}

/// The range of top-left positions keeping a whole node inside `area`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRange {
    pub min: Point,
    pub max: Point,
}

impl PlacementRange {
    /// When the node is larger than `area` on an axis the range collapses to
    /// the area's leading edge on that axis.
    pub fn within(area: Rect, dims: NodeDimensions) -> Self {
        let min = Point::new(area.x, area.y);
        let max = Point::new(
            (area.right() - dims.width).max(min.x),
            (area.bottom() - dims.height).max(min.y),
        );
        Self { min, max }
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        const EPSILON: f64 = 1e-9;
        point.x >= self.min.x - EPSILON
            && point.x <= self.max.x + EPSILON
            && point.y >= self.min.y - EPSILON
            && point.y <= self.max.y + EPSILON
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}
