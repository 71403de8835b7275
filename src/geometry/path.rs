use super::point::Point;
use std::fmt;

/// Fraction of the horizontal gap used as the control-point offset.
const CURVATURE: f64 = 0.5;
/// Control points are never closer than this to their endpoint, so nodes
/// stacked on top of each other still get a visibly curved edge.
pub const MIN_CONTROL_OFFSET: f64 = 50.0;

/// A cubic bezier curve between two connector handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierPath {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl BezierPath {
    /// Builds the curve used for connection edges: control points leave the
    /// start handle to the right and enter the end handle from the left.
    pub fn between(start: Point, end: Point) -> Self {
        let gap = (end.x - start.x).abs();
        let offset = (gap * CURVATURE).max(MIN_CONTROL_OFFSET);
        Self {
            start,
            control1: Point::new(start.x + offset, start.y),
            control2: Point::new(end.x - offset, end.y),
            end,
        }
    }

    /// Evaluates the curve at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }
}

impl fmt::Display for BezierPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}

/// SVG path data (`M x1 y1 C cx1 cy1, cx2 cy2, x2 y2`) for a connection
/// between two screen-space points.
pub fn calculate_connection_path(start: Point, end: Point) -> String {
    BezierPath::between(start, end).to_string()
}
