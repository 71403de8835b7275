use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Horizontal and vertical distance between a node edge and its connector handle.
pub const HANDLE_INSET: f64 = 12.0;

/// Default width of a node card on the canvas.
pub const DEFAULT_NODE_WIDTH: f64 = 240.0;
/// Default height of a node card on the canvas.
pub const DEFAULT_NODE_HEIGHT: f64 = 120.0;

/// Smallest zoom factor the transforms will divide by.
pub const MIN_ZOOM: f64 = 1e-6;
/// Largest zoom factor the transforms will multiply by.
pub const MAX_ZOOM: f64 = 1e6;

/// A 2D point. Whether it lives in screen or canvas space is decided by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Checks equality within `tolerance` on both axes.
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The current view transform: `screen = canvas * zoom + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasState {
    pub zoom: f64,
    pub offset: Point,
}

impl CanvasState {
    pub fn new(zoom: f64, offset: Point) -> Self {
        Self { zoom, offset }
    }

    /// The zoom factor clamped into `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Non-finite or non-positive values collapse to `MIN_ZOOM` so that the
    /// transforms never divide by zero and always produce finite output.
    pub fn effective_zoom(&self) -> f64 {
        if self.zoom.is_finite() && self.zoom > 0.0 {
            self.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            MIN_ZOOM
        }
    }
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Point::ORIGIN,
        }
    }
}

/// Width and height of a node card, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDimensions {
    pub width: f64,
    pub height: f64,
}

impl NodeDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for NodeDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }
}

/// A width/height pair in screen pixels, e.g. the canvas element's client size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which side of a node a connector handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    Input,
    Output,
}

impl HandleKind {
    pub fn opposite(self) -> HandleKind {
        match self {
            HandleKind::Input => HandleKind::Output,
            HandleKind::Output => HandleKind::Input,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HandleKind::Input => "input",
            HandleKind::Output => "output",
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle a node occupies when its top-left corner is at `position`.
    pub fn from_node(position: Point, dims: NodeDimensions) -> Self {
        Self::new(position.x, position.y, dims.width, dims.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn inflate(self, amount: f64) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Open-interval overlap test: rectangles that only touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}
