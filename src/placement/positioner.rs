use super::config::PositionConfig;
use super::viewport::{PlacementRange, safe_area, viewport_bounds};
use crate::geometry::{CanvasState, MIN_ZOOM, NodeDimensions, Point, Rect, Size};
use crate::graph::Node;
use itertools::Itertools;

/// Upper bound on search rings, so extreme zoom levels cannot stall placement.
const MAX_SEARCH_RINGS: i64 = 200;

/// Anything with a canvas-space top-left position that placement must avoid.
pub trait Positioned {
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl Positioned for Node {
    fn position(&self) -> Point {
        self.position
    }
}

/// Rounds a point to the nearest multiple of `grid` on both axes.
pub fn snap_to_grid(point: Point, grid: f64) -> Point {
    if grid <= 0.0 || !grid.is_finite() {
        return point;
    }
    Point::new(
        (point.x / grid).round() * grid,
        (point.y / grid).round() * grid,
    )
}

/// Finds collision-free positions for new nodes inside the visible viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodePositioner {
    pub config: PositionConfig,
    pub dimensions: NodeDimensions,
}

impl NodePositioner {
    pub fn new(config: PositionConfig, dimensions: NodeDimensions) -> Self {
        Self { config, dimensions }
    }

    /// The visible part of the canvas in canvas space.
    pub fn get_viewport_bounds(&self, viewport: Size, state: &CanvasState) -> Rect {
        viewport_bounds(viewport, state)
    }

    /// The viewport inset by the configured edge margin.
    pub fn get_safe_area(&self, viewport: Size, state: &CanvasState) -> Rect {
        safe_area(viewport_bounds(viewport, state), self.config.edge_margin)
    }

    fn placement_range(&self, viewport: Size, state: &CanvasState) -> PlacementRange {
        PlacementRange::within(self.get_safe_area(viewport, state), self.dimensions)
    }

    /// Picks a top-left position for one new node.
    ///
    /// The node is centred in the safe area when that spot is free. Otherwise
    /// candidates on square rings of `grid_size` steps around the centre are
    /// tried, nearest first, until one clears every existing node by
    /// `node_spacing`. If the safe area is full, the candidate overlapping the
    /// least is returned. The result always lies inside the safe area.
    pub fn calculate_optimal_node_position<P: Positioned>(
        &self,
        viewport: Size,
        state: &CanvasState,
        existing: &[P],
    ) -> Point {
        let obstacles: Vec<Point> = existing.iter().map(Positioned::position).collect();
        self.find_position(self.placement_range(viewport, state), &obstacles)
    }

    /// Clamps `position` so the whole node stays in the safe area.
    pub fn ensure_node_within_bounds(
        &self,
        position: Point,
        viewport: Size,
        state: &CanvasState,
    ) -> Point {
        self.placement_range(viewport, state).clamp(position)
    }

    /// Places `count` nodes one after another, each treating the existing
    /// nodes and the ones already placed in this batch as obstacles.
    ///
    /// Every returned position keeps a centre distance of at least
    /// `node_spacing` from all obstacles. When the safe area is too crowded
    /// for that, the position is stepped diagonally by `grid_size` until it
    /// is clear, which may leave it outside the safe area.
    pub fn calculate_multiple_node_positions<P: Positioned>(
        &self,
        count: usize,
        viewport: Size,
        state: &CanvasState,
        existing: &[P],
    ) -> Vec<Point> {
        let range = self.placement_range(viewport, state);
        let mut obstacles: Vec<Point> = existing.iter().map(Positioned::position).collect();
        let mut placed = Vec::with_capacity(count);
        for _ in 0..count {
            let position = self.separate(self.find_position(range, &obstacles), &obstacles);
            obstacles.push(position);
            placed.push(position);
        }
        placed
    }

    /// Re-flows node positions after the zoom changed from `old_zoom` to `new_zoom`.
    ///
    /// `state` is the canvas state after the change. Each node is scaled about
    /// the viewport centre by `old_zoom / new_zoom`, so zooming in pulls nodes
    /// towards the centre, then clamped into the new safe area. Equal zoom
    /// levels return the nodes unchanged.
    pub fn update_node_positions_for_zoom(
        &self,
        nodes: &[Node],
        old_zoom: f64,
        new_zoom: f64,
        viewport: Size,
        state: &CanvasState,
    ) -> Vec<Node> {
        if old_zoom == new_zoom {
            return nodes.to_vec();
        }
        let factor = old_zoom.max(MIN_ZOOM) / new_zoom.max(MIN_ZOOM);
        let anchor = viewport_bounds(viewport, state).center();
        let range = self.placement_range(viewport, state);

        nodes
            .iter()
            .map(|node| {
                let half = Point::new(self.dimensions.width / 2.0, self.dimensions.height / 2.0);
                let centre = node.position + half;
                let scaled = anchor + (centre - anchor) * factor;
                Node {
                    position: range.clamp(scaled - half),
                    ..node.clone()
                }
            })
            .collect()
    }

    fn is_free(&self, candidate: Point, obstacles: &[Rect]) -> bool {
        let rect = Rect::from_node(candidate, self.dimensions);
        obstacles.iter().all(|o| !rect.intersects(o))
    }

    fn total_overlap(&self, candidate: Point, obstacles: &[Rect]) -> f64 {
        let rect = Rect::from_node(candidate, self.dimensions);
        obstacles.iter().map(|o| rect.overlap_area(o)).sum()
    }

    /// Whether the node centre at `candidate` is at least `node_spacing` from
    /// every other node centre. All nodes share one size, so comparing
    /// top-left corners gives the same distances.
    fn keeps_spacing(&self, candidate: Point, existing: &[Point]) -> bool {
        existing
            .iter()
            .all(|p| candidate.distance_to(*p) >= self.config.node_spacing)
    }

    fn grid_step(&self) -> f64 {
        if self.config.grid_size > 0.0 {
            self.config.grid_size
        } else {
            PositionConfig::default().grid_size
        }
    }

    /// Steps `position` diagonally by whole grid cells until it keeps its spacing.
    fn separate(&self, position: Point, existing: &[Point]) -> Point {
        if !position.is_finite() || self.keeps_spacing(position, existing) {
            return position;
        }
        let step = self.grid_step();
        let separated = (1u32..)
            .map(|k| position + Point::new(step, step) * f64::from(k))
            .find(|candidate| self.keeps_spacing(*candidate, existing))
            .unwrap_or(position);
        log::debug!(
            "Safe area is full; moved batch placement from {} to {}",
            position,
            separated
        );
        separated
    }

    fn find_position(&self, range: PlacementRange, existing: &[Point]) -> Point {
        let obstacles: Vec<Rect> = existing
            .iter()
            .map(|p| Rect::from_node(*p, self.dimensions).inflate(self.config.node_spacing))
            .collect();

        let centre = range.center();
        if self.is_free(centre, &obstacles) {
            return centre;
        }

        let grid = self.grid_step();
        let span = (range.max.x - range.min.x).max(range.max.y - range.min.y);
        let max_ring = ((span / grid).ceil() as i64 + 1).min(MAX_SEARCH_RINGS);

        // Fallback ranking: candidates that keep centre spacing first, then least overlap.
        let rank = |candidate: Point| {
            (
                !self.keeps_spacing(candidate, existing),
                self.total_overlap(candidate, &obstacles),
            )
        };
        let mut best = centre;
        let mut best_rank = rank(centre);

        for ring in 1..=max_ring {
            for (dx, dy) in ring_offsets(ring) {
                let candidate = centre + Point::new(dx as f64 * grid, dy as f64 * grid);
                if !range.contains(candidate) {
                    continue;
                }
                if self.is_free(candidate, &obstacles) {
                    log::debug!(
                        "Placed node at {} after searching {} ring(s)",
                        candidate,
                        ring
                    );
                    return candidate;
                }
                let candidate_rank = rank(candidate);
                if candidate_rank < best_rank {
                    best = candidate;
                    best_rank = candidate_rank;
                }
            }
        }

        log::debug!(
            "No free slot in the safe area; using least-overlapping position {}",
            best
        );
        range.clamp(best)
    }
}

/// Grid offsets on the square ring at Chebyshev distance `ring`, nearest first.
fn ring_offsets(ring: i64) -> impl Iterator<Item = (i64, i64)> {
    (-ring..=ring)
        .cartesian_product(-ring..=ring)
        .filter(move |(dx, dy)| dx.abs().max(dy.abs()) == ring)
        .sorted_by_key(|(dx, dy)| dx * dx + dy * dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_offsets_cover_the_perimeter() {
        let offsets: Vec<_> = ring_offsets(1).collect();
        assert_eq!(offsets.len(), 8);
        assert_eq!(ring_offsets(2).count(), 16);
        // Edge midpoints come before corners.
        assert_eq!(offsets[0].0.abs() + offsets[0].1.abs(), 1);
        assert_eq!(offsets[7].0.abs() + offsets[7].1.abs(), 2);
    }

    #[test]
    fn snap_rounds_to_nearest_multiple() {
        assert_eq!(snap_to_grid(Point::new(29.0, 31.0), 20.0), Point::new(20.0, 40.0));
        assert_eq!(snap_to_grid(Point::new(29.0, 31.0), 0.0), Point::new(29.0, 31.0));
    }
}
