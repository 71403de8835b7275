use crate::geometry::{NodeDimensions, Point, Size};
use serde::Serialize;

/// A rows × columns grid for laying out a batch of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrangement {
    pub rows: usize,
    pub cols: usize,
    pub spacing: f64,
}

impl Arrangement {
    /// Top-left positions of the first `count` cells, filled row by row from `origin`.
    pub fn positions(&self, origin: Point, dims: NodeDimensions, count: usize) -> Vec<Point> {
        if self.cols == 0 {
            return Vec::new();
        }
        (0..count.min(self.rows * self.cols))
            .map(|index| {
                let row = index / self.cols;
                let col = index % self.cols;
                Point::new(
                    origin.x + col as f64 * (dims.width + self.spacing),
                    origin.y + row as f64 * (dims.height + self.spacing),
                )
            })
            .collect()
    }
}

/// How many cells of `extent` fit along an axis of length `available` with
/// `spacing` between neighbours.
fn cells_along(available: f64, extent: f64, spacing: f64) -> usize {
    let pitch = extent + spacing;
    if pitch <= 0.0 || !available.is_finite() {
        return 0;
    }
    ((available + spacing) / pitch).floor().max(0.0) as usize
}

/// Chooses a grid for `count` nodes inside `available`.
///
/// Starts from the squarest grid (`ceil(sqrt(count))` columns, capped at what
/// fits horizontally) and widens it while the rows overflow the available
/// height. Falls back to a single column when no two nodes fit side by side.
pub fn calculate_node_arrangement(
    count: usize,
    available: Size,
    dims: NodeDimensions,
    spacing: f64,
) -> Arrangement {
    match count {
        0 => {
            return Arrangement {
                rows: 0,
                cols: 0,
                spacing,
            };
        }
        1 => {
            return Arrangement {
                rows: 1,
                cols: 1,
                spacing,
            };
        }
        _ => {}
    }

    let max_cols = cells_along(available.width, dims.width, spacing).min(count);
    if max_cols < 2 {
        return Arrangement {
            rows: count,
            cols: 1,
            spacing,
        };
    }

    let max_rows = cells_along(available.height, dims.height, spacing);
    let square = ((count as f64).sqrt().ceil() as usize).clamp(1, max_cols);
    let cols = (square..=max_cols)
        .find(|cols| count.div_ceil(*cols) <= max_rows)
        .unwrap_or(max_cols);

    Arrangement {
        rows: count.div_ceil(cols),
        cols,
        spacing,
    }
}
