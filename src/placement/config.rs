use serde::{Deserialize, Serialize};

/// Tunable parameters for node placement. All distances are in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionConfig {
    /// Inset applied to every side of the visible viewport to form the safe area.
    pub edge_margin: f64,
    /// Step between candidate positions when searching for free space.
    pub grid_size: f64,
    /// Minimum free gap kept around existing nodes.
    pub node_spacing: f64,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            edge_margin: 50.0,
            grid_size: 20.0,
            node_spacing: 30.0,
        }
    }
}
