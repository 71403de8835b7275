use crate::error::ConfigError;
use crate::geometry::{CanvasState, NodeDimensions};
use crate::placement::PositionConfig;
use serde::{Deserialize, Serialize};
use std::fs;

/// Canvas-wide settings, loadable from JSON. Missing fields take their defaults.
///
/// ```json
/// {
///   "dimensions": { "width": 240, "height": 120 },
///   "positioning": { "edgeMargin": 50, "gridSize": 20, "nodeSpacing": 30 },
///   "canvasState": { "zoom": 1.0, "offset": { "x": 0, "y": 0 } }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    pub dimensions: NodeDimensions,
    pub positioning: PositionConfig,
    pub canvas_state: CanvasState,
}

impl CanvasConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CanvasConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Rejects values the geometry cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("dimensions.width", self.dimensions.width),
            ("dimensions.height", self.dimensions.height),
            ("positioning.gridSize", self.positioning.grid_size),
            ("canvasState.zoom", self.canvas_state.zoom),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    message: format!("expected a positive number, found {}", value),
                });
            }
        }

        let non_negative = [
            ("positioning.edgeMargin", self.positioning.edge_margin),
            ("positioning.nodeSpacing", self.positioning.node_spacing),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    message: format!("expected zero or more, found {}", value),
                });
            }
        }

        if !self.canvas_state.offset.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "canvasState.offset",
                message: "offset must be finite".to_string(),
            });
        }
        Ok(())
    }
}
