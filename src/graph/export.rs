use super::connection::Connection;
use crate::error::ImportError;
use crate::geometry::CanvasState;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};

/// Serialized form of the connection list handed to persistence and undo layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionExport {
    pub connections: Vec<Connection>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub total_connections: usize,
    pub canvas_state: CanvasState,
}

impl ConnectionExport {
    pub fn to_json(&self) -> Result<String, ImportError> {
        serde_json::to_string_pretty(self).map_err(|e| ImportError::InvalidJson(e.to_string()))
    }

    /// Encodes the export as a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ImportError> {
        encode_to_vec(self, standard()).map_err(|e| ImportError::Snapshot(e.to_string()))
    }

    /// Decodes a snapshot produced by [`ConnectionExport::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImportError> {
        decode_from_slice(bytes, standard())
            .map(|(export, _)| export)
            .map_err(|e| ImportError::Snapshot(e.to_string()))
    }
}

/// What happened to each record during an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Records accepted as valid connections.
    pub imported: usize,
    /// Records kept but marked invalid because an endpoint is not on the canvas.
    pub flagged: usize,
    /// Records discarded as malformed or structurally invalid.
    pub dropped: usize,
}

impl ImportReport {
    pub fn kept(&self) -> usize {
        self.imported + self.flagged
    }
}
