//! Prelude module for convenient imports
//!
//! Re-exports the types most editors need: the session, the connection
//! manager, node payloads, geometry primitives and the placement engine.
//!
//! # Example
//!
//! ```rust
//! use strategy_canvas::prelude::*;
//!
//! let mut session = CanvasSession::new(Size::new(1280.0, 800.0));
//! let source = session.add_node(NodeData::Data(DataSourceConfig {
//!     symbol: "BTC/USDT".to_string(),
//!     timeframe: Timeframe::OneHour,
//! }));
//! let rsi = session.add_node(NodeData::Indicator(IndicatorConfig {
//!     indicator: IndicatorKind::Rsi,
//!     period: 14,
//!     source: PriceSource::Close,
//! }));
//!
//! let manager = session.manager_mut();
//! manager.start_connection(&source.id, HandleKind::Output, Point::new(0.0, 0.0));
//! assert!(manager.complete_connection(&rsi.id, HandleKind::Input));
//! assert_eq!(manager.get_connection_stats().total_connections, 1);
//! ```

pub use crate::config::CanvasConfig;
pub use crate::session::{CanvasSession, SharedSession};

pub use crate::geometry::{
    BezierPath, CanvasState, HandleKind, NodeDimensions, Point, Rect, Size,
    calculate_connection_path, canvas_to_screen, handle_screen_position, screen_to_canvas,
};

pub use crate::graph::{
    ActionConfig, ActiveConnection, ComparisonOperator, ConditionConfig, Connection,
    ConnectionAttempt, ConnectionExport, ConnectionManager, ConnectionStats, DataSourceConfig,
    ImportReport, IndicatorConfig, IndicatorKind, Node, NodeData, NodeKind, PriceSource,
    Timeframe, TradeSide, ValidationResult,
};

pub use crate::placement::{
    Arrangement, NodePositioner, PositionConfig, Positioned, calculate_node_arrangement,
};

pub use crate::error::{ConfigError, ConnectionError, ImportError, ValidationIssue};
