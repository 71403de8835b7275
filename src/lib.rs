//! # Strategy Canvas - Node-Graph Editing Engine
//!
//! **Strategy Canvas** is the editing core behind a visual trading-strategy builder.
//! Users place typed nodes (data sources, indicators, conditions, actions) on a
//! zoomable, pannable canvas and drag connections between them. This crate keeps
//! that graph structurally valid while the user works, and does the geometry the
//! editor needs along the way.
//!
//! ## Components
//!
//! 1.  **Geometry** ([`geometry`]): stateless screen/canvas transforms, connector
//!     handle positions and bezier edge paths.
//! 2.  **Connection graph** ([`graph`]): the [`ConnectionManager`](graph::ConnectionManager)
//!     state machine. It validates every new connection (no self-loops, no duplicate
//!     node pairs, output-to-input only, no cycles) before committing it, cascades
//!     deletions when nodes disappear, and imports/exports the connection list.
//! 3.  **Placement** ([`placement`]): finds collision-free positions for new nodes
//!     inside the visible viewport, re-flows nodes on zoom and lays out grids.
//! 4.  **Session** ([`session`]): ties the three together for one editing session.
//!
//! Rendering, persistence, code generation and authorization live outside this crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use strategy_canvas::prelude::*;
//!
//! let nodes = vec![
//!     Node::new(
//!         "feed",
//!         Point::new(100.0, 100.0),
//!         NodeData::Data(DataSourceConfig {
//!             symbol: "ETH/USDT".to_string(),
//!             timeframe: Timeframe::FifteenMinutes,
//!         }),
//!     ),
//!     Node::new(
//!         "ema",
//!         Point::new(420.0, 100.0),
//!         NodeData::Indicator(IndicatorConfig {
//!             indicator: IndicatorKind::Ema,
//!             period: 21,
//!             source: PriceSource::Close,
//!         }),
//!     ),
//! ];
//!
//! let mut manager = ConnectionManager::new();
//! manager.update_nodes(nodes);
//!
//! // The editor reports the drag as it happens.
//! manager.start_connection("feed", HandleKind::Output, Point::new(352.0, 160.0));
//! manager.update_connection_position(Point::new(400.0, 170.0));
//! assert!(manager.complete_connection("ema", HandleKind::Input));
//!
//! // The reverse edge would close a cycle, so it is rejected.
//! let attempt = ConnectionAttempt::new("ema", HandleKind::Output, "feed", HandleKind::Input);
//! let result = manager.validate_connection(&attempt);
//! assert!(!result.is_valid);
//! assert!(result.has(&ValidationIssue::CircularDependency));
//!
//! // Find room for a new node in an 1280×800 viewport.
//! let positioner = NodePositioner::default();
//! let spot = positioner.calculate_optimal_node_position(
//!     Size::new(1280.0, 800.0),
//!     manager.canvas_state(),
//!     manager.nodes(),
//! );
//! assert!(spot.is_finite());
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod placement;
pub mod prelude;
pub mod session;
