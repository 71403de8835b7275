//! Viewport-aware placement of new nodes.
pub mod arrangement;
pub mod config;
pub mod positioner;
pub mod viewport;

pub use arrangement::*;
pub use config::*;
pub use positioner::*;
pub use viewport::*;
