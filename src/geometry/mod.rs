//! Stateless coordinate math shared by the connection graph, the placement
//! engine and the renderer.
pub mod path;
pub mod point;
pub mod transform;

pub use path::*;
pub use point::*;
pub use transform::*;
