//! The connection graph: node snapshot, committed connections, the in-progress
//! drag and the rules that keep the graph a valid DAG.
pub mod connection;
pub mod export;
pub mod manager;
pub mod node;
pub mod stats;
mod traversal;
pub mod validation;

pub use connection::*;
pub use export::*;
pub use manager::*;
pub use node::*;
pub use stats::*;
pub use validation::*;
