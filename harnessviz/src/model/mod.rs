//! Harness entity model: connectors, cables, and the aggregate that owns them.
//!
//! Connections and loops refer to connectors and cables by name; the
//! [`Harness`] resolves those names when a connection is recorded.

pub mod cable;
pub mod harness;
pub mod node;

pub use cable::{Cable, CableSpec, Connection, PinSelection, WireRef};
pub use harness::Harness;
pub use node::{Loop, Node, NodeSpec, Side};
