//! Developer tooling: read-only world inspection with text and JSON output.
//!
//! # Invariants
//! - Inspection never mutates the world.

mod inspector;

pub use inspector::{EntityInfo, WorldInspector, WorldSummary};
