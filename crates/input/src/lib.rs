//! Input actions: directional presses steer an entity's target velocity.
//!
//! # Invariants
//! - A press and the matching release with the same `delta_time` cancel out.
//! - Repeated presses of a held direction produce no action.

pub mod action;

pub use action::{Action, Direction, HeldDirections, apply};
