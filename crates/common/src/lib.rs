//! Shared types used across the tilewalk crates.
//!
//! Positions and extents are `f32` world units (pixels at scale 1).

mod types;

pub use glam::Vec2;
pub use types::{Aabb, Circle, EntityId, TextureHandle};
