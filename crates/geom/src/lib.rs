//! Geometry: overlap predicates with penetration correction, colliders, lerp.
//!
//! # Invariants
//! - Predicates are total and never mutate their inputs.
//! - Touching shapes do not overlap.
//! - A reported delta, subtracted from the first collider's position, leaves
//!   the pair exactly touching on that axis.
//! - Array variants stop at the first overlapping element.

mod collide;
mod collider;
mod math;

pub use collide::{
    Penetration, circle_vs_circle, circle_vs_rect, circle_vs_rect_array, overlaps,
    rect_vs_circle, rect_vs_rect, rect_vs_rect_array,
};
pub use collider::{Collider, first_hit};
pub use math::{lerp, lerp_vec2};
