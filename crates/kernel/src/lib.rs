//! Tilewalk Kernel: entities, follow camera, world bounds, and the frame pipeline.
//!
//! # Invariants
//! - An entity's collider always matches its current position.
//! - After `World::step`, the camera view lies inside the world bounds (or is
//!   centered on an axis where the view is larger than the world).
//! - A step depends only on the current state and its `delta_time`; equal
//!   inputs replay to equal states.

pub mod bounds;
pub mod camera;
pub mod config;
pub mod entity;
pub mod timing;
pub mod world;

pub use bounds::{BoundPolicy, BoundPolicyKind, ClampBound, RevertBound, WorldBounds};
pub use camera::{Camera, DEFAULT_LERP_FACTOR};
pub use config::{ConfigError, SimConfig};
pub use entity::{DEFAULT_SMOOTHING, Entity, Integration, ResolveMode, Shape};
pub use timing::{FIXED_DELTA_TIME, FrameClock, FrameTimer};
pub use world::{EVENT_LOG_CAPACITY, World, WorldEvent};
