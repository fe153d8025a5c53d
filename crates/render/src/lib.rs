//! Rendering leaf: turns a world into draw calls against a backend target.
//!
//! # Invariants
//! - Renderers read the world; they never mutate it.
//! - Every draw position is in view space (world position minus view origin).

mod renderer;
mod scene;

pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{DrawCommand, DrawList, DrawTarget, RenderStats, SceneRenderer};
