//! Tile map: static level geometry loaded once from a text grid.
//!
//! # Invariants
//! - Tiles never change after the map is built; the tile count is fixed.
//! - Only structural kinds take part in collision; the flag is per kind.
//! - A map that fails to load is never partially constructed.
//!
//! # Format
//! Integer tile codes separated by spaces, one row per line. The column count
//! comes from the first row; every row must match it.

mod kind;
mod map;

pub use kind::{KindInfo, TileKind};
pub use map::{MapConfig, MapError, Tile, TileMap};
