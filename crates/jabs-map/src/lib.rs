//! Tile map for JABS.
//!
//! Passability grid and tile line-of-sight. The engine only ever asks the
//! map a handful of questions: is a tile inside the map, can it be walked
//! on, is there a clear line between two tiles, and which tiles a hitbox
//! covers.

pub use jabs_core as core;

pub mod grid;
pub mod hitbox;
pub mod los;

// Re-export key types for convenience.
pub use grid::TileMap;
pub use hitbox::{can_reach, hitbox_tiles};
pub use los::{has_line_of_sight, line_tiles};
