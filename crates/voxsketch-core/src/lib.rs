//! **voxsketch-core** — core types for the voxsketch pixel/voxel editor.
//!
//! This crate provides the foundational types shared by the other voxsketch
//! crates: discrete and world-space geometry, drawing colours, and the
//! [`TileGrid`] that maps `(row, col)` addresses to tile storage and to
//! centred world positions.

pub mod geom;
pub mod grid;
pub mod style;

pub use geom::{Point, Position};
pub use grid::{GridConfig, GridError, TileContext, TileGrid};
pub use style::{Color, ColorError};
