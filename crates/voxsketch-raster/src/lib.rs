//! Discrete line rasterization for the voxsketch grid.
//!
//! - [`line`] walks the Bresenham line between two [`Point`]s, inclusive of
//!   both endpoints.
//! - [`LineRasterizer`] keeps a stroke anchor and recomputes the full line
//!   to each new end point, tagging every [`RasterPoint`] with the colour it
//!   is given.
//!
//! [`Point`]: voxsketch_core::Point

mod line;
mod rasterizer;

pub use line::{Line, line};
pub use rasterizer::{LineRasterizer, RasterPoint};
