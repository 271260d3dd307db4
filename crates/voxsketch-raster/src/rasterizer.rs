use voxsketch_core::{Color, Point};

use crate::line::line;

/// One rasterized grid point: a 1×1 cell at `pos` painted in `color`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterPoint {
    pub pos: Point,
    pub width: u32,
    pub height: u32,
    pub color: Color,
}

impl RasterPoint {
    /// A unit-sized point.
    #[inline]
    pub const fn new(pos: Point, color: Color) -> Self {
        Self {
            pos,
            width: 1,
            height: 1,
            color,
        }
    }
}

/// Rasterizes straight strokes from a fixed anchor.
///
/// Call [`start`](Self::start) when a drag begins, then
/// [`calculate`](Self::calculate) every time the pointer moves. Each
/// calculation replaces the previous result with the complete line from
/// the anchor, so repeated calls with the same end point are idempotent.
#[derive(Clone, Debug, Default)]
pub struct LineRasterizer {
    anchor: Point,
    points: Vec<RasterPoint>,
}

impl LineRasterizer {
    /// A rasterizer anchored at the origin with no points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous result and anchor subsequent lines at `(x, y)`.
    pub fn start(&mut self, x: i32, y: i32) {
        self.points.clear();
        self.anchor = Point::new(x, y);
    }

    /// Recompute the line from the anchor to `(end_x, end_y)`, both
    /// inclusive, with every point tagged with `color`.
    pub fn calculate(&mut self, end_x: i32, end_y: i32, color: Color) -> &[RasterPoint] {
        self.points.clear();
        self.points.extend(
            line(self.anchor, Point::new(end_x, end_y)).map(|p| RasterPoint::new(p, color)),
        );
        &self.points
    }

    /// The current anchor.
    #[inline]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Points produced by the last [`calculate`](Self::calculate).
    #[inline]
    pub fn points(&self) -> &[RasterPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
