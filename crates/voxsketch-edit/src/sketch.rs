//! Stroke drawing onto a [`TileGrid`].
//!
//! A [`Sketch`] wires pointer drags to the rasterizer and writes the
//! resulting points into grid tiles. A point's `x` addresses the grid row and
//! its `y` the column.

use voxsketch_core::{Color, Point, TileGrid};
use voxsketch_raster::{LineRasterizer, RasterPoint};

use crate::input::{Drag, DragTracker, PointerEvent};

/// Outcome of one [`Sketch::stroke_to`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stroke {
    /// Points written into tiles.
    pub painted: usize,
    /// Points that fell outside the grid.
    pub clipped: usize,
}

/// A grid plus the stroke state used to draw on it.
pub struct Sketch<T> {
    grid: TileGrid<T>,
    raster: LineRasterizer,
    drag: DragTracker,
    color: Color,
}

fn address(p: Point) -> Option<(usize, usize)> {
    let row = usize::try_from(p.x).ok()?;
    let col = usize::try_from(p.y).ok()?;
    Some((row, col))
}

impl<T> Sketch<T> {
    /// Draw on `grid` in black.
    pub fn new(grid: TileGrid<T>) -> Self {
        Self {
            grid,
            raster: LineRasterizer::new(),
            drag: DragTracker::new(),
            color: Color::BLACK,
        }
    }

    /// Set the drawing colour (builder).
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid<T> {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut TileGrid<T> {
        &mut self.grid
    }

    pub fn into_grid(self) -> TileGrid<T> {
        self.grid
    }

    /// Points of the stroke segment computed last.
    pub fn points(&self) -> &[RasterPoint] {
        self.raster.points()
    }

    fn select(&mut self, pos: Point) {
        let selected = address(pos)
            .is_some_and(|(row, col)| self.grid.set_active_tile(row, col).is_ok());
        if !selected {
            self.grid.reset_active_tile();
        }
    }

    /// Anchor a new stroke at `pos`.
    pub fn begin_stroke(&mut self, pos: Point) {
        self.raster.start(pos.x, pos.y);
        self.select(pos);
    }

    /// Rasterize from the stroke anchor to `pos` in the current colour and
    /// paint every point that lands on a tile.
    pub fn stroke_to<P>(&mut self, pos: Point, mut paint: P) -> Stroke
    where
        P: FnMut(&mut T, &RasterPoint),
    {
        let mut stroke = Stroke::default();
        for point in self.raster.calculate(pos.x, pos.y, self.color) {
            let tile = address(point.pos).and_then(|(row, col)| self.grid.tile_mut(row, col).ok());
            match tile {
                Some(tile) => {
                    paint(tile, point);
                    stroke.painted += 1;
                }
                None => stroke.clipped += 1,
            }
        }
        self.select(pos);
        stroke
    }

    /// Finish the current stroke.
    pub fn end_stroke(&mut self) {
        self.grid.reset_active_tile();
    }

    /// Drive strokes from raw pointer events.
    ///
    /// A press begins a stroke and paints its first point, each move with
    /// the button held extends the stroke from the anchor, and release or
    /// leave ends it. Returns the stroke painted by this event, if any.
    pub fn handle_pointer<P>(&mut self, ev: PointerEvent, paint: P) -> Option<Stroke>
    where
        P: FnMut(&mut T, &RasterPoint),
    {
        match self.drag.handle(ev)? {
            Drag::Begin(pos) => {
                self.begin_stroke(pos);
                Some(self.stroke_to(pos, paint))
            }
            Drag::Continue(pos) => Some(self.stroke_to(pos, paint)),
            Drag::End => {
                self.end_stroke();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Color = Color::from_rgb(0x20, 0x40, 0x80);

    fn blank(rows: usize, cols: usize) -> Sketch<Option<Color>> {
        Sketch::new(TileGrid::new(rows, cols, 1.0, 1.0, |_| None).unwrap()).with_color(INK)
    }

    fn fill(tile: &mut Option<Color>, p: &RasterPoint) {
        *tile = Some(p.color);
    }

    fn painted(s: &Sketch<Option<Color>>) -> Vec<(usize, usize)> {
        let mut v: Vec<_> = s
            .grid()
            .iter()
            .filter(|(_, t)| t.is_some())
            .map(|(a, _)| a)
            .collect();
        v.sort();
        v
    }

    #[test]
    fn stroke_paints_line_cells() {
        let mut s = blank(4, 4);
        s.begin_stroke(Point::new(0, 0));
        let stroke = s.stroke_to(Point::new(3, 3), fill);
        assert_eq!(stroke, Stroke { painted: 4, clipped: 0 });
        assert_eq!(painted(&s), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(s.grid().tile(2, 2).unwrap(), &Some(INK));
        assert_eq!(s.grid().active_address(), Some((3, 3)));
    }

    #[test]
    fn points_outside_grid_are_clipped() {
        let mut s = blank(3, 3);
        s.begin_stroke(Point::new(-1, 1));
        let stroke = s.stroke_to(Point::new(4, 1), fill);
        assert_eq!(stroke, Stroke { painted: 3, clipped: 3 });
        assert_eq!(painted(&s), vec![(0, 1), (1, 1), (2, 1)]);
        // The end point is off-grid, so nothing is active.
        assert_eq!(s.grid().active_address(), None);
    }

    #[test]
    fn colour_change_applies_to_next_stroke() {
        let mut s = blank(2, 2);
        s.begin_stroke(Point::new(0, 0));
        s.stroke_to(Point::new(0, 0), fill);
        s.set_color(Color::WHITE);
        s.begin_stroke(Point::new(1, 1));
        s.stroke_to(Point::new(1, 1), fill);
        assert_eq!(s.grid().tile(0, 0).unwrap(), &Some(INK));
        assert_eq!(s.grid().tile(1, 1).unwrap(), &Some(Color::WHITE));
    }

    #[test]
    fn pointer_drag_draws_and_release_stops() {
        let mut s = blank(5, 5);
        assert_eq!(s.handle_pointer(PointerEvent::moved(Point::new(1, 1)), fill), None);
        assert!(painted(&s).is_empty());

        let first = s.handle_pointer(PointerEvent::press(Point::new(0, 0)), fill);
        assert_eq!(first, Some(Stroke { painted: 1, clipped: 0 }));
        assert_eq!(s.grid().active_address(), Some((0, 0)));

        s.handle_pointer(PointerEvent::moved(Point::new(4, 0)), fill);
        assert_eq!(painted(&s), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);

        assert_eq!(s.handle_pointer(PointerEvent::release(Point::new(4, 0)), fill), None);
        assert_eq!(s.grid().active_address(), None);

        s.handle_pointer(PointerEvent::moved(Point::new(4, 4)), fill);
        assert_eq!(painted(&s).len(), 5);
    }

    #[test]
    fn each_move_redraws_from_the_anchor() {
        let mut s = Sketch::new(TileGrid::new(4, 4, 1.0, 1.0, |_| 0u32).unwrap());
        s.begin_stroke(Point::new(0, 0));
        s.stroke_to(Point::new(3, 0), |t, _| *t += 1);
        s.stroke_to(Point::new(0, 3), |t, _| *t += 1);
        // The anchor is painted by both segments.
        assert_eq!(s.grid().tile(0, 0).unwrap(), &2);
        assert_eq!(s.grid().tile(3, 0).unwrap(), &1);
        assert_eq!(s.grid().tile(0, 3).unwrap(), &1);
        assert_eq!(s.points().len(), 4);
    }
}
