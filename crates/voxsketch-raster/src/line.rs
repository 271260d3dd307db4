use std::iter::FusedIterator;

use voxsketch_core::Point;

/// Iterate over the Bresenham line from `from` to `to`, both inclusive.
///
/// The walk is the classic all-octant integer variant: a single error term
/// decides, at every step, whether to advance along x, along y, or both.
/// It yields exactly `max(|dx|, |dy|) + 1` points and is fully
/// deterministic.
pub fn line(from: Point, to: Point) -> Line {
    let dx = (i64::from(to.x) - i64::from(from.x)).abs();
    let dy = (i64::from(to.y) - i64::from(from.y)).abs();
    Line {
        cur: from,
        to,
        dx,
        dy,
        sx: if from.x < to.x { 1 } else { -1 },
        sy: if from.y < to.y { 1 } else { -1 },
        err: dx - dy,
        remaining: dx.max(dy) as usize + 1,
    }
}

/// Iterator returned by [`line`].
#[derive(Clone, Debug)]
pub struct Line {
    cur: Point,
    to: Point,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    remaining: usize,
}

impl Iterator for Line {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        let p = self.cur;
        self.remaining -= 1;
        if p == self.to {
            self.remaining = 0;
            return Some(p);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.cur.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.cur.y += self.sy;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Line {}

impl FusedIterator for Line {}
