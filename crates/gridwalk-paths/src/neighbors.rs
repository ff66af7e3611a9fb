use gridwalk_core::{Point, Range};

use crate::config::NeighborBounds;

/// Cached neighbor computation helper for bounded grids.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the 4-directional neighbors of `p` that lie inside `bounds`,
    /// keeping only those for which `keep` returns `true`.
    ///
    /// `guard` decides whether `p` itself may be expanded: see
    /// [`NeighborBounds`]. Neighbors are clipped per axis either way.
    pub fn cardinal(
        &mut self,
        p: Point,
        bounds: Range,
        guard: NeighborBounds,
        keep: impl Fn(Point) -> bool,
    ) -> &[Point] {
        self.buf.clear();
        if !guard.allows(p, bounds) {
            return &self.buf;
        }
        let candidates = [
            (p.x > bounds.min.x, Point::new(p.x - 1, p.y)),
            (p.x < bounds.max.x - 1, Point::new(p.x + 1, p.y)),
            (p.y > bounds.min.y, Point::new(p.x, p.y - 1)),
            (p.y < bounds.max.y - 1, Point::new(p.x, p.y + 1)),
        ];
        for (inside, n) in candidates {
            if inside && keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
