//! Line-of-sight tests between cells.
//!
//! The segment between two cell centers is swept along its dominant axis.
//! Samples are taken at both centers and at every grid line crossed in
//! between; each sample contributes the cells meeting at that point (see
//! [`cells_touching`]). A segment passing exactly through a lattice corner
//! therefore sees all four cells around it.

use gridwalk_core::Point;

use crate::line::{Line, cells_touching, snap};
use crate::traits::BarrierMap;

/// Grid-space sample points along the segment between two distinct cells.
fn sweep(start: Point, destination: Point) -> impl Iterator<Item = (f64, f64)> {
    let line = Line::between_cells(start, destination);
    let d = (destination - start).abs();
    let horizontal = d.x > d.y;
    let (lo, hi) = if horizontal {
        (start.x.min(destination.x), start.x.max(destination.x))
    } else {
        (start.y.min(destination.y), start.y.max(destination.y))
    };

    let steps = std::iter::once(f64::from(lo) + 0.5)
        .chain((lo + 1..=hi).map(f64::from))
        .chain(std::iter::once(f64::from(hi) + 0.5));

    steps.filter_map(move |t| {
        if horizontal {
            line.y_at(t).map(|y| (t, snap(y)))
        } else {
            line.x_at(t).map(|x| (snap(x), t))
        }
    })
}

/// Whether any barrier lies on the straight segment between the centers of
/// `start` and `destination`.
///
/// Identical cells never have a barrier between them.
pub fn has_barrier<M: BarrierMap + ?Sized>(map: &M, start: Point, destination: Point) -> bool {
    if start == destination {
        return false;
    }
    let mut buf = Vec::with_capacity(4);
    for (x, y) in sweep(start, destination) {
        cells_touching(x, y, None, &mut buf);
        if buf.iter().any(|&c| map.is_blocked(c)) {
            return true;
        }
    }
    false
}

/// Negation of [`has_barrier`].
#[inline]
pub fn has_line_of_sight<M: BarrierMap + ?Sized>(map: &M, start: Point, destination: Point) -> bool {
    !has_barrier(map, start, destination)
}
