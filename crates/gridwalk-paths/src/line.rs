//! Line equations through cell centers and the cells a line point touches.

use std::collections::HashSet;

use gridwalk_core::Point;

/// Tolerance under which a swept coordinate is treated as lying exactly on a
/// grid line.
pub(crate) const GRID_EPSILON: f64 = 1e-9;

/// Center of cell `p` in grid units: `(x + 0.5, y + 0.5)`.
#[inline]
pub fn cell_center(p: Point) -> (f64, f64) {
    (f64::from(p.x) + 0.5, f64::from(p.y) + 0.5)
}

/// A line in grid space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    /// `x = x`.
    Vertical { x: f64 },
    /// `y = y`.
    Horizontal { y: f64 },
    /// `y = slope · x + intercept`.
    Sloped { slope: f64, intercept: f64 },
}

impl Line {
    /// Line through two points. The points must differ.
    pub fn through(a: (f64, f64), b: (f64, f64)) -> Self {
        if a.0 == b.0 {
            return Line::Vertical { x: a.0 };
        }
        if a.1 == b.1 {
            return Line::Horizontal { y: a.1 };
        }
        let slope = (a.1 - b.1) / (a.0 - b.0);
        Line::Sloped {
            slope,
            intercept: a.1 - slope * a.0,
        }
    }

    /// Line through the centers of two cells.
    #[inline]
    pub fn between_cells(a: Point, b: Point) -> Self {
        Self::through(cell_center(a), cell_center(b))
    }

    /// The `y` coordinate at `x`, or `None` for a vertical line.
    #[inline]
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            Line::Vertical { .. } => None,
            Line::Horizontal { y } => Some(y),
            Line::Sloped { slope, intercept } => Some(slope * x + intercept),
        }
    }

    /// The `x` coordinate at `y`, or `None` for a horizontal line.
    #[inline]
    pub fn x_at(&self, y: f64) -> Option<f64> {
        match *self {
            Line::Vertical { x } => Some(x),
            Line::Horizontal { .. } => None,
            Line::Sloped { slope, intercept } => Some((y - intercept) / slope),
        }
    }
}

/// Round `v` onto the nearest grid line when float error is all that
/// separates them.
#[inline]
pub(crate) fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < GRID_EPSILON { r } else { v }
}

/// Fill `buf` with the cells meeting at grid-space point `(x, y)`.
///
/// A lattice corner (both coordinates integral) touches four cells, a point
/// on a cell edge touches two, and any other point lies inside exactly one.
/// Cells found in `exclude` are left out. The caller's buffer is cleared
/// first.
pub fn cells_touching(x: f64, y: f64, exclude: Option<&HashSet<Point>>, buf: &mut Vec<Point>) {
    buf.clear();
    let x_on_line = x.fract() == 0.0;
    let y_on_line = y.fract() == 0.0;
    let cx = x.floor() as i32;
    let cy = y.floor() as i32;

    match (x_on_line, y_on_line) {
        (true, true) => buf.extend([
            Point::new(cx - 1, cy - 1),
            Point::new(cx, cy - 1),
            Point::new(cx - 1, cy),
            Point::new(cx, cy),
        ]),
        (true, false) => buf.extend([Point::new(cx - 1, cy), Point::new(cx, cy)]),
        (false, true) => buf.extend([Point::new(cx, cy - 1), Point::new(cx, cy)]),
        (false, false) => buf.push(Point::new(cx, cy)),
    }

    if let Some(exclude) = exclude.filter(|e| !e.is_empty()) {
        buf.retain(|p| !exclude.contains(p));
    }
}
