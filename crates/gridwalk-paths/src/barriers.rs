//! In-memory barrier map.
//!
//! [`BarrierGrid`] keeps static and dynamic barriers in two independent sets
//! and implements [`NavMap`]. It can be built from text where `#` marks a
//! static barrier, `+` a dynamic one and `.` a free cell.

use std::collections::HashSet;
use std::fmt;

use gridwalk_core::{Point, Range};

use crate::distance::{chebyshev, manhattan};
use crate::traits::{BarrierMap, NavMap};

/// Static and dynamic barrier sets over a bounded grid.
#[derive(Debug, Clone)]
pub struct BarrierGrid {
    bounds: Range,
    static_barriers: HashSet<Point>,
    dynamic_barriers: HashSet<Point>,
    substitute_radius: i32,
}

impl BarrierGrid {
    /// How far [`find_substitute_position`](NavMap::find_substitute_position)
    /// looks by default, in Chebyshev rings.
    pub const DEFAULT_SUBSTITUTE_RADIUS: i32 = 3;

    /// Create an empty map covering `bounds`.
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            static_barriers: HashSet::new(),
            dynamic_barriers: HashSet::new(),
            substitute_radius: Self::DEFAULT_SUBSTITUTE_RADIUS,
        }
    }

    /// Set how many rings around a blocked cell are searched for a
    /// substitute. Zero disables substitution.
    pub fn with_substitute_radius(mut self, radius: i32) -> Self {
        self.substitute_radius = radius.max(0);
        self
    }

    /// The grid rectangle covered by this map.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Mark `p` as a static barrier. Returns `false` if it already was one.
    pub fn add_static(&mut self, p: Point) -> bool {
        self.static_barriers.insert(p)
    }

    /// Mark every cell of `rng` as a static barrier.
    pub fn fill_static(&mut self, rng: Range) {
        self.static_barriers.extend(rng.iter());
    }

    /// Remove a static barrier. Returns `false` if there was none.
    pub fn remove_static(&mut self, p: Point) -> bool {
        self.static_barriers.remove(&p)
    }

    /// Mark `p` as a dynamic barrier. Returns `false` if it already was one.
    pub fn add_dynamic(&mut self, p: Point) -> bool {
        self.dynamic_barriers.insert(p)
    }

    /// Remove a dynamic barrier. Returns `false` if there was none.
    pub fn remove_dynamic(&mut self, p: Point) -> bool {
        self.dynamic_barriers.remove(&p)
    }

    /// Forget every dynamic barrier.
    pub fn clear_dynamic(&mut self) {
        self.dynamic_barriers.clear();
    }

    /// Number of static and dynamic barriers.
    pub fn barrier_counts(&self) -> (usize, usize) {
        (self.static_barriers.len(), self.dynamic_barriers.len())
    }

    /// Parse a text map.
    ///
    /// Leading and trailing whitespace of the whole text is trimmed. Every
    /// line must have the same width.
    pub fn from_ascii(s: &str) -> Result<Self, MapParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MapParseError::Empty);
        }
        let mut width: Option<i32> = None;
        let mut height = 0;
        let mut statics = Vec::new();
        let mut dynamics = Vec::new();

        for (y, line) in s.lines().enumerate() {
            let y = y as i32;
            let mut x = 0;
            for ch in line.chars() {
                let p = Point::new(x, y);
                match ch {
                    '#' => statics.push(p),
                    '+' => dynamics.push(p),
                    '.' => {}
                    _ => return Err(MapParseError::InvalidRune { ch, pos: p }),
                }
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(MapParseError::InconsistentWidth {
                        line: y,
                        expected: w,
                        found: x,
                    });
                }
                Some(_) => {}
            }
            height = y + 1;
        }

        let mut grid = Self::new(Range::with_size(width.unwrap_or(0), height));
        grid.static_barriers.extend(statics);
        grid.dynamic_barriers.extend(dynamics);
        Ok(grid)
    }

    /// Render the map back to text, marking `overlay` cells with `*`.
    pub fn to_ascii(&self, overlay: &[Point]) -> String {
        let marked: HashSet<Point> = overlay.iter().copied().collect();
        let mut out = String::with_capacity(self.bounds.len() + self.bounds.height() as usize);
        for y in self.bounds.min.y..self.bounds.max.y {
            if y > self.bounds.min.y {
                out.push('\n');
            }
            for x in self.bounds.min.x..self.bounds.max.x {
                let p = Point::new(x, y);
                out.push(if marked.contains(&p) {
                    '*'
                } else if self.static_barriers.contains(&p) {
                    '#'
                } else if self.dynamic_barriers.contains(&p) {
                    '+'
                } else {
                    '.'
                });
            }
        }
        out
    }
}

impl BarrierMap for BarrierGrid {
    #[inline]
    fn contains_static_barrier(&self, p: Point) -> bool {
        self.static_barriers.contains(&p)
    }

    #[inline]
    fn contains_dynamic_barrier(&self, p: Point) -> bool {
        self.dynamic_barriers.contains(&p)
    }
}

impl NavMap for BarrierGrid {
    /// Scan square rings of growing radius around `p` and return the free
    /// in-grid cell of the first non-empty ring that is closest to `p` by
    /// Manhattan distance (ties: row-major order).
    fn find_substitute_position(&self, p: Point) -> Option<Point> {
        if self.bounds.contains(p) && !self.is_blocked(p) {
            return Some(p);
        }
        for radius in 1..=self.substitute_radius {
            let ring = Range::new(p.x - radius, p.y - radius, p.x + radius + 1, p.y + radius + 1);
            let best = ring
                .iter()
                .filter(|&q| chebyshev(p, q) == radius)
                .filter(|&q| self.bounds.contains(q) && !self.is_blocked(q))
                .min_by_key(|&q| (manhattan(p, q), q));
            if best.is_some() {
                return best;
            }
        }
        None
    }
}

/// Errors that can occur when parsing a text map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapParseError {
    /// The text has no lines.
    Empty,
    /// A line is wider or narrower than the first one.
    InconsistentWidth { line: i32, expected: i32, found: i32 },
    /// A character other than `#`, `+` or `.` was found.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for MapParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map: no lines"),
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(f, "map: line {line} has width {found}, expected {expected}"),
            Self::InvalidRune { ch, pos } => {
                write!(f, "map contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
#####
#...#
#.+.#
#####";

    #[test]
    fn parse_and_query() {
        let map = BarrierGrid::from_ascii(ROOM).unwrap();
        assert_eq!(map.bounds(), Range::with_size(5, 4));
        assert_eq!(map.barrier_counts(), (14, 1));
        assert!(map.contains_static_barrier(Point::new(0, 0)));
        assert!(map.contains_dynamic_barrier(Point::new(2, 2)));
        assert!(!map.contains_static_barrier(Point::new(2, 2)));
        assert!(map.is_blocked(Point::new(2, 2)));
        assert!(!map.is_blocked(Point::new(1, 1)));
    }

    #[test]
    fn ascii_round_trip_with_overlay() {
        let map = BarrierGrid::from_ascii(ROOM).unwrap();
        assert_eq!(map.to_ascii(&[]), ROOM);
        let drawn = map.to_ascii(&[Point::new(1, 1)]);
        assert_eq!(drawn.lines().nth(1), Some("#*..#"));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(BarrierGrid::from_ascii("  \n ").unwrap_err(), MapParseError::Empty);
        assert_eq!(
            BarrierGrid::from_ascii("..\n...").unwrap_err(),
            MapParseError::InconsistentWidth {
                line: 1,
                expected: 2,
                found: 3
            }
        );
        let err = BarrierGrid::from_ascii("..\n.x").unwrap_err();
        assert_eq!(
            err,
            MapParseError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn dynamic_barriers_come_and_go() {
        let mut map = BarrierGrid::new(Range::with_size(4, 4));
        let p = Point::new(1, 2);
        assert!(map.add_dynamic(p));
        assert!(!map.add_dynamic(p));
        assert!(map.is_blocked(p));
        map.clear_dynamic();
        assert!(!map.is_blocked(p));
        assert!(map.add_static(p));
        assert!(map.remove_static(p));
        assert!(!map.remove_dynamic(p));
    }

    #[test]
    fn substitute_prefers_nearest_ring() {
        let mut map = BarrierGrid::new(Range::with_size(10, 10));
        map.fill_static(Range::new(3, 3, 6, 6));
        // (4,4) is the center of a 3x3 block; ring 1 is all blocked.
        assert_eq!(
            map.find_substitute_position(Point::new(4, 4)),
            Some(Point::new(4, 2))
        );
        assert_eq!(
            map.find_substitute_position(Point::new(3, 3)),
            Some(Point::new(3, 2))
        );
    }

    #[test]
    fn substitute_free_cell_is_itself() {
        let map = BarrierGrid::new(Range::with_size(10, 10));
        assert_eq!(
            map.find_substitute_position(Point::new(7, 7)),
            Some(Point::new(7, 7))
        );
    }

    #[test]
    fn substitute_gives_up_beyond_radius() {
        let mut map = BarrierGrid::new(Range::with_size(10, 10)).with_substitute_radius(1);
        map.fill_static(Range::new(2, 2, 7, 7));
        assert_eq!(map.find_substitute_position(Point::new(4, 4)), None);
        let map = map.with_substitute_radius(0);
        assert_eq!(map.find_substitute_position(Point::new(2, 2)), None);
    }
}
