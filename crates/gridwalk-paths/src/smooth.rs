//! Path reconstruction and simplification.
//!
//! A raw search chain moves one cardinal step at a time. [`smooth_path`]
//! reduces it to the few waypoints an agent actually needs to steer through:
//!
//! 1. an L-shaped corner whose ends are diagonal neighbors is cut;
//! 2. points in the middle of a straight run are dropped;
//! 3. from the end backward, each waypoint is joined to the earliest one it
//!    can see, and the points in between are dropped.
//!
//! A shortcut can leave a new straight run or corner behind, so the passes
//! are repeated until the path stops shrinking.

use std::collections::HashMap;

use gridwalk_core::Point;

use crate::traits::BarrierMap;
use crate::visibility::has_barrier;

/// Join the two halves of a bidirectional search.
///
/// Walks `came_from_begin` back from `before` and `came_from_end` forward
/// from `after`, each until reaching the cell that is its own predecessor.
/// Returns the whole chain, start and destination included.
pub fn reconstruct(
    before: Point,
    after: Point,
    came_from_begin: &HashMap<Point, Point>,
    came_from_end: &HashMap<Point, Point>,
) -> Vec<Point> {
    let mut path = walk_back(before, came_from_begin);
    path.reverse();
    path.extend(walk_back(after, came_from_end));
    path
}

fn walk_back(from: Point, came_from: &HashMap<Point, Point>) -> Vec<Point> {
    let mut chain = vec![from];
    let mut cur = from;
    while let Some(&prev) = came_from.get(&cur) {
        if prev == cur {
            break;
        }
        chain.push(prev);
        cur = prev;
    }
    chain
}

/// Turn a full raw chain into steering waypoints.
///
/// The first cell is the agent's own position and is dropped before
/// smoothing.
pub fn post_process<M: BarrierMap + ?Sized>(map: &M, raw: &[Point]) -> Vec<Point> {
    let mut path: Vec<Point> = raw.iter().skip(1).copied().collect();
    smooth_path(map, &mut path);
    path
}

/// Simplify `path` in place. See the [module docs](self).
///
/// The three passes repeat until a round removes nothing, so smoothing an
/// already smoothed path leaves it unchanged.
pub fn smooth_path<M: BarrierMap + ?Sized>(map: &M, path: &mut Vec<Point>) {
    let raw_len = path.len();
    let mut rounds = 0;
    loop {
        let before = path.len();
        collapse_diagonals(path);
        merge_collinear(path);
        shortcut(map, path);
        rounds += 1;
        if path.len() == before {
            break;
        }
    }
    log::trace!("smoothed path {raw_len} -> {} points in {rounds} rounds", path.len());
}

/// Drop the middle of every window of three whose ends are diagonal
/// neighbors. The scan advances after a removal as well.
fn collapse_diagonals(path: &mut Vec<Point>) {
    let mut i = 0;
    while i + 2 < path.len() {
        if (path[i + 2] - path[i]).abs() == Point::new(1, 1) {
            path.remove(i + 1);
        }
        i += 1;
    }
}

/// Scanning from the tail, drop a point whose incoming and outgoing
/// segments have the same direction vector.
fn merge_collinear(path: &mut Vec<Point>) {
    let len = path.len();
    if len <= 2 {
        return;
    }
    let mut dir = path[len - 1] - path[len - 2];
    for i in (0..len - 2).rev() {
        let seg = path[i + 1] - path[i];
        if seg == dir {
            path.remove(i + 1);
        } else {
            dir = seg;
        }
    }
}

/// Scanning from the tail, join each point to the earliest point in line of
/// sight and drop everything between them. The scan resumes at that point.
fn shortcut<M: BarrierMap + ?Sized>(map: &M, path: &mut Vec<Point>) {
    let mut i = path.len().saturating_sub(1);
    while i >= 2 {
        let target = path[i];
        match (0..=i - 2).find(|&j| !has_barrier(map, target, path[j])) {
            Some(j) => {
                path.drain(j + 1..i);
                i = j;
            }
            None => i -= 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BarrierGrid;
    use crate::config::NeighborBounds;
    use crate::search::bidirectional_search;
    use gridwalk_core::Range;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn reconstruct_joins_both_halves() {
        let begin = HashMap::from([
            (Point::new(0, 0), Point::new(0, 0)),
            (Point::new(1, 0), Point::new(0, 0)),
            (Point::new(2, 0), Point::new(1, 0)),
        ]);
        let end = HashMap::from([
            (Point::new(4, 0), Point::new(4, 0)),
            (Point::new(3, 0), Point::new(4, 0)),
        ]);
        let path = reconstruct(Point::new(2, 0), Point::new(3, 0), &begin, &end);
        assert_eq!(path, pts(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]));
    }

    #[test]
    fn reconstruct_at_origins() {
        let begin = HashMap::from([(Point::new(0, 0), Point::new(0, 0))]);
        let end = HashMap::from([(Point::new(0, 1), Point::new(0, 1))]);
        let path = reconstruct(Point::new(0, 0), Point::new(0, 1), &begin, &end);
        assert_eq!(path, pts(&[(0, 0), (0, 1)]));
    }

    #[test]
    fn diagonal_corners_collapse() {
        let mut path = pts(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)]);
        collapse_diagonals(&mut path);
        assert_eq!(path, pts(&[(0, 0), (1, 1), (2, 2)]));
    }

    #[test]
    fn straight_runs_merge() {
        let mut path = pts(&[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (3, 2)]);
        merge_collinear(&mut path);
        assert_eq!(path, pts(&[(0, 0), (3, 0), (3, 2)]));

        let mut short = pts(&[(0, 0), (1, 0)]);
        merge_collinear(&mut short);
        assert_eq!(short, pts(&[(0, 0), (1, 0)]));
    }

    #[test]
    fn shortcut_skips_visible_points() {
        let map = BarrierGrid::new(Range::with_size(10, 10));
        let mut path = pts(&[(0, 0), (4, 0), (4, 4), (8, 4)]);
        shortcut(&map, &mut path);
        assert_eq!(path, pts(&[(0, 0), (8, 4)]));
    }

    #[test]
    fn shortcut_keeps_corner_around_barrier() {
        let mut map = BarrierGrid::new(Range::with_size(10, 10));
        map.fill_static(Range::new(1, 1, 4, 4));
        let mut path = pts(&[(0, 0), (4, 0), (4, 4)]);
        shortcut(&map, &mut path);
        assert_eq!(path, pts(&[(0, 0), (4, 0), (4, 4)]));
    }

    #[test]
    fn short_paths_untouched() {
        let map = BarrierGrid::new(Range::with_size(4, 4));
        let mut empty: Vec<Point> = Vec::new();
        smooth_path(&map, &mut empty);
        assert!(empty.is_empty());
        let mut one = pts(&[(2, 2)]);
        smooth_path(&map, &mut one);
        assert_eq!(one, pts(&[(2, 2)]));
        assert!(post_process(&map, &pts(&[(1, 1)])).is_empty());
    }

    #[test]
    fn detour_around_block_smooths_and_is_idempotent() {
        let mut map = BarrierGrid::new(Range::with_size(10, 10));
        map.fill_static(Range::new(3, 0, 6, 4));
        let raw = pts(&[
            (1, 1),
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 4),
            (3, 4),
            (4, 4),
            (5, 4),
            (6, 4),
            (7, 4),
            (7, 3),
            (7, 2),
            (7, 1),
        ]);

        let once = post_process(&map, &raw);
        assert_eq!(once, pts(&[(1, 2), (2, 4), (6, 4), (7, 1)]));
        for w in once.windows(2) {
            assert!(!has_barrier(&map, w[0], w[1]), "{} -> {}", w[0], w[1]);
        }

        let mut twice = once.clone();
        smooth_path(&map, &mut twice);
        assert_eq!(twice, once);
    }

    #[test]
    fn searched_route_loses_waypoints() {
        let mut map = BarrierGrid::new(Range::with_size(20, 20));
        map.fill_static(Range::new(10, 0, 11, 20));
        map.remove_static(Point::new(10, 17));
        let (a, b) = (Point::new(2, 3), Point::new(18, 3));
        let raw = bidirectional_search(&map, map.bounds(), NeighborBounds::Strict, a, b).unwrap();

        let smoothed = post_process(&map, &raw.cells);
        assert!(!smoothed.is_empty());
        assert!(smoothed.len() < raw.cells.len() - 1);
        assert_eq!(smoothed.last(), Some(&b));
        assert!(!smoothed.contains(&a));
    }

    #[test]
    fn three_aligned_waypoints_merge() {
        // Equal steps of (3,-3) make one segment.
        let map = BarrierGrid::new(Range::with_size(30, 30));
        let mut path = pts(&[(12, 16), (15, 13), (18, 10)]);
        smooth_path(&map, &mut path);
        assert_eq!(path, pts(&[(12, 16), (18, 10)]));
    }

    #[test]
    fn smoothing_searched_routes_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut checked = 0;
        for _ in 0..300 {
            let mut map = BarrierGrid::new(Range::with_size(30, 30));
            for p in map.bounds() {
                if rng.random_range(0..100u32) < 25 {
                    map.add_static(p);
                }
            }
            let a = Point::new(rng.random_range(0..30), rng.random_range(0..30));
            let b = Point::new(rng.random_range(0..30), rng.random_range(0..30));
            map.remove_static(a);
            map.remove_static(b);
            let Some(raw) = bidirectional_search(&map, map.bounds(), NeighborBounds::Strict, a, b) else {
                continue;
            };

            let once = post_process(&map, &raw.cells);
            let mut twice = once.clone();
            smooth_path(&map, &mut twice);
            assert_eq!(twice, once, "{a} -> {b}");
            checked += 1;
        }
        assert!(checked > 0);
    }
}
