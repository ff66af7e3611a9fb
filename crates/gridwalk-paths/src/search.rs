//! Bidirectional best-first search over a 4-connected grid.
//!
//! One search grows from the start toward the destination and another from
//! the destination toward the start. Each is an A*-style expansion with a
//! Manhattan heuristic aimed at the opposite endpoint. The two take turns,
//! one expansion each, and stop as soon as one reaches a cell the other has
//! already discovered.

use std::collections::HashMap;

use gridwalk_core::{Point, Range};

use crate::config::NeighborBounds;
use crate::distance::manhattan;
use crate::heap::PriorityQueue;
use crate::neighbors::Neighbors;
use crate::smooth::reconstruct;
use crate::traits::BarrierMap;

/// Where the two searches joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meeting {
    /// Last cell reached from the start side.
    pub before: Point,
    /// First cell reached from the destination side.
    pub after: Point,
    /// Steps from the start to `before`.
    pub cost_begin: u32,
    /// Steps from `after` to the destination.
    pub cost_end: u32,
}

impl Meeting {
    /// Total steps of the joined route.
    #[inline]
    pub fn total_cost(&self) -> u32 {
        self.cost_begin + 1 + self.cost_end
    }
}

/// Unsmoothed result of [`bidirectional_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPath {
    /// Every cell from the start to the destination, both included, each a
    /// cardinal step from the previous one.
    pub cells: Vec<Point>,
    /// Join point, or `None` when start and destination coincide.
    pub meeting: Option<Meeting>,
    /// Number of cells expanded by both searches together.
    pub expanded: usize,
}

/// Frontier entry: lowest `priority` is expanded first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    priority: u32,
    cell: Point,
}

/// Per-direction search state.
struct Side {
    target: Point,
    frontier: PriorityQueue<FrontierEntry>,
    came_from: HashMap<Point, Point>,
    cost_so_far: HashMap<Point, u32>,
}

enum Step {
    Exhausted,
    Expanded,
    Met { current: Point, next: Point },
}

impl Side {
    /// The origin is its own predecessor, which ends the walk back.
    fn new(origin: Point, target: Point) -> Self {
        let mut frontier = PriorityQueue::new_min();
        frontier.insert(FrontierEntry {
            priority: manhattan(origin, target).unsigned_abs(),
            cell: origin,
        });
        Self {
            target,
            frontier,
            came_from: HashMap::from([(origin, origin)]),
            cost_so_far: HashMap::from([(origin, 0)]),
        }
    }

    #[inline]
    fn visited(&self, p: Point) -> bool {
        self.came_from.contains_key(&p)
    }

    fn step<M: BarrierMap + ?Sized>(
        &mut self,
        map: &M,
        other: &Side,
        nb: &mut Neighbors,
        bounds: Range,
        guard: NeighborBounds,
    ) -> Step {
        let Some(FrontierEntry { cell: current, .. }) = self.frontier.pop() else {
            return Step::Exhausted;
        };
        let current_cost = self.cost_so_far[&current];

        for &next in nb.cardinal(current, bounds, guard, |n| !map.is_blocked(n)) {
            if self.visited(next) {
                continue;
            }
            if other.visited(next) {
                return Step::Met { current, next };
            }
            let new_cost = current_cost + 1;
            if self.cost_so_far.get(&next).is_some_and(|&c| new_cost >= c) {
                continue;
            }
            self.cost_so_far.insert(next, new_cost);
            self.came_from.insert(next, current);
            self.frontier.insert(FrontierEntry {
                priority: new_cost + manhattan(next, self.target).unsigned_abs(),
                cell: next,
            });
        }
        Step::Expanded
    }
}

/// Find a route from `start` to `destination` inside `bounds`, avoiding
/// every cell `map` reports as blocked.
///
/// Returns `None` when either search runs out of cells before they meet.
/// The start cell itself is never tested for barriers.
pub fn bidirectional_search<M: BarrierMap + ?Sized>(
    map: &M,
    bounds: Range,
    guard: NeighborBounds,
    start: Point,
    destination: Point,
) -> Option<RawPath> {
    if start == destination {
        return Some(RawPath {
            cells: vec![start],
            meeting: None,
            expanded: 0,
        });
    }

    let mut begin = Side::new(start, destination);
    let mut end = Side::new(destination, start);
    let mut nb = Neighbors::new();
    let mut expanded = 0;

    while !begin.frontier.is_empty() && !end.frontier.is_empty() {
        expanded += 1;
        if let Step::Met { current, next } = begin.step(map, &end, &mut nb, bounds, guard) {
            return Some(joined(&begin, &end, current, next, expanded));
        }

        expanded += 1;
        match end.step(map, &begin, &mut nb, bounds, guard) {
            Step::Met { current, next } => {
                return Some(joined(&begin, &end, next, current, expanded));
            }
            Step::Exhausted => break,
            Step::Expanded => {}
        }
    }

    log::debug!("bidirectional search exhausted after {expanded} expansions: no path {start} -> {destination}");
    None
}

fn joined(begin: &Side, end: &Side, before: Point, after: Point, expanded: usize) -> RawPath {
    let meeting = Meeting {
        before,
        after,
        cost_begin: begin.cost_so_far[&before],
        cost_end: end.cost_so_far[&after],
    };
    log::debug!(
        "bidirectional search met at {before} | {after} after {expanded} expansions (cost {})",
        meeting.total_cost()
    );
    RawPath {
        cells: reconstruct(before, after, &begin.came_from, &end.came_from),
        meeting: Some(meeting),
        expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BarrierGrid;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use std::collections::{HashSet, VecDeque};

    fn grid(size: i32) -> BarrierGrid {
        BarrierGrid::new(Range::with_size(size, size))
    }

    fn assert_chain(map: &BarrierGrid, raw: &RawPath, start: Point, destination: Point) {
        assert_eq!(raw.cells.first(), Some(&start));
        assert_eq!(raw.cells.last(), Some(&destination));
        for w in raw.cells.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1, "{} -> {}", w[0], w[1]);
        }
        for &c in &raw.cells[1..] {
            assert!(!map.is_blocked(c), "path crosses barrier at {c}");
        }
        let unique: HashSet<_> = raw.cells.iter().collect();
        assert_eq!(unique.len(), raw.cells.len(), "path revisits a cell");
        if let Some(m) = raw.meeting {
            assert_eq!(raw.cells.len() as u32 - 1, m.total_cost());
        }
    }

    /// Flood fill from `start`; the start cell is always entered.
    fn reachable(map: &BarrierGrid, start: Point, destination: Point) -> bool {
        let mut nb = Neighbors::new();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            if p == destination {
                return true;
            }
            for &n in nb.cardinal(p, map.bounds(), NeighborBounds::Strict, |n| !map.is_blocked(n)) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        false
    }

    #[test]
    fn same_cell_is_trivial() {
        let map = grid(10);
        let p = Point::new(4, 4);
        let raw = bidirectional_search(&map, map.bounds(), NeighborBounds::Strict, p, p).unwrap();
        assert_eq!(raw.cells, vec![p]);
        assert_eq!(raw.meeting, None);
    }

    #[test]
    fn adjacent_cells_meet_immediately() {
        let map = grid(10);
        let (a, b) = (Point::new(2, 2), Point::new(3, 2));
        let raw = bidirectional_search(&map, map.bounds(), NeighborBounds::Strict, a, b).unwrap();
        assert_eq!(raw.cells, vec![a, b]);
        let m = raw.meeting.unwrap();
        assert_eq!((m.before, m.after, m.cost_begin, m.cost_end), (a, b, 0, 0));
        assert_eq!(raw.expanded, 1);
    }

    #[test]
    fn open_grid_is_shortest() {
        let map = grid(20);
        let (a, b) = (Point::new(1, 2), Point::new(15, 11));
        let raw = bidirectional_search(&map, map.bounds(), NeighborBounds::Strict, a, b).unwrap();
        assert_chain(&map, &raw, a, b);
        assert_eq!(raw.cells.len() as i32 - 1, manhattan(a, b));
    }

    #[test]
    fn wall_with_gap_routes_through_gap() {
        let mut map = grid(20);
        map.fill_static(Range::new(10, 0, 11, 20));
        map.remove_static(Point::new(10, 17));
        let (a, b) = (Point::new(2, 3), Point::new(18, 3));
        let raw = bidirectional_search(&map, map.bounds(), NeighborBounds::Strict, a, b).unwrap();
        assert_chain(&map, &raw, a, b);
        assert!(raw.cells.contains(&Point::new(10, 17)));
    }

    #[test]
    fn enclosed_destination_has_no_path() {
        let mut map = grid(12);
        map.fill_static(Range::new(5, 5, 8, 8));
        map.remove_static(Point::new(6, 6));
        let res = bidirectional_search(
            &map,
            map.bounds(),
            NeighborBounds::Strict,
            Point::new(0, 0),
            Point::new(6, 6),
        );
        assert_eq!(res, None);
    }

    #[test]
    fn origins_are_their_own_predecessor() {
        let side = Side::new(Point::new(3, 4), Point::new(9, 9));
        assert_eq!(side.came_from[&Point::new(3, 4)], Point::new(3, 4));
        assert_eq!(side.cost_so_far[&Point::new(3, 4)], 0);
        assert_eq!(side.frontier.peek().map(|e| e.priority), Some(11));
    }

    #[test]
    fn guards_agree_inside_grid() {
        let mut map = grid(16);
        map.fill_static(Range::new(4, 2, 5, 14));
        map.fill_static(Range::new(9, 3, 10, 16));
        let (a, b) = (Point::new(0, 8), Point::new(15, 8));
        let strict = bidirectional_search(&map, map.bounds(), NeighborBounds::Strict, a, b);
        let legacy = bidirectional_search(&map, map.bounds(), NeighborBounds::Legacy, a, b);
        assert!(strict.is_some());
        assert_eq!(strict, legacy);
    }

    #[test]
    fn random_maps_find_route_iff_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..60 {
            let mut map = grid(24);
            for p in map.bounds() {
                if rng.random_range(0..100u32) < 30 {
                    map.add_static(p);
                }
            }
            let pick = |rng: &mut StdRng| Point::new(rng.random_range(0..24), rng.random_range(0..24));
            let a = pick(&mut rng);
            let b = pick(&mut rng);
            map.remove_static(a);
            map.remove_static(b);

            let res = bidirectional_search(&map, map.bounds(), NeighborBounds::Strict, a, b);
            assert_eq!(res.is_some(), reachable(&map, a, b), "{a} -> {b}");
            if let Some(raw) = res {
                assert_chain(&map, &raw, a, b);
            }
        }
    }
}
