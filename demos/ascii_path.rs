//! Text-map path demo.
//!
//! Reads a map (`#` static barrier, `+` dynamic barrier, `.` free) from the
//! file given as first argument, or scatters barriers over a seeded random
//! map, then routes from the top-left free cell to the bottom-right one and
//! prints the map with the waypoints marked `*`.
//!
//! Run: cargo run -p gridwalk-demos --bin ascii-path [MAP_FILE]

use std::error::Error;

use gridwalk_core::{Point, Range};
use gridwalk_paths::{BarrierGrid, BarrierMap, Pathfinder, PathfinderConfig};
use rand::{RngExt, SeedableRng};

const WIDTH: i32 = 40;
const HEIGHT: i32 = 20;

fn random_map() -> BarrierGrid {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut map = BarrierGrid::new(Range::with_size(WIDTH, HEIGHT));
    for p in map.bounds() {
        match rng.random_range(0..100u32) {
            0..22 => {
                map.add_static(p);
            }
            22..25 => {
                map.add_dynamic(p);
            }
            _ => {}
        }
    }
    map
}

fn main() -> Result<(), Box<dyn Error>> {
    let map = match std::env::args().nth(1) {
        Some(file) => BarrierGrid::from_ascii(&std::fs::read_to_string(file)?)?,
        None => random_map(),
    };
    let bounds = map.bounds();
    let free = |p: &Point| !map.is_blocked(*p);
    let start = bounds.iter().find(free).ok_or("map has no free cell")?;
    let goal = bounds.iter().filter(free).last().ok_or("map has no free cell")?;

    let config = PathfinderConfig::default().with_grid_size(bounds.width(), bounds.height());
    let pf = Pathfinder::with_config(&map, config)?;
    let path = pf.find_cell_path(start, goal);

    let (statics, dynamics) = map.barrier_counts();
    println!("{}", map.to_ascii(&path));
    println!("{statics} static and {dynamics} dynamic barriers");
    if path.is_empty() {
        println!("no path {start} -> {goal}");
    } else {
        println!("{start} -> {goal}: {} waypoints", path.len());
        for p in &path {
            println!("  {p} at {}", pf.config().world_of(*p));
        }
    }
    Ok(())
}
