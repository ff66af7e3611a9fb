use gridwalk_core::{Point, WorldPos};

use crate::config::{ConfigError, PathfinderConfig};
use crate::search::bidirectional_search;
use crate::smooth::post_process;
use crate::traits::NavMap;
use crate::visibility::has_barrier;

/// Top-level path query service bound to one map.
///
/// Every query allocates its own search state, so a `Pathfinder` over a
/// `Sync` map can serve queries from several threads, provided the map is
/// not written meanwhile.
#[derive(Debug, Clone)]
pub struct Pathfinder<M> {
    map: M,
    config: PathfinderConfig,
}

impl<M: NavMap> Pathfinder<M> {
    /// Bind a pathfinder to `map` with the default configuration.
    pub fn new(map: M) -> Self {
        Self {
            map,
            config: PathfinderConfig::default(),
        }
    }

    /// Bind a pathfinder to `map` after validating `config`.
    pub fn with_config(map: M, config: PathfinderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { map, config })
    }

    /// Settings this pathfinder was built with.
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// The barrier map consulted by every query.
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Give the map back, e.g. to update its dynamic barriers.
    pub fn into_map(self) -> M {
        self.map
    }

    /// Waypoints, in world coordinates, leading from `start` to `end`.
    ///
    /// The agent's own cell is not included; the last waypoint is the
    /// destination cell, or its substitute if the destination is blocked.
    /// An empty result means the agent cannot currently move there, or is
    /// already there.
    pub fn find_path(&self, start: WorldPos, end: WorldPos) -> Vec<WorldPos> {
        let (Some(start_cell), Some(end_cell)) = (self.config.cell_of(start), self.config.cell_of(end)) else {
            log::debug!("path {start} -> {end}: endpoint outside the grid");
            return Vec::new();
        };
        self.find_cell_path(start_cell, end_cell)
            .into_iter()
            .map(|p| self.config.world_of(p))
            .collect()
    }

    /// Cell-level version of [`find_path`](Self::find_path).
    pub fn find_cell_path(&self, start: Point, destination: Point) -> Vec<Point> {
        let mut destination = destination;
        if self.map.is_blocked(destination) {
            match self.map.find_substitute_position(destination) {
                Some(sub) => {
                    log::debug!("destination {destination} blocked, substituting {sub}");
                    destination = sub;
                }
                None => {
                    log::debug!("destination {destination} blocked and no substitute found");
                    return Vec::new();
                }
            }
        }
        if start == destination {
            return Vec::new();
        }

        if !has_barrier(&self.map, start, destination) {
            log::debug!("direct line of sight {start} -> {destination}");
            return vec![destination];
        }

        match bidirectional_search(
            &self.map,
            self.config.bounds(),
            self.config.neighbor_bounds,
            start,
            destination,
        ) {
            Some(raw) => post_process(&self.map, &raw.cells),
            None => Vec::new(),
        }
    }
}
