//! Grid pathfinding for real-time game movement.
//!
//! A query goes through these stages:
//!
//! - world positions are snapped to grid cells ([`PathfinderConfig::cell_of`]);
//! - a line-of-sight test ([`has_barrier`]) short-circuits unobstructed routes;
//! - otherwise a **bidirectional best-first search** ([`bidirectional_search`])
//!   grows one frontier from each endpoint until they meet;
//! - the raw cell chain is simplified ([`smooth_path`]) into a few waypoints.
//!
//! Barrier lookups go through the [`BarrierMap`] and [`NavMap`] traits so the
//! engine never owns map storage. [`BarrierGrid`] is a ready-made in-memory
//! implementation.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`BarrierMap`] | visibility, search, smoothing |
//! | [`NavMap`] : [`BarrierMap`] | [`Pathfinder::find_path`] |

mod barriers;
mod config;
mod distance;
mod heap;
mod line;
mod neighbors;
mod pathfinder;
pub mod search;
pub mod smooth;
mod traits;
mod visibility;

pub use barriers::{BarrierGrid, MapParseError};
pub use config::{ConfigError, NeighborBounds, PathfinderConfig};
pub use distance::{chebyshev, manhattan};
pub use heap::PriorityQueue;
pub use line::{Line, cell_center, cells_touching};
pub use neighbors::Neighbors;
pub use pathfinder::Pathfinder;
pub use search::{Meeting, RawPath, bidirectional_search};
pub use smooth::{post_process, reconstruct, smooth_path};
pub use traits::{BarrierMap, NavMap};
pub use visibility::{has_barrier, has_line_of_sight};
