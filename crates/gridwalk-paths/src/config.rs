//! Pathfinder configuration and world ↔ grid conversion.

use std::fmt;

use gridwalk_core::{Point, Range, WorldPos};

/// Which cells the search is allowed to expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborBounds {
    /// Only cells inside the grid are expanded.
    #[default]
    Strict,
    /// A cell is refused only when both coordinates are below the grid or
    /// both are beyond it. A cell out of range on one axis alone is still
    /// expanded. Kept for behavioral compatibility with older maps.
    Legacy,
}

impl NeighborBounds {
    /// Whether a cell at `p` may be expanded on a grid covering `bounds`.
    #[inline]
    pub fn allows(self, p: Point, bounds: Range) -> bool {
        match self {
            NeighborBounds::Strict => bounds.contains(p),
            NeighborBounds::Legacy => !both_axes_outside(p, bounds),
        }
    }
}

/// Both coordinates below the grid, or both beyond it.
#[inline]
fn both_axes_outside(p: Point, bounds: Range) -> bool {
    (p.x < bounds.min.x && p.y < bounds.min.y) || (p.x >= bounds.max.x && p.y >= bounds.max.y)
}

/// Default world units per grid cell.
pub const DEFAULT_CELL_SIZE: f32 = 32.0;

/// Default grid width and height, in cells.
pub const DEFAULT_GRID_SIZE: i32 = 100;

/// Settings for a [`Pathfinder`](crate::Pathfinder).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    /// World units per grid cell.
    pub cell_size: f32,
    /// Grid width in cells.
    pub grid_width: i32,
    /// Grid height in cells.
    pub grid_height: i32,
    /// Expansion guard used by the search.
    pub neighbor_bounds: NeighborBounds,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            neighbor_bounds: NeighborBounds::default(),
        }
    }
}

impl PathfinderConfig {
    /// Set the world units per grid cell.
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the grid width and height, in cells.
    pub fn with_grid_size(mut self, width: i32, height: i32) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Set the expansion guard used by the search.
    pub fn with_neighbor_bounds(mut self, guard: NeighborBounds) -> Self {
        self.neighbor_bounds = guard;
        self
    }

    /// Check that the settings describe a usable grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        Ok(())
    }

    /// The grid as a range of cells.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.grid_width, self.grid_height)
    }

    /// Grid cell for a world position.
    ///
    /// Coordinates are divided by the cell size and rounded half-to-even.
    /// Returns `None` when the cell lies below the grid on both axes or
    /// beyond it on both axes; otherwise the cell is clamped into the grid.
    pub fn cell_of(&self, pos: WorldPos) -> Option<Point> {
        let raw = Point::new(
            (pos.x / self.cell_size).round_ties_even() as i32,
            (pos.y / self.cell_size).round_ties_even() as i32,
        );
        let bounds = self.bounds();
        if both_axes_outside(raw, bounds) {
            return None;
        }
        Some(bounds.clamp(raw))
    }

    /// World position of a cell's origin corner.
    #[inline]
    pub fn world_of(&self, p: Point) -> WorldPos {
        WorldPos::new(p.x as f32 * self.cell_size, p.y as f32 * self.cell_size)
    }
}

/// Errors reported by [`PathfinderConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Cell size is zero, negative or not finite.
    InvalidCellSize(f32),
    /// Grid has no cells.
    EmptyGrid { width: i32, height: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize(size) => {
                write!(f, "pathfinder: cell size must be positive, got {size}")
            }
            Self::EmptyGrid { width, height } => {
                write!(f, "pathfinder: grid {width}x{height} has no cells")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
