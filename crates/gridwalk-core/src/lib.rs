//! **gridwalk-core**: geometry primitives shared by the gridwalk crates.
//!
//! Grid cells are addressed by integer [`Point`]s inside a half-open
//! [`Range`]; agents live in continuous [`WorldPos`] space.

pub mod geom;

pub use geom::{Point, Range, RangeIter, WorldPos};
