//! **skirmish-core**: grid geometry and terrain passability for unit movement.
//!
//! This crate provides the foundational types shared by the *skirmish*
//! crates: integer grid coordinates, world-space vectors and the boolean
//! passability map that pathfinding searches over.

pub mod error;
pub mod geom;
pub mod grid;
pub mod vector;

pub use error::GridError;
pub use geom::{Point, Range, RangeIter};
pub use grid::PassGrid;
pub use vector::Vec3;
