//! **mazewave-core**: the maze grid model.
//!
//! This crate provides the types shared across the *mazewave* workspace:
//! geometry primitives, the [`CellState`] classification and the owned,
//! bounds-checked [`Grid`].

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::CellState;
pub use geom::{Direction, Point, Range};
pub use grid::{Grid, GridError, Neighborhood};
