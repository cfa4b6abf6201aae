//! Wavefront maze solving on a [`mazewave_core::Grid`].
//!
//! [`Wavefront`] floods the maze from the start cell with a set of fronts
//! that advance one cell per iteration:
//!
//! - a front with several open neighbours **splits** into one child each;
//! - a front with none is a **dead end**, and its trail is erased by
//!   [`Backtrack`];
//! - fronts landing on the same cell **collide**, and the cell is sealed
//!   as a wall.
//!
//! The solve reports [`SolveResult::Solved`] if any front reached the end
//! cell, and leaves the surviving trails marked as `Path`.
//!
//! | Type | Role |
//! |---|---|
//! | [`Wavefront`] | solver, owns reusable scratch buffers |
//! | [`Front`] / [`FrontState`] | one search branch and its lifecycle |
//! | [`Backtrack`] | worklist-driven dead-end pruning |
//! | [`Neighbors`] | fixed-order cardinal neighbour filter |

mod backtrack;
mod front;
mod neighbors;
mod wavefront;

pub use backtrack::{Backtrack, BacktrackReport};
pub use front::{Front, FrontState};
pub use neighbors::Neighbors;
pub use wavefront::{SolveError, SolveResult, SolveStats, SolverConfig, Wavefront};
