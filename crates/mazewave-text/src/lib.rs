//! Text input and output for mazewave grids.
//!
//! [`load_maze`] and [`parse_maze`] read the whitespace-separated integer
//! maze format; [`render`] and [`render_styled`] turn a grid back into text.

mod loader;
mod render;

pub use loader::{LoadError, load_maze, parse_maze};
pub use render::{glyph, render, render_styled};
