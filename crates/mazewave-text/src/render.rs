//! Plain and coloured text rendering of a [`Grid`].

use std::fmt::Write;

use crossterm::style::{Attribute, Color, StyledContent, Stylize};
use mazewave_core::{CellState, Grid};

/// The character used for a cell state.
pub const fn glyph(state: CellState) -> char {
    match state {
        CellState::Empty => ' ',
        CellState::Wall => '#',
        CellState::Start => 'S',
        CellState::End => 'E',
        CellState::Path => 'X',
        CellState::DeadEnd => '.',
        CellState::WaveCrest => '~',
    }
}

fn styled(state: CellState) -> StyledContent<char> {
    let ch = glyph(state);
    match state {
        CellState::Empty => ch.stylize(),
        CellState::Wall => ch.with(Color::DarkGrey).attribute(Attribute::Dim),
        CellState::Start | CellState::End => ch.with(Color::Yellow).attribute(Attribute::Bold),
        CellState::Path => ch.with(Color::Cyan),
        CellState::DeadEnd | CellState::WaveCrest => ch.with(Color::Magenta),
    }
}

/// One line per row, each terminated by `\n`.
pub fn render(grid: &Grid) -> String {
    let width = grid.width() as usize;
    let mut out = String::with_capacity((width + 1) * grid.height() as usize);
    for row in grid.rows() {
        out.extend(row.iter().map(|&c| glyph(c)));
        out.push('\n');
    }
    out
}

/// Like [`render`], with ANSI colours for terminals.
///
/// Colours are left out when `NO_COLOR` is set; attributes are kept.
pub fn render_styled(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        for &c in row {
            // Writing into a String cannot fail.
            let _ = write!(out, "{}", styled(c));
        }
        out.push('\n');
    }
    out
}
