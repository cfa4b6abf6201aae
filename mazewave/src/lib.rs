//! The `mazewave` command: load a maze file, solve it and print the result.

pub mod options;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;

use mazewave_paths::{SolveError, SolveResult, Wavefront};
use mazewave_text::{LoadError, load_maze, render, render_styled};
use thiserror::Error;

use options::Options;

/// Exit status for a solved maze.
pub const EXIT_SOLVED: u8 = 0;
/// Exit status for bad arguments, unreadable input or an aborted solve.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for a maze whose end cannot be reached.
pub const EXIT_UNSOLVABLE: u8 = 255;

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Run the command with `args` (program name first) and return its exit
/// status. The maze goes to `out`, diagnostics to `err`.
pub fn run<I, T>(args: I, out: &mut impl Write, err: &mut impl Write) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let options = match Options::parse_from(args) {
        Ok(o) => o,
        Err(e) if e.use_stderr() => {
            let _ = write!(err, "{}", e.render());
            return EXIT_FAILURE;
        }
        Err(e) => {
            let _ = write!(out, "{}", e.render());
            return EXIT_SOLVED;
        }
    };
    log::debug!("options: {options:?}");

    match solve_file(&options, out) {
        Ok(SolveResult::Solved) => EXIT_SOLVED,
        Ok(SolveResult::Unsolvable) => EXIT_UNSOLVABLE,
        Err(e) => {
            log::debug!("{e:?}");
            let _ = writeln!(err, "error: {e}");
            EXIT_FAILURE
        }
    }
}

fn solve_file(options: &Options, out: &mut impl Write) -> Result<SolveResult, RunError> {
    writeln!(out, "Reading in: {}", absolute(&options.filename).display())?;
    let mut grid = load_maze(&options.filename)?;

    let mut solver = Wavefront::new(options.solver);
    let result = solver.solve(&mut grid)?;
    log::info!("{result:?}: {:?}", solver.stats());

    let text = if options.color {
        render_styled(&grid)
    } else {
        render(&grid)
    };
    out.write_all(text.as_bytes())?;
    Ok(result)
}

fn absolute(path: &Path) -> std::borrow::Cow<'_, Path> {
    match std::path::absolute(path) {
        Ok(p) => p.into(),
        Err(_) => path.into(),
    }
}
