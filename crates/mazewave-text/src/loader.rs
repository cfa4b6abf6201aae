//! Maze files.
//!
//! The format is line oriented with whitespace-separated integers:
//!
//! ```text
//! <width> <height>
//! <start_x> <start_y>
//! <end_x> <end_y>
//! <height rows of <width> cells: 0 = open, 1 = wall>
//! ```
//!
//! Blank lines are ignored anywhere in the file.

use std::fs;
use std::path::{Path, PathBuf};

use mazewave_core::{CellState, Grid, GridError, Point, Range};
use thiserror::Error;

/// Errors from reading or parsing a maze file. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing {what} line")]
    MissingLine { what: &'static str },
    #[error("line {line}: expected two integers for the {what}, got \u{201c}{text}\u{201d}")]
    BadHeader {
        line: usize,
        what: &'static str,
        text: String,
    },
    #[error("line {line}: \u{201c}{token}\u{201d} is not an integer")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: cell value {value} is neither 0 nor 1")]
    InvalidCell { line: usize, value: i64 },
    #[error("line {line}: expected {expected} cells, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("expected {expected} rows, found {found}")]
    MissingRows { expected: usize, found: usize },
    #[error("line {line}: unexpected data after the last row")]
    TrailingData { line: usize },
    #[error("start or end cell {pos} is a wall")]
    BlockedEndpoint { pos: Point },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Read and parse the maze file at `path`.
pub fn load_maze(path: impl AsRef<Path>) -> Result<Grid, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_maze(&text)
}

/// Parse a maze from its textual description.
pub fn parse_maze(text: &str) -> Result<Grid, LoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let mut header = |what: &'static str| -> Result<Point, LoadError> {
        let (line, text) = lines.next().ok_or(LoadError::MissingLine { what })?;
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let &[x, y] = tokens.as_slice() else {
            return Err(LoadError::BadHeader {
                line,
                what,
                text: text.to_string(),
            });
        };
        Ok(Point::new(number(line, x)?, number(line, y)?))
    };
    let size = header("size")?;
    let start = header("start")?;
    let end = header("end")?;

    // No cells are allocated until every row has been read.
    if size.x <= 0 || size.y <= 0 {
        return Err(GridError::EmptyDimensions {
            width: size.x,
            height: size.y,
        }
        .into());
    }
    let bounds = Range::new(Point::ZERO, size);
    for pos in [start, end] {
        if !bounds.contains(pos) {
            return Err(GridError::OutOfBounds {
                pos,
                width: size.x,
                height: size.y,
            }
            .into());
        }
    }
    let width = size.x as usize;
    let height = size.y as usize;

    let mut walls = Vec::new();
    let mut rows = 0;
    for (line, text) in lines.by_ref().take(height) {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != width {
            return Err(LoadError::RowWidth {
                line,
                expected: width,
                found: tokens.len(),
            });
        }
        for (x, token) in tokens.into_iter().enumerate() {
            let p = Point::new(x as i32, rows as i32);
            match number::<i64>(line, token)? {
                0 => {}
                1 if p == start || p == end => return Err(LoadError::BlockedEndpoint { pos: p }),
                1 => walls.push(p),
                value => return Err(LoadError::InvalidCell { line, value }),
            }
        }
        rows += 1;
    }
    if rows < height {
        return Err(LoadError::MissingRows {
            expected: height,
            found: rows,
        });
    }
    if let Some((line, _)) = lines.next() {
        return Err(LoadError::TrailingData { line });
    }

    let mut grid = Grid::new(size.x, size.y, start, end)?;
    for p in walls {
        grid.set(p, CellState::Wall)?;
    }

    log::debug!(
        "loaded {}x{} maze, {} walls",
        grid.width(),
        grid.height(),
        grid.count(CellState::Wall)
    );
    Ok(grid)
}

fn number<T: std::str::FromStr>(line: usize, token: &str) -> Result<T, LoadError> {
    token.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
5 3
1 1
3 1
1 1 1 1 1
1 0 0 0 1
1 1 1 1 1
";

    #[test]
    fn parse_corridor() {
        let g = parse_maze(CORRIDOR).unwrap();
        assert_eq!(g.size(), Point::new(5, 3));
        assert_eq!(g.start(), Point::new(1, 1));
        assert_eq!(g.end(), Point::new(3, 1));
        assert_eq!(g.get(Point::new(1, 1)), Ok(CellState::Start));
        assert_eq!(g.get(Point::new(2, 1)), Ok(CellState::Empty));
        assert_eq!(g.get(Point::new(3, 1)), Ok(CellState::End));
        assert_eq!(g.count(CellState::Wall), 12);
    }

    #[test]
    fn blank_lines_and_padding_are_ignored() {
        let text = "\n 3 1 \n\n0 0\n2 0\n\n0   0 0  \n\n";
        let g = parse_maze(text).unwrap();
        assert_eq!(g.size(), Point::new(3, 1));
        assert_eq!(g.count(CellState::Empty), 1);
    }

    #[test]
    fn missing_header_line() {
        let err = parse_maze("3 3\n0 0\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingLine { what: "end" }));
    }

    #[test]
    fn header_needs_two_fields() {
        let err = parse_maze("3 3 3\n0 0\n1 1\n").unwrap_err();
        assert!(matches!(err, LoadError::BadHeader { line: 1, what: "size", .. }));
    }

    #[test]
    fn header_must_be_numeric() {
        let err = parse_maze("3 x\n0 0\n1 1\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { line: 1, ref token } if token == "x"));
    }

    #[test]
    fn row_with_wrong_width() {
        let err = parse_maze("3 2\n0 0\n2 1\n0 0 0\n0 0\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::RowWidth {
                line: 5,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn too_few_rows() {
        let err = parse_maze("2 3\n0 0\n1 1\n0 0\n0 0\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingRows { expected: 3, found: 2 }));
    }

    #[test]
    fn extra_rows_are_rejected() {
        let err = parse_maze("2 1\n0 0\n1 0\n0 0\n0 0\n").unwrap_err();
        assert!(matches!(err, LoadError::TrailingData { line: 5 }));
    }

    #[test]
    fn cells_must_be_binary() {
        let err = parse_maze("2 1\n0 0\n1 0\n0 2\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidCell { line: 4, value: 2 }));
    }

    #[test]
    fn wall_on_endpoint_is_rejected() {
        let err = parse_maze("2 1\n0 0\n1 0\n1 0\n").unwrap_err();
        assert!(matches!(err, LoadError::BlockedEndpoint { pos } if pos == Point::new(0, 0)));
    }

    #[test]
    fn endpoint_outside_grid() {
        let err = parse_maze("2 2\n0 0\n2 1\n0 0\n0 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Grid(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn zero_size_grid() {
        let err = parse_maze("0 2\n0 0\n0 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Grid(GridError::EmptyDimensions { .. })));
    }

    #[test]
    fn huge_header_without_rows() {
        let err = parse_maze("2000000000 2000000000\n0 0\n1 1\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingRows {
                expected: 2_000_000_000,
                found: 0
            }
        ));
    }

    #[test]
    fn huge_header_with_short_row() {
        let err = parse_maze("2000000000 3\n0 0\n1 1\n0 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::RowWidth {
                line: 4,
                expected: 2_000_000_000,
                found: 3
            }
        ));
    }

    #[test]
    fn load_missing_file() {
        let err = load_maze("/nonexistent/mazewave/maze.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read /nonexistent/mazewave/maze.txt"));
    }
}
