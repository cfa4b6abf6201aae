//! The [`Grid`] type: an owned 2D array of [`CellState`]s with fixed start
//! and end cells.
//!
//! Cloning a `Grid` yields an independent copy and every write goes through
//! `&mut self`. All coordinate access is bounds-checked and reports
//! [`GridError::OutOfBounds`] instead of clamping or wrapping.

use thiserror::Error;

use crate::cell::CellState;
use crate::geom::{Direction, Point, Range};

/// Errors raised by grid construction and cell access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate lies outside `[0, width) × [0, height)`.
    #[error("cell {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Point, width: i32, height: i32 },
    /// Width or height is not positive.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: i32, height: i32 },
    /// Attempt to overwrite the start or end cell.
    #[error("cell {pos} holds the fixed {state:?} classification")]
    FixedCell { pos: Point, state: CellState },
}

// ---------------------------------------------------------------------------
// Neighborhood
// ---------------------------------------------------------------------------

/// The four cardinal neighbours of a cell. `None` means off-grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    pub down: Option<Point>,
    pub up: Option<Point>,
    pub left: Option<Point>,
    pub right: Option<Point>,
}

impl Neighborhood {
    /// The neighbour in direction `dir`.
    #[inline]
    pub fn get(&self, dir: Direction) -> Option<Point> {
        match dir {
            Direction::Down => self.down,
            Direction::Up => self.up,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// In-bounds neighbours in evaluation order (down, up, left, right).
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Point)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|p| (d, p)))
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular maze: cell states plus the start and end coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellState>,
    bounds: Range,
    start: Point,
    end: Point,
}

impl Grid {
    /// Create a grid of `Empty` cells with `start` marked `Start` and `end`
    /// marked `End`. If both coincide the cell is `Start`.
    pub fn new(width: i32, height: i32, start: Point, end: Point) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        let bounds = Range::new(Point::ZERO, Point::new(width, height));
        for p in [start, end] {
            if !bounds.contains(p) {
                return Err(GridError::OutOfBounds { pos: p, width, height });
            }
        }
        let mut grid = Self {
            cells: vec![CellState::Empty; bounds.len()],
            bounds,
            start,
            end,
        };
        let ei = grid.index(end)?;
        grid.cells[ei] = CellState::End;
        let si = grid.index(start)?;
        grid.cells[si] = CellState::Start;
        Ok(grid)
    }

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The start coordinate.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The end coordinate.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Whether `p` is the start or the end cell.
    #[inline]
    pub fn is_fixed(&self, p: Point) -> bool {
        p == self.start || p == self.end
    }

    #[inline]
    fn index(&self, p: Point) -> Result<usize, GridError> {
        if !self.bounds.contains(p) {
            return Err(self.out_of_bounds(p));
        }
        Ok((p.y as usize) * (self.width() as usize) + (p.x as usize))
    }

    fn out_of_bounds(&self, pos: Point) -> GridError {
        GridError::OutOfBounds {
            pos,
            width: self.width(),
            height: self.height(),
        }
    }

    /// Read the cell at `p`.
    pub fn get(&self, p: Point) -> Result<CellState, GridError> {
        let i = self.index(p)?;
        Ok(self.cells[i])
    }

    /// Write the cell at `p`.
    ///
    /// The start and end cells cannot be rewritten.
    pub fn set(&mut self, p: Point, state: CellState) -> Result<(), GridError> {
        let i = self.index(p)?;
        if self.is_fixed(p) {
            return Err(GridError::FixedCell {
                pos: p,
                state: self.cells[i],
            });
        }
        self.cells[i] = state;
        Ok(())
    }

    /// The neighbour of `p` in direction `dir`, or `None` if it lies
    /// off-grid. Fails if `p` itself is outside the grid.
    pub fn neighbor(&self, p: Point, dir: Direction) -> Result<Option<Point>, GridError> {
        self.index(p)?;
        let n = p.step(dir);
        Ok(self.bounds.contains(n).then_some(n))
    }

    /// All four cardinal neighbours of `p`.
    pub fn neighbors(&self, p: Point) -> Result<Neighborhood, GridError> {
        Ok(Neighborhood {
            down: self.neighbor(p, Direction::Down)?,
            up: self.neighbor(p, Direction::Up)?,
            left: self.neighbor(p, Direction::Left)?,
            right: self.neighbor(p, Direction::Right)?,
        })
    }

    /// Number of cells in the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Row-major iterator over `(Point, CellState)` pairs.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Point, CellState)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// The cells of each row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.width() as usize)
    }
}
