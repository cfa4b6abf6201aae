use mazewave_core::{CellState, Grid, GridError, Point};

/// Cached neighbor computation helper.
///
/// Enumerates the in-bounds cardinal neighbors of a grid point in the
/// fixed evaluation order (down, up, left, right), keeping those whose
/// current state satisfies a predicate.
#[derive(Debug)]
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the cardinal neighbors of `p` whose state passes `keep`.
    ///
    /// Off-grid neighbors are skipped. Fails if `p` is outside `grid`.
    pub fn cardinal(
        &mut self,
        grid: &Grid,
        p: Point,
        keep: impl Fn(CellState) -> bool,
    ) -> Result<&[Point], GridError> {
        self.buf.clear();
        for (_, n) in grid.neighbors(p)?.iter() {
            if keep(grid.get(n)?) {
                self.buf.push(n);
            }
        }
        Ok(&self.buf)
    }
}
