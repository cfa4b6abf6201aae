//! Dead-end pruning.
//!
//! When a front runs out of forward moves, the trail it laid down is walked
//! backwards and marked [`CellState::DeadEnd`] until a live junction (or the
//! tail of the stub) is reached. A cell where several `Path` trails rejoin is
//! sealed as a wall and each trail is pruned independently. Pending trails
//! are kept on an explicit worklist, so arbitrarily deep branching never
//! grows the call stack.

use mazewave_core::{CellState, Grid, GridError, Point};

use crate::neighbors::Neighbors;

/// Cells a backward walk may step onto.
#[inline]
fn is_trail(s: CellState) -> bool {
    s == CellState::Path
}

/// Cells that still tie a trail cell to live exploration.
#[inline]
fn is_link(s: CellState) -> bool {
    matches!(
        s,
        CellState::Path | CellState::WaveCrest | CellState::Start | CellState::End
    )
}

/// Summary of one backtrack pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BacktrackReport {
    /// Cells marked `DeadEnd`.
    pub erased: usize,
    /// Branch points turned into walls.
    pub sealed: usize,
}

/// Reusable worklist for dead-end pruning.
#[derive(Debug, Default)]
pub struct Backtrack {
    cursors: Vec<Point>,
    nbuf: Neighbors,
}

impl Backtrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prune the dead trail ending at `origin`.
    ///
    /// `origin` is the cell of a front that has no forward move left. The
    /// start and end cells are never written.
    pub fn run(&mut self, work: &mut Grid, origin: Point) -> Result<BacktrackReport, GridError> {
        let mut report = BacktrackReport::default();
        self.cursors.clear();
        self.cursors.push(origin);

        while let Some(cursor) = self.cursors.pop() {
            if cursor != origin && work.get(cursor)? != CellState::Path {
                continue;
            }

            let trail = self.nbuf.cardinal(work, cursor, is_trail)?;
            if trail.len() > 1 {
                log::trace!("sealing branch point {cursor}, {} trails", trail.len());
                self.cursors.extend_from_slice(trail);
                if !work.is_fixed(cursor) {
                    work.set(cursor, CellState::Wall)?;
                    report.sealed += 1;
                }
                continue;
            }

            if cursor != origin && self.nbuf.cardinal(work, cursor, is_link)?.len() > 1 {
                continue;
            }
            report.erased += self.walk(work, cursor)?;
        }

        Ok(report)
    }

    /// Erase a single-file trail starting at `from`, stopping before the
    /// first cell that is still linked to something else.
    fn walk(&mut self, work: &mut Grid, from: Point) -> Result<usize, GridError> {
        let mut cur = from;
        let mut erased = 0;
        loop {
            if !work.is_fixed(cur) {
                work.set(cur, CellState::DeadEnd)?;
                erased += 1;
            }
            let &[next] = self.nbuf.cardinal(work, cur, is_trail)? else {
                break;
            };
            if self.nbuf.cardinal(work, next, is_link)?.len() > 1 {
                log::trace!("dead trail from {from} stops at junction {next}");
                break;
            }
            cur = next;
        }
        Ok(erased)
    }
}
