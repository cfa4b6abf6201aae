//! The wavefront solver.
//!
//! A set of [`Front`]s expands from the start cell one step per iteration.
//! A front with several open neighbours splits, a front with none is pruned
//! by [`Backtrack`], and fronts that land on the same cell at the end of an
//! iteration are removed and their meeting cell is sealed as a wall.
//!
//! Exploration happens on a private copy of the grid. Only when the front
//! set is exhausted are the final classifications written back, with the
//! transient `DeadEnd`/`WaveCrest` marks resolved to `Empty`.

use std::collections::HashMap;

use mazewave_core::{CellState, Grid, GridError, Point};
use thiserror::Error;

use crate::backtrack::Backtrack;
use crate::front::Front;
use crate::neighbors::Neighbors;

/// Outcome of a completed solve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveResult {
    /// At least one front reached the end cell.
    Solved,
    /// Every front died or collided before reaching the end cell.
    Unsolvable,
}

impl SolveResult {
    #[inline]
    pub fn is_solved(self) -> bool {
        self == SolveResult::Solved
    }
}

/// Errors that abort a solve. An unreachable end is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The configured iteration budget ran out with fronts still alive.
    #[error("wavefront still had {fronts} live fronts after {limit} iterations")]
    IterationLimit { limit: usize, fronts: usize },
}

/// Solver settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Abort with [`SolveError::IterationLimit`] after this many iterations.
    /// `None` runs until the wavefront is exhausted.
    pub max_iterations: Option<usize>,
}

/// Counters collected during the last [`Wavefront::solve`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveStats {
    pub iterations: usize,
    /// Fronts created, including the initial one.
    pub fronts_spawned: usize,
    pub splits: usize,
    pub dead_ends: usize,
    /// Cells sealed because several fronts met there.
    pub collisions: usize,
    /// Branch points sealed while backtracking.
    pub sealed: usize,
    /// Trail cells erased while backtracking.
    pub erased: usize,
    /// Largest wavefront seen at the start of an iteration.
    pub peak_fronts: usize,
    /// Fronts that arrived at the end cell.
    pub reached_end: usize,
}

/// Forward moves: open cells, the end, or a sibling's fresh crest.
#[inline]
fn is_viable(s: CellState) -> bool {
    matches!(s, CellState::Empty | CellState::End | CellState::WaveCrest)
}

// ---------------------------------------------------------------------------
// Wavefront
// ---------------------------------------------------------------------------

/// Multi-front flood-fill maze solver.
///
/// `Wavefront` owns its scratch buffers (front sets, occupancy map, the
/// backtracking worklist) so repeated solves reuse their allocations.
#[derive(Debug, Default)]
pub struct Wavefront {
    config: SolverConfig,
    fronts: Vec<Front>,
    next: Vec<Front>,
    occupancy: HashMap<Point, usize>,
    nbuf: Neighbors,
    backtrack: Backtrack,
    stats: SolveStats,
}

impl Wavefront {
    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> SolverConfig {
        self.config
    }

    /// Statistics of the most recent solve.
    #[inline]
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Solve `grid` in place.
    ///
    /// On success every reachable cell that survived pruning is `Path`,
    /// pruned cells are back to `Empty`, and collision cells are `Wall`.
    /// On error the grid is left untouched.
    pub fn solve(&mut self, grid: &mut Grid) -> Result<SolveResult, SolveError> {
        self.stats = SolveStats::default();
        log::debug!(
            "solving {}x{} maze from {} to {}",
            grid.width(),
            grid.height(),
            grid.start(),
            grid.end()
        );

        let mut work = grid.clone();
        let result = self.explore(&mut work)?;
        commit(grid, &work)?;

        log::debug!("{result:?} after {} iterations: {:?}", self.stats.iterations, self.stats);
        Ok(result)
    }

    fn explore(&mut self, work: &mut Grid) -> Result<SolveResult, SolveError> {
        self.fronts.clear();
        self.next.clear();
        self.fronts.push(Front::new(work.start()));
        self.stats.fronts_spawned = 1;

        while !self.fronts.is_empty() {
            if let Some(limit) = self.config.max_iterations {
                if self.stats.iterations >= limit {
                    return Err(SolveError::IterationLimit {
                        limit,
                        fronts: self.fronts.len(),
                    });
                }
            }
            self.stats.iterations += 1;
            self.stats.peak_fronts = self.stats.peak_fronts.max(self.fronts.len());

            let mut current = std::mem::take(&mut self.fronts);
            for front in current.drain(..) {
                self.advance(work, front)?;
            }
            self.fronts = current;

            self.resolve_collisions(work)?;
            std::mem::swap(&mut self.fronts, &mut self.next);

            log::trace!(
                "iteration {}: {} fronts alive",
                self.stats.iterations,
                self.fronts.len()
            );
        }

        Ok(if self.stats.reached_end > 0 {
            SolveResult::Solved
        } else {
            SolveResult::Unsolvable
        })
    }

    /// Run one front through one iteration. Survivors and children are
    /// pushed onto `self.next`.
    fn advance(&mut self, work: &mut Grid, mut front: Front) -> Result<(), GridError> {
        let c = front.pos();

        // Pruned cells hold no live front; retire one found there.
        if matches!(work.get(c)?, CellState::Wall | CellState::DeadEnd) {
            log::trace!("front at {c} absorbed by a pruned trail");
            front.collide();
            return Ok(());
        }

        if c == work.end() {
            front.reach_end();
            self.stats.reached_end += 1;
            log::trace!("front reached the end at {c} after {} moves", front.moves());
            return Ok(());
        }

        let viable = self.nbuf.cardinal(work, c, is_viable)?;
        if !work.is_fixed(c) {
            work.set(c, CellState::Path)?;
        }

        match viable {
            [] => {
                front.dead_end();
                self.stats.dead_ends += 1;
                let report = self.backtrack.run(work, c)?;
                self.stats.erased += report.erased;
                self.stats.sealed += report.sealed;
                log::trace!("dead end at {c}: {report:?}");
            }
            &[n] => {
                mark_crest(work, n)?;
                front.move_to(n);
                self.next.push(front);
            }
            children => {
                for &n in children {
                    mark_crest(work, n)?;
                    self.next.push(Front::new(n));
                }
                front.split(children.len());
                self.stats.splits += 1;
                self.stats.fronts_spawned += children.len();
                log::trace!("front at {c} split into {}", children.len());
            }
        }
        Ok(())
    }

    /// Remove every front sharing a cell with another and wall that cell
    /// off. Fronts converging on the end cell are left to finish.
    fn resolve_collisions(&mut self, work: &mut Grid) -> Result<(), GridError> {
        self.occupancy.clear();
        for f in &self.next {
            *self.occupancy.entry(f.pos()).or_insert(0) += 1;
        }

        let end = work.end();
        for f in self.next.iter_mut() {
            let p = f.pos();
            if p == end || self.occupancy.get(&p).copied().unwrap_or(0) < 2 {
                continue;
            }
            f.collide();
            if work.get(p)? != CellState::Wall {
                work.set(p, CellState::Wall)?;
                self.stats.collisions += 1;
                log::trace!("fronts collided at {p}, sealing it");
            }
        }
        self.next.retain(Front::is_alive);
        Ok(())
    }
}

fn mark_crest(work: &mut Grid, p: Point) -> Result<(), GridError> {
    if work.is_fixed(p) {
        return Ok(());
    }
    work.set(p, CellState::WaveCrest)
}

/// Copy the working classifications back, resolving transient marks.
fn commit(grid: &mut Grid, work: &Grid) -> Result<(), GridError> {
    for (p, state) in work.iter() {
        if grid.is_fixed(p) {
            continue;
        }
        grid.set(p, state.resolved())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Build a maze from rows of `#` (wall), `S`, `E` and open cells.
    fn maze(rows: &[&str]) -> Grid {
        let find = |ch: char| {
            rows.iter()
                .enumerate()
                .find_map(|(y, r)| r.find(ch).map(|x| Point::new(x as i32, y as i32)))
                .unwrap()
        };
        let mut g = Grid::new(rows[0].len() as i32, rows.len() as i32, find('S'), find('E'))
            .unwrap();
        for (y, r) in rows.iter().enumerate() {
            for (x, ch) in r.chars().enumerate() {
                if ch == '#' {
                    g.set(Point::new(x as i32, y as i32), CellState::Wall).unwrap();
                }
            }
        }
        g
    }

    /// Inverse of [`maze`], with `X` for path cells.
    fn picture(g: &Grid) -> Vec<String> {
        g.rows()
            .map(|row| {
                row.iter()
                    .map(|s| match s {
                        CellState::Empty => ' ',
                        CellState::Wall => '#',
                        CellState::Start => 'S',
                        CellState::End => 'E',
                        CellState::Path => 'X',
                        CellState::DeadEnd => '.',
                        CellState::WaveCrest => '~',
                    })
                    .collect()
            })
            .collect()
    }

    fn solve(g: &mut Grid) -> (SolveResult, SolveStats) {
        let mut solver = Wavefront::default();
        let result = solver.solve(g).unwrap();
        (result, *solver.stats())
    }

    #[test]
    fn open_grid_seals_first_merge_point() {
        // Both first-generation branches step onto the centre in the same
        // iteration, so it is walled off even though it is passable.
        let mut g = maze(&["S  ", "   ", "  E"]);
        let (result, stats) = solve(&mut g);
        assert_eq!(result, SolveResult::Solved);
        assert_eq!(picture(&g), ["SXX", "X#X", "XXE"]);
        assert_eq!(stats.collisions, 1);
        assert_eq!(stats.reached_end, 2);
        assert_eq!(stats.iterations, 5);
    }

    #[test]
    fn side_branch_is_pruned() {
        let mut g = maze(&[
            "#######", //
            "#S   E#",
            "### ###",
            "### ###",
            "#######",
        ]);
        let (result, stats) = solve(&mut g);
        assert_eq!(result, SolveResult::Solved);
        assert_eq!(
            picture(&g),
            ["#######", "#SXXXE#", "### ###", "### ###", "#######"]
        );
        assert_eq!(stats.dead_ends, 1);
        assert_eq!(stats.erased, 2);
        assert_eq!(stats.splits, 1);
    }

    #[test]
    fn enclosed_start_is_unsolvable_and_untouched() {
        let mut g = maze(&["#####", "#S# #", "### #", "#  E#", "#####"]);
        let before = g.clone();
        let (result, stats) = solve(&mut g);
        assert_eq!(result, SolveResult::Unsolvable);
        assert_eq!(g, before);
        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.dead_ends, 1);
    }

    #[test]
    fn converging_branches_leave_one_wall() {
        let rows = ["######", "#S  ##", "# # E#", "#   ##", "######"];
        let mut g = maze(&rows);
        let walls_before = g.count(CellState::Wall);
        let (result, stats) = solve(&mut g);
        assert_eq!(result, SolveResult::Solved);
        assert_eq!(g.count(CellState::Wall), walls_before + 1);
        assert_eq!(g.get(Point::new(3, 3)), Ok(CellState::Wall));
        assert_eq!(
            picture(&g),
            ["######", "#SXX##", "#X#XE#", "#XX###", "######"]
        );
        assert_eq!(stats.collisions, 1);
        assert_eq!(stats.reached_end, 1);
    }

    #[test]
    fn dead_corridor_is_fully_erased() {
        let rows = ["#######", "#S   ##", "#####E#", "#######"];
        let mut g = maze(&rows);
        let (result, stats) = solve(&mut g);
        assert_eq!(result, SolveResult::Unsolvable);
        assert_eq!(picture(&g), rows);
        assert_eq!(stats.erased, 3);
    }

    #[test]
    fn shared_ancestor_collapses_when_all_children_die() {
        let rows = ["#######", "#S   ##", "### ###", "### #E#", "#######"];
        let mut g = maze(&rows);
        let (result, stats) = solve(&mut g);
        assert_eq!(result, SolveResult::Unsolvable);
        assert_eq!(picture(&g), rows);
        assert_eq!(stats.dead_ends, 2);
        assert_eq!(stats.erased, 5);
    }

    #[test]
    fn start_equal_to_end_is_solved_immediately() {
        let mut g = Grid::new(3, 3, Point::new(1, 1), Point::new(1, 1)).unwrap();
        let (result, stats) = solve(&mut g);
        assert_eq!(result, SolveResult::Solved);
        assert_eq!(stats.iterations, 1);
        assert_eq!(g.count(CellState::Path), 0);
    }

    #[test]
    fn fronts_never_step_off_grid() {
        // No border walls: the solver has to respect the grid edge itself.
        let mut g = maze(&["S", " ", " ", "E"]);
        let (result, _) = solve(&mut g);
        assert_eq!(result, SolveResult::Solved);
        assert_eq!(picture(&g), ["S", "X", "X", "E"]);
    }

    #[test]
    fn iteration_limit_leaves_grid_untouched() {
        let mut g = maze(&["#######", "#S   E#", "#######"]);
        let before = g.clone();
        let mut solver = Wavefront::new(SolverConfig {
            max_iterations: Some(2),
        });
        let err = solver.solve(&mut g).unwrap_err();
        assert_eq!(err, SolveError::IterationLimit { limit: 2, fronts: 1 });
        assert_eq!(g, before);
    }

    #[test]
    fn solver_is_reusable() {
        let mut solver = Wavefront::default();
        let mut a = maze(&["S  ", "   ", "  E"]);
        let mut b = maze(&["#####", "#S#E#", "#####"]);
        assert_eq!(solver.solve(&mut a), Ok(SolveResult::Solved));
        assert_eq!(solver.solve(&mut b), Ok(SolveResult::Unsolvable));
        assert_eq!(solver.stats().iterations, 1);
        assert_eq!(solver.stats().reached_end, 0);
    }

    #[test]
    fn front_on_pruned_cell_is_retired() {
        let mut work = maze(&["#####", "#S  #", "###E#"]);
        let mut solver = Wavefront::default();
        let p = Point::new(2, 1);
        for state in [CellState::DeadEnd, CellState::Wall] {
            work.set(p, state).unwrap();
            let before = work.clone();
            solver.advance(&mut work, Front::new(p)).unwrap();
            assert!(solver.next.is_empty(), "front on {state:?} kept");
            assert_eq!(work, before);
        }
        assert_eq!(*solver.stats(), SolveStats::default());
    }

    // -----------------------------------------------------------------------
    // Randomised checks
    // -----------------------------------------------------------------------

    /// A perfect maze (a spanning tree of the odd cells) carved by
    /// randomised depth-first search. Start is top-left, end bottom-right.
    fn perfect_maze(rng: &mut StdRng, cols: i32, rows: i32) -> Grid {
        let (w, h) = (cols * 2 + 1, rows * 2 + 1);
        let mut open = vec![false; (w * h) as usize];
        let idx = |p: Point| (p.y * w + p.x) as usize;
        let start = Point::new(1, 1);
        open[idx(start)] = true;
        let mut stack = vec![start];
        while let Some(&cur) = stack.last() {
            let choices: Vec<Point> = [(0, 2), (0, -2), (-2, 0), (2, 0)]
                .into_iter()
                .map(|(dx, dy)| cur.shift(dx, dy))
                .filter(|n| n.x > 0 && n.y > 0 && n.x < w - 1 && n.y < h - 1)
                .filter(|&n| !open[idx(n)])
                .collect();
            if choices.is_empty() {
                stack.pop();
                continue;
            }
            let n = choices[rng.random_range(0..choices.len())];
            open[idx(Point::new((cur.x + n.x) / 2, (cur.y + n.y) / 2))] = true;
            open[idx(n)] = true;
            stack.push(n);
        }

        let mut g = Grid::new(w, h, start, Point::new(w - 2, h - 2)).unwrap();
        for p in g.bounds().iter() {
            if !open[idx(p)] {
                g.set(p, CellState::Wall).unwrap();
            }
        }
        g
    }

    /// Random walls over an open field, loops included.
    fn noisy_maze(rng: &mut StdRng, w: i32, h: i32) -> Grid {
        let start = Point::new(rng.random_range(0..w), rng.random_range(0..h));
        let end = Point::new(rng.random_range(0..w), rng.random_range(0..h));
        let mut g = Grid::new(w, h, start, end).unwrap();
        for p in g.bounds().iter() {
            if !g.is_fixed(p) && rng.random_range(0..100) < 35 {
                g.set(p, CellState::Wall).unwrap();
            }
        }
        g
    }

    /// Shortest open route from start to end, excluding both endpoints.
    fn bfs_route(g: &Grid) -> Option<Vec<Point>> {
        let mut parent: HashMap<Point, Point> = HashMap::new();
        let mut queue = VecDeque::from([g.start()]);
        let mut seen = HashSet::from([g.start()]);
        while let Some(p) = queue.pop_front() {
            if p == g.end() {
                let mut route = Vec::new();
                let mut cur = parent.get(&p).copied();
                while let Some(c) = cur {
                    if c == g.start() {
                        break;
                    }
                    route.push(c);
                    cur = parent.get(&c).copied();
                }
                return Some(route);
            }
            for (_, n) in g.neighbors(p).unwrap().iter() {
                if g.get(n).unwrap() != CellState::Wall && seen.insert(n) {
                    parent.insert(n, p);
                    queue.push_back(n);
                }
            }
        }
        None
    }

    #[test]
    fn perfect_mazes_mark_exactly_the_route() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..40 {
            let mut g = perfect_maze(&mut rng, 12, 9);
            let route: HashSet<Point> = bfs_route(&g).unwrap().into_iter().collect();
            let walls_before = g.count(CellState::Wall);

            let (result, stats) = solve(&mut g);
            assert_eq!(result, SolveResult::Solved);
            assert_eq!(stats.collisions, 0);
            assert_eq!(g.count(CellState::Wall), walls_before);

            let marked: HashSet<Point> = g
                .iter()
                .filter(|&(_, s)| s == CellState::Path)
                .map(|(p, _)| p)
                .collect();
            assert_eq!(marked, route);
        }
    }

    #[test]
    fn noisy_mazes_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let (w, h) = (rng.random_range(1..14), rng.random_range(1..14));
            let original = noisy_maze(&mut rng, w, h);
            let reachable = bfs_route(&original).is_some();

            let mut g = original.clone();
            let mut solver = Wavefront::new(SolverConfig {
                max_iterations: Some((w * h * w * h) as usize + 4),
            });
            let result = solver.solve(&mut g).unwrap();

            // A front only moves through open cells.
            if result.is_solved() {
                assert!(reachable);
            }
            if !reachable {
                assert_eq!(result, SolveResult::Unsolvable);
            }

            assert_eq!(g.get(g.start()), original.get(original.start()));
            assert_eq!(g.get(g.end()), original.get(original.end()));
            for ((p, before), (_, after)) in original.iter().zip(g.iter()) {
                assert!(!after.is_transient(), "{p} left as {after:?}");
                if before == CellState::Wall {
                    assert_eq!(after, CellState::Wall);
                }
            }

            // Same input, same outcome.
            let mut again = original.clone();
            assert_eq!(Wavefront::default().solve(&mut again), Ok(result));
            assert_eq!(again, g);
        }
    }
}
