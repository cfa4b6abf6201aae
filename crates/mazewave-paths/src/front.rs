//! A single propagating search branch and its lifecycle.

use mazewave_core::Point;

/// Lifecycle of a [`Front`].
///
/// A front starts `Active`, may move any number of times (`MovedTo`), and
/// ends in exactly one terminal state. Children created by a split are new
/// `Active` fronts; the parent never becomes active again.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrontState {
    Active,
    MovedTo(Point),
    /// Replaced by this many child fronts.
    SplitInto(usize),
    DeadEnded,
    ReachedEnd,
    Collided,
}

impl FrontState {
    /// Whether no further transition is possible.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, FrontState::Active | FrontState::MovedTo(_))
    }
}

/// One branch of the wavefront: a position plus its lifecycle state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Front {
    pos: Point,
    state: FrontState,
    moves: usize,
}

impl Front {
    /// A fresh `Active` front at `pos`.
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            state: FrontState::Active,
            moves: 0,
        }
    }

    /// Current cell.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn state(&self) -> FrontState {
        self.state
    }

    /// Number of single-cell moves made since creation.
    #[inline]
    pub fn moves(&self) -> usize {
        self.moves
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.state.is_terminal()
    }

    pub fn move_to(&mut self, p: Point) {
        debug_assert!(self.is_alive(), "move on finished front {self:?}");
        self.pos = p;
        self.moves += 1;
        self.state = FrontState::MovedTo(p);
    }

    pub fn split(&mut self, children: usize) {
        self.finish(FrontState::SplitInto(children));
    }

    pub fn dead_end(&mut self) {
        self.finish(FrontState::DeadEnded);
    }

    pub fn reach_end(&mut self) {
        self.finish(FrontState::ReachedEnd);
    }

    pub fn collide(&mut self) {
        self.finish(FrontState::Collided);
    }

    fn finish(&mut self, state: FrontState) {
        debug_assert!(state.is_terminal());
        debug_assert!(self.is_alive(), "front {self:?} finished twice");
        self.state = state;
    }
}
