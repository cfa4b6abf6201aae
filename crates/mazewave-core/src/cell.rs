//! The [`CellState`] type, the classification of a single maze cell.

/// Classification of one maze cell.
///
/// `Start` and `End` are fixed at grid construction. `DeadEnd` and
/// `WaveCrest` only exist in a solver's working copy and are never left in a
/// grid handed back to the caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    /// Visited by a front and kept as reachable.
    Path,
    /// Part of a trail being erased by backtracking.
    DeadEnd,
    /// Current head of a live front.
    WaveCrest,
}

impl CellState {
    /// Whether this state only exists while a solve is running.
    #[inline]
    pub const fn is_transient(self) -> bool {
        matches!(self, CellState::DeadEnd | CellState::WaveCrest)
    }

    /// The state a cell is committed as once a solve finishes.
    #[inline]
    pub const fn resolved(self) -> Self {
        if self.is_transient() {
            CellState::Empty
        } else {
            self
        }
    }
}
