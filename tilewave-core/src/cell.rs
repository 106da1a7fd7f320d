use bitvec::prelude::*;
use tilewave_rules::TileState;

/// One grid cell: the set of tile states still viable for it, plus the
/// collapsed flag.
///
/// The flag is deliberately separate from the set size. Propagation may
/// narrow a cell to a single state, but the cell only counts as collapsed
/// once the selector commits it; until then it is an ordinary uncollapsed
/// cell with entropy 1. Renderers receive cells by flag, never by count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    possibilities: BitVec,
    collapsed: bool,
}

impl Cell {
    /// Creates an uncollapsed cell with all `num_states` states possible.
    pub fn new(num_states: usize) -> Self {
        Self {
            possibilities: bitvec![1; num_states],
            collapsed: false,
        }
    }

    /// The current possibility set, one bit per tile state.
    pub fn possibilities(&self) -> &BitSlice {
        &self.possibilities
    }

    /// Number of states still viable. This is the cell's entropy.
    pub fn possibility_count(&self) -> usize {
        self.possibilities.count_ones()
    }

    /// Whether `state` is still viable for this cell.
    pub fn is_possible(&self, state: TileState) -> bool {
        self.possibilities.get(state.0).map_or(false, |bit| *bit)
    }

    /// Whether the selector has committed this cell to a single state.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Whether the possibility set has shrunk to empty.
    pub fn is_contradicted(&self) -> bool {
        self.possibilities.not_any()
    }

    /// Commits the cell to `state`: singleton possibility set, flag set.
    ///
    /// # Panics
    ///
    /// Panics if `state` lies outside the configured state set.
    pub fn collapse_to(&mut self, state: TileState) {
        self.possibilities.fill(false);
        self.possibilities.set(state.0, true);
        self.collapsed = true;
    }

    /// The committed state of a collapsed cell.
    ///
    /// `None` for any cell the selector has not collapsed, even one whose
    /// set propagation already narrowed to a single state.
    pub fn resolved(&self) -> Option<TileState> {
        if self.collapsed {
            self.possibilities.first_one().map(TileState)
        } else {
            None
        }
    }

    /// Replaces the possibility set wholesale. Propagation's write path.
    pub(crate) fn set_possibilities(&mut self, possibilities: BitVec) {
        self.possibilities = possibilities;
    }
}
