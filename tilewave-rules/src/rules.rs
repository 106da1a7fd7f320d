use bitvec::prelude::*;
use thiserror::Error;

use crate::direction::Direction;
use crate::tile::TileState;

/// Errors that can occur while building an `AdjacencyRules` table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleSetError {
    /// The rule table defined no tile states at all.
    #[error("Adjacency rules must cover at least one tile state.")]
    EmptyStates,
    /// A permitted-neighbor entry referenced a state outside the table.
    #[error("Rule row for state {state} ({direction}) permits unknown state {neighbor} ({num_states} states configured).")]
    UnknownState {
        /// State whose rule row holds the bad entry.
        state: TileState,
        /// Direction of the offending row.
        direction: Direction,
        /// The out-of-range state that was referenced.
        neighbor: TileState,
        /// Size of the configured state set.
        num_states: usize,
    },
}

/// Immutable adjacency compatibility table.
///
/// For every `(state, direction)` pair the table holds the set of states
/// permitted in the neighboring cell at that direction. Built once at
/// startup, read-only afterwards; every grid in the process shares one
/// table.
///
/// Rules are stored as a single flattened bit buffer for cheap lookup.
/// Indexing: `(direction.index() * num_states + state.0) * num_states +
/// neighbor.0`.
#[derive(Debug, Clone)]
pub struct AdjacencyRules {
    num_states: usize,
    allowed: BitVec,
}

impl AdjacencyRules {
    /// Builds a rule table from per-state permitted-neighbor lists.
    ///
    /// `table[s]` holds, in [`Direction::ALL`] order, the list of states
    /// permitted next to state `s` in each direction. Rows may be empty;
    /// a state with an empty row simply forbids every neighbor on that
    /// side. Completeness (every state crossed with every direction) is
    /// guaranteed by the shape of the input.
    ///
    /// # Errors
    ///
    /// Returns `RuleSetError::EmptyStates` if `table` is empty.
    /// Returns `RuleSetError::UnknownState` if any row references a state
    /// with an index outside `0..table.len()`.
    pub fn new(table: &[[&[TileState]; 4]]) -> Result<Self, RuleSetError> {
        let num_states = table.len();
        if num_states == 0 {
            return Err(RuleSetError::EmptyStates);
        }

        let mut allowed = bitvec![0; 4 * num_states * num_states];
        for (index, rows) in table.iter().enumerate() {
            let state = TileState(index);
            for direction in Direction::ALL {
                let row_start = (direction.index() * num_states + index) * num_states;
                for &neighbor in rows[direction.index()] {
                    if neighbor.0 >= num_states {
                        return Err(RuleSetError::UnknownState {
                            state,
                            direction,
                            neighbor,
                            num_states,
                        });
                    }
                    allowed.set(row_start + neighbor.0, true);
                }
            }
        }

        Ok(Self { num_states, allowed })
    }

    /// Number of tile states the table covers.
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// The set of states permitted in the neighbor at `direction` of a cell
    /// holding `state`, as a bit row indexed by neighbor state.
    ///
    /// This is a pure lookup with no side effects.
    ///
    /// # Panics
    ///
    /// Panics if `state` lies outside the configured set. Querying an
    /// unknown state is a programming error, not a recoverable condition.
    #[inline]
    pub fn permitted(&self, state: TileState, direction: Direction) -> &BitSlice {
        assert!(
            state.0 < self.num_states,
            "tile state {} out of range: {} states configured",
            state.0,
            self.num_states,
        );
        let start = (direction.index() * self.num_states + state.0) * self.num_states;
        &self.allowed[start..start + self.num_states]
    }

    /// Checks whether `neighbor` may appear at `direction` of a cell holding
    /// `state`.
    ///
    /// # Panics
    ///
    /// Panics if either state lies outside the configured set.
    #[inline]
    pub fn check(&self, state: TileState, neighbor: TileState, direction: Direction) -> bool {
        assert!(
            neighbor.0 < self.num_states,
            "tile state {} out of range: {} states configured",
            neighbor.0,
            self.num_states,
        );
        self.permitted(state, direction)[neighbor.0]
    }

    /// Scans for asymmetric rule pairs.
    ///
    /// Returns every `(state, direction, neighbor)` where `state` permits
    /// `neighbor` at `direction` but `neighbor` does not permit `state` back
    /// at `direction.opposite()`. Propagation assumes reciprocity without
    /// checking it; an asymmetric table converges differently depending on
    /// which side of a pair gets recomputed first. The scan is advisory and
    /// the table stays usable either way.
    pub fn reciprocity_violations(&self) -> Vec<(TileState, Direction, TileState)> {
        let mut violations = Vec::new();
        for state in 0..self.num_states {
            for direction in Direction::ALL {
                for neighbor in self.permitted(TileState(state), direction).iter_ones() {
                    if !self.check(TileState(neighbor), TileState(state), direction.opposite()) {
                        violations.push((TileState(state), direction, TileState(neighbor)));
                    }
                }
            }
        }
        violations
    }
}
