use std::fmt;

use thiserror::Error;

/// Identifies one tile state out of the configured set.
///
/// The wrapped index doubles as the bit position inside possibility sets and
/// adjacency rule rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileState(pub usize);

impl fmt::Display for TileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during `TileSet` creation or validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileSetError {
    /// The provided list of state names was empty.
    #[error("TileSet must define at least one tile state.")]
    EmptyStates,
    /// The same name was given to more than one state.
    #[error("TileSet state names must be unique. '{0}' appears more than once.")]
    DuplicateName(String),
}

/// The named set of tile states a solver run is configured with.
///
/// The solver itself only cares about state *indices*; names exist for hosts,
/// renderers, and log output. State `TileState(i)` carries the i-th name.
#[derive(Debug, Clone)]
pub struct TileSet {
    names: Vec<String>,
}

impl TileSet {
    /// Creates a new `TileSet` from a list of state names.
    ///
    /// # Errors
    ///
    /// Returns `TileSetError::EmptyStates` if `names` is empty.
    /// Returns `TileSetError::DuplicateName` if any name repeats.
    pub fn new(names: Vec<String>) -> Result<Self, TileSetError> {
        if names.is_empty() {
            return Err(TileSetError::EmptyStates);
        }
        for (index, name) in names.iter().enumerate() {
            if names[..index].contains(name) {
                return Err(TileSetError::DuplicateName(name.clone()));
            }
        }
        Ok(Self { names })
    }

    /// Number of tile states in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if the set holds no states. Construction forbids this, so it
    /// only returns true for a `TileSet` obtained some other way.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Gets the name of a state, or `None` if the index is out of range.
    pub fn name(&self, state: TileState) -> Option<&str> {
        self.names.get(state.0).map(String::as_str)
    }

    /// Iterates over every state in index order.
    pub fn states(&self) -> impl Iterator<Item = TileState> {
        (0..self.names.len()).map(TileState)
    }
}
