//! Tile states, directions, and adjacency compatibility tables for the
//! tilewave solver.
//!
//! Everything here is immutable configuration: a solver run builds one
//! [`TileSet`] and one [`AdjacencyRules`] table at startup and shares them
//! read-only across every grid it creates. The [`tracks`] module ships the
//! five-state reference configuration used by the demo binary and the test
//! suites.

/// The four cardinal neighbor directions and their offsets.
pub mod direction;
/// Adjacency rule table construction and lookup.
pub mod rules;
/// Tile state identifiers and named tile sets.
pub mod tile;
/// Built-in five-state track tileset and its adjacency table.
pub mod tracks;

/// One of the four cardinal neighbor directions.
pub use crate::direction::Direction;
/// Immutable (state, direction) -> permitted-neighbor-set table.
pub use crate::rules::AdjacencyRules;
/// Error building an adjacency rule table.
pub use crate::rules::RuleSetError;
/// Index of a tile state within the configured set.
pub use crate::tile::TileState;
/// Validated, named set of tile states.
pub use crate::tile::TileSet;
/// Error building a tile set.
pub use crate::tile::TileSetError;
