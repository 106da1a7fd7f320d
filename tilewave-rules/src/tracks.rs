//! Built-in reference configuration: a five-state "track piece" tileset.
//!
//! One blank state plus four three-way track junctions, each named for the
//! direction its center spur points (an `UP` piece opens west, north, and
//! east and is flat south). The names are motif identifiers, not physical
//! directions. Track openings must meet track openings and flat edges must
//! meet flat edges, which makes every rule row reciprocal with its opposite
//! row.

use crate::rules::AdjacencyRules;
use crate::tile::{TileSet, TileState};

/// Tile with no tracks at all.
pub const BLANK: TileState = TileState(0);
/// Junction opening west, north, and east.
pub const UP: TileState = TileState(1);
/// Junction opening north, east, and south.
pub const RIGHT: TileState = TileState(2);
/// Junction opening west, south, and east.
pub const DOWN: TileState = TileState(3);
/// Junction opening north, west, and south.
pub const LEFT: TileState = TileState(4);

/// The named reference tileset, in [`TileState`] index order.
pub fn tile_set() -> TileSet {
    let names = vec![
        "blank".to_string(),
        "up".to_string(),
        "right".to_string(),
        "down".to_string(),
        "left".to_string(),
    ];
    TileSet::new(names).expect("built-in tileset literal is valid")
}

/// The reference adjacency table for the track tileset.
///
/// Each row lists, per direction, the neighbors whose facing edge matches:
/// a tile with an opening on some side accepts exactly the neighbors with an
/// opening on the facing side, and a flat side accepts exactly the neighbors
/// flat toward it.
pub fn rules() -> AdjacencyRules {
    let table: [[&[TileState]; 4]; 5] = [
        // blank: flat on every side
        [
            &[BLANK, UP],
            &[BLANK, RIGHT],
            &[BLANK, DOWN],
            &[BLANK, LEFT],
        ],
        // up: open west/north/east, flat south
        [
            &[RIGHT, DOWN, LEFT],
            &[UP, DOWN, LEFT],
            &[BLANK, DOWN],
            &[UP, RIGHT, DOWN],
        ],
        // right: open north/east/south, flat west
        [
            &[RIGHT, DOWN, LEFT],
            &[UP, DOWN, LEFT],
            &[UP, RIGHT, LEFT],
            &[BLANK, LEFT],
        ],
        // down: open west/south/east, flat north
        [
            &[BLANK, UP],
            &[UP, DOWN, LEFT],
            &[UP, RIGHT, LEFT],
            &[UP, RIGHT, DOWN],
        ],
        // left: open north/west/south, flat east
        [
            &[RIGHT, DOWN, LEFT],
            &[BLANK, RIGHT],
            &[UP, RIGHT, LEFT],
            &[UP, RIGHT, DOWN],
        ],
    ];
    AdjacencyRules::new(&table).expect("built-in rule table literal is valid")
}
