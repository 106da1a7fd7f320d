use std::fmt;

/// One of the four cardinal neighbor directions on the grid.
///
/// Directions serve double duty: as row/column offsets when locating a
/// neighboring cell, and as indices into per-state adjacency rule rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward row 0 (up on screen).
    North,
    /// Toward higher column indices (right on screen).
    East,
    /// Toward higher row indices (down on screen).
    South,
    /// Toward column 0 (left on screen).
    West,
}

impl Direction {
    /// All four directions in rule-table order: North, East, South, West.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the direction pointing back toward this one.
    ///
    /// North and South are opposites, as are East and West. Propagation
    /// relies on this to ask a neighbor which states it tolerates facing
    /// back toward the cell being recomputed.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// `(row_delta, col_delta)` to apply when stepping one cell this way.
    ///
    /// Row 0 is the top row, so North is `(-1, 0)` and South is `(1, 0)`.
    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Stable index of this direction within [`Direction::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        write!(f, "{name}")
    }
}
