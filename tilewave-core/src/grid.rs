use thiserror::Error;
use tilewave_rules::Direction;

use crate::cell::Cell;

/// Errors that can occur when creating a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was zero. A zero-length grid would be silently
    /// iterated over as if it were finished; reject it instead.
    #[error("Grid dimensions must be positive, got {width}x{height}.")]
    ZeroDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The rule set offered no tile states to fill cells with.
    #[error("Grid requires at least one tile state.")]
    NoTileStates,
}

/// Dense 2D array of [`Cell`]s, row-major.
///
/// The grid exclusively owns its cells; it is rebuilt from scratch (all
/// progress discarded) whenever the requested dimensions change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    pub(crate) cells: Vec<Cell>,
}

impl CellGrid {
    /// Creates a grid of `width * height` cells, each starting with the
    /// full possibility set of `num_states` states and `collapsed = false`.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ZeroDimension` if either dimension is zero and
    /// `GridError::NoTileStates` if `num_states` is zero.
    pub fn new(width: usize, height: usize, num_states: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        if num_states == 0 {
            return Err(GridError::NoTileStates);
        }
        let cells = vec![Cell::new(num_states); width * height];
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of states cells of this grid were created with.
    pub fn num_states(&self) -> usize {
        // Construction guarantees at least one cell.
        self.cells[0].possibilities().len()
    }

    /// Total number of cells.
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cell at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).and_then(|idx| self.cells.get(idx))
    }

    /// Returns the cell at `(row, col)` mutably, or `None` if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.index(row, col)
            .and_then(move |idx| self.cells.get_mut(idx))
    }

    /// Coordinates of the neighbor of `(row, col)` one step toward
    /// `direction`, or `None` if that step leaves the grid.
    ///
    /// The bounds check is the only edge handling; the grid does not wrap.
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = direction.offset();
        let nrow = row.checked_add_signed(dr)?;
        let ncol = col.checked_add_signed(dc)?;
        if nrow < self.height && ncol < self.width {
            Some((nrow, ncol))
        } else {
            None
        }
    }

    /// Iterates over `((row, col), &Cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| ((idx / width, idx % width), cell))
    }

    /// Number of cells the selector has collapsed so far.
    pub fn collapsed_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Coordinates of the first contradicted cell in row-major order, if any.
    pub fn contradicted(&self) -> Option<(usize, usize)> {
        self.iter()
            .find(|(_, cell)| cell.is_contradicted())
            .map(|(coords, _)| coords)
    }

    /// Calculates the flat index for `(row, col)`, or `None` if out of
    /// bounds. Layout is `row * width + col`.
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }
}
