use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tilewave_rules::TileState;

use crate::grid::CellGrid;

/// A cell was selected for collapse after its possibility set had already
/// shrunk to empty. There is no backtracking; the run cannot proceed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Contradiction at cell ({row}, {col}): no possible tile states remain.")]
pub struct ContradictionError {
    /// Row of the contradicted cell.
    pub row: usize,
    /// Column of the contradicted cell.
    pub col: usize,
}

/// Result of scanning the grid for its lowest-entropy uncollapsed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntropyScan {
    /// Smallest possibility count found among uncollapsed cells. A
    /// contradicted cell counts as zero and outranks everything else.
    pub min_entropy: usize,
    /// Every uncollapsed cell at that count, in row-major scan order.
    pub candidates: Vec<(usize, usize)>,
}

/// One committed collapse: which cell, and the state it was forced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCollapse {
    /// Row of the collapsed cell.
    pub row: usize,
    /// Column of the collapsed cell.
    pub col: usize,
    /// The state the cell was committed to.
    pub state: TileState,
}

/// Finds the uncollapsed cells with the fewest remaining possibilities.
///
/// Single forward pass in row-major order: a strictly smaller count clears
/// the candidate list, an equal count appends. Collapsed cells are skipped
/// entirely. Returns `None` once every cell is collapsed.
pub fn min_entropy_scan(grid: &CellGrid) -> Option<EntropyScan> {
    let mut min_entropy = usize::MAX;
    let mut candidates = Vec::new();

    for ((row, col), cell) in grid.iter() {
        if cell.is_collapsed() {
            continue;
        }
        let count = cell.possibility_count();
        if count < min_entropy {
            min_entropy = count;
            candidates.clear();
            candidates.push((row, col));
        } else if count == min_entropy {
            candidates.push((row, col));
        }
    }

    if candidates.is_empty() {
        None
    } else {
        Some(EntropyScan {
            min_entropy,
            candidates,
        })
    }
}

/// Collapses one lowest-entropy cell to a uniformly drawn state.
///
/// Picks a cell uniformly from the scan's candidates, then a state uniformly
/// from that cell's possibility set, and commits it. Exactly one cell is
/// mutated per call.
///
/// Returns `Ok(None)` when every cell is already collapsed.
///
/// # Errors
///
/// Returns [`ContradictionError`] when the drawn cell has an empty
/// possibility set: a zero-entropy cell always wins the minimum scan, and
/// there is no state left to commit it to.
pub fn collapse_random<R: Rng + ?Sized>(
    grid: &mut CellGrid,
    rng: &mut R,
) -> Result<Option<CellCollapse>, ContradictionError> {
    let Some(scan) = min_entropy_scan(grid) else {
        return Ok(None);
    };
    let Some(&(row, col)) = scan.candidates.choose(rng) else {
        return Ok(None);
    };

    // Scan coordinates come from this grid, so the flat index is in range.
    let idx = row * grid.width + col;
    let states: Vec<usize> = grid.cells[idx].possibilities().iter_ones().collect();
    match states.choose(rng) {
        Some(&state) => {
            let state = TileState(state);
            grid.cells[idx].collapse_to(state);
            Ok(Some(CellCollapse { row, col, state }))
        }
        None => Err(ContradictionError { row, col }),
    }
}
