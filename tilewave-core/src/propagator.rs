use bitvec::prelude::*;
use tilewave_rules::{AdjacencyRules, Direction, TileState};

use crate::grid::CellGrid;

/// Outcome of one full propagation sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    /// Cells whose possibility set changed during the sweep.
    pub cells_updated: usize,
    /// Uncollapsed cells whose possibility set was empty once the sweep
    /// finished. Contradictions are reported here, never raised: an empty
    /// set keeps propagating like any other set, and the selector surfaces
    /// the failure if it is ever forced to collapse one.
    pub contradictions: usize,
}

/// One full-grid constraint propagation pass.
///
/// Implementations recompute every uncollapsed cell's possibility set from
/// the sets of its up-to-four neighbors; collapsed cells are never touched.
/// They differ only in *which* neighbor state they read: the live grid as
/// the sweep rewrites it, or a snapshot from the start of the sweep.
pub trait ConstraintPropagator {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    /// Runs one sweep over `grid`, narrowing cells according to `rules`.
    fn propagate(&mut self, grid: &mut CellGrid, rules: &AdjacencyRules) -> SweepReport;
}

/// Recomputes the possibility set for the cell at `(row, col)` from its
/// neighbors as seen in `source`.
///
/// Starts from the full state set and, per existing neighbor N at direction
/// `d`, intersects with the union over N's still-possible states of what
/// each tolerates facing back toward this cell (`opposite(d)`). An empty
/// neighbor set contributes an empty union, so emptiness spreads.
fn narrowed_options(
    source: &CellGrid,
    rules: &AdjacencyRules,
    row: usize,
    col: usize,
) -> BitVec {
    let num_states = rules.num_states();
    let mut options = bitvec![1; num_states];

    for direction in Direction::ALL {
        let Some(neighbor) = source
            .neighbor(row, col, direction)
            .and_then(|(nrow, ncol)| source.get(nrow, ncol))
        else {
            continue;
        };

        // States that some still-possible state of the neighbor tolerates
        // facing back toward this cell.
        let mut allowed = bitvec![0; num_states];
        for state in neighbor.possibilities().iter_ones() {
            for permitted in rules
                .permitted(TileState(state), direction.opposite())
                .iter_ones()
            {
                allowed.set(permitted, true);
            }
        }

        for idx in 0..num_states {
            if options[idx] && !allowed[idx] {
                options.set(idx, false);
            }
        }
    }

    options
}

/// Writes `options` into the cell at flat index `idx`, updating the report.
fn commit(grid: &mut CellGrid, idx: usize, options: BitVec, report: &mut SweepReport) {
    let empty = options.not_any();
    let cell = &mut grid.cells[idx];
    if cell.possibilities() != options.as_bitslice() {
        cell.set_possibilities(options);
        report.cells_updated += 1;
    }
    if empty {
        report.contradictions += 1;
    }
}

/// The default sweep: a single in-place row-major pass.
///
/// Each cell is recomputed against the grid as it currently stands, so a
/// cell later in the pass observes the narrowed sets already written to
/// neighbors earlier in the same pass. Within one tick this converges
/// faster than a snapshot read; across ticks both arrive at the same
/// fixpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepPropagator;

impl ConstraintPropagator for SweepPropagator {
    fn name(&self) -> &'static str {
        "row-major sweep"
    }

    fn propagate(&mut self, grid: &mut CellGrid, rules: &AdjacencyRules) -> SweepReport {
        let mut report = SweepReport::default();
        for row in 0..grid.height {
            for col in 0..grid.width {
                let idx = row * grid.width + col;
                if grid.cells[idx].is_collapsed() {
                    continue;
                }
                let options = narrowed_options(grid, rules, row, col);
                commit(grid, idx, options, &mut report);
            }
        }
        report
    }
}

/// Snapshot variant: every cell is recomputed against the grid as it stood
/// when the sweep began.
///
/// Cell order stops mattering, at the cost of cloning the grid once per
/// sweep and narrowing more slowly within a tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPhasePropagator;

impl ConstraintPropagator for TwoPhasePropagator {
    fn name(&self) -> &'static str {
        "two-phase sweep"
    }

    fn propagate(&mut self, grid: &mut CellGrid, rules: &AdjacencyRules) -> SweepReport {
        let mut report = SweepReport::default();
        let snapshot = grid.clone();
        for row in 0..grid.height {
            for col in 0..grid.width {
                let idx = row * grid.width + col;
                if grid.cells[idx].is_collapsed() {
                    continue;
                }
                let options = narrowed_options(&snapshot, rules, row, col);
                commit(grid, idx, options, &mut report);
            }
        }
        report
    }
}

/// Which propagation pass a runner should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SweepMode {
    /// In-place row-major pass; later cells see this sweep's writes.
    #[default]
    RowMajor,
    /// Read-from-snapshot pass; order-independent alternative.
    TwoPhase,
}

impl SweepMode {
    /// Builds the propagator implementing this mode.
    pub fn propagator(self) -> Box<dyn ConstraintPropagator> {
        match self {
            SweepMode::RowMajor => Box::new(SweepPropagator),
            SweepMode::TwoPhase => Box::new(TwoPhasePropagator),
        }
    }
}
