//! Core engine for an incremental wave function collapse tiling solver.
//!
//! The engine assigns one tile state to every cell of a 2D grid such that
//! neighboring cells satisfy adjacency rules. Each external tick collapses
//! one lowest-entropy cell to a random still-viable state, then recomputes
//! every uncollapsed cell's possibility set from its neighbors. There is no
//! backtracking: a cell whose possibilities run out is a surfaced
//! contradiction, not a recoverable event.

use thiserror::Error;

/// Possibility-set cells.
pub mod cell;
/// Lowest-entropy cell selection and random collapse.
pub mod entropy;
/// The 2D cell grid.
pub mod grid;
/// Constraint propagation sweeps.
pub mod propagator;
/// The tick-driven step runner and its renderer seam.
pub mod runner;

/// One grid cell: possibility set plus collapsed flag.
pub use crate::cell::Cell;
/// One committed collapse.
pub use crate::entropy::CellCollapse;
/// Collapse attempted on a cell without remaining states.
pub use crate::entropy::ContradictionError;
/// Lowest-entropy scan result.
pub use crate::entropy::EntropyScan;
/// Scans for the lowest-entropy uncollapsed cells.
pub use crate::entropy::{collapse_random, min_entropy_scan};
/// Dense row-major grid of cells.
pub use crate::grid::CellGrid;
/// Grid construction errors.
pub use crate::grid::GridError;
/// Trait for full-grid propagation passes.
pub use crate::propagator::ConstraintPropagator;
/// Selects between the shipped propagation passes.
pub use crate::propagator::SweepMode;
/// Outcome counters for one propagation sweep.
pub use crate::propagator::SweepReport;
/// The shipped propagation passes.
pub use crate::propagator::{SweepPropagator, TwoPhasePropagator};
/// The grid view handed to renderers.
pub use crate::runner::Frame;
/// No-op renderer for headless hosts.
pub use crate::runner::NullRenderer;
/// One collapsed cell in a frame.
pub use crate::runner::RenderCell;
/// Error reported by a renderer.
pub use crate::runner::RenderError;
/// External drawing collaborator.
pub use crate::runner::Renderer;
/// Step runner configuration.
pub use crate::runner::RunnerConfig;
/// The tick-driven solver runner.
pub use crate::runner::StepRunner;
/// Per-tick outcome summary.
pub use crate::runner::TickReport;

/// Errors surfaced by a solver tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WfcError {
    /// The selector was forced onto a cell with no possible states left.
    #[error("Collapse failed: {0}")]
    Contradiction(#[from] ContradictionError),
    /// A grid rebuild was requested with invalid dimensions.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
    /// The renderer failed during the frame handoff.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
