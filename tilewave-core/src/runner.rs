use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;
use tilewave_rules::{AdjacencyRules, TileState};

use crate::entropy::{collapse_random, CellCollapse};
use crate::grid::{CellGrid, GridError};
use crate::propagator::{ConstraintPropagator, SweepMode};
use crate::WfcError;

/// One collapsed cell as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCell {
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub col: usize,
    /// The state the cell was committed to.
    pub state: TileState,
}

/// The grid view handed to a renderer after each tick.
///
/// Carries only the cells the selector has committed; a cell that
/// propagation narrowed to one state but that was never selected does not
/// appear here.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Every collapsed cell, in row-major order.
    pub cells: &'a [RenderCell],
}

/// Error reported by a renderer during the handoff.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Render failed: {0}")]
pub struct RenderError(pub String);

/// External drawing collaborator.
///
/// The runner calls [`Renderer::render`] exactly once per completed tick,
/// after propagation. The solver has no opinion on what drawing means; a
/// host may paint a terminal, write an image, or ignore the frame entirely.
pub trait Renderer {
    /// Draws one tick's collapsed cells.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the frame could not be presented. The
    /// runner surfaces the error from `tick` after releasing its handoff
    /// guard, so a failed draw does not wedge the run.
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;
}

/// Renderer that draws nothing, for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Frame<'_>) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Configuration for a [`StepRunner`].
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Seed for the collapse RNG. `None` seeds from OS entropy, giving a
    /// different trace every run.
    pub seed: Option<u64>,
    /// Which propagation pass to run after each collapse.
    pub sweep: SweepMode,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: None,
            sweep: SweepMode::default(),
        }
    }
}

/// What one call to [`StepRunner::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Runner tick counter after this call. Skipped calls do not advance it.
    pub iteration: u64,
    /// True if the tick was refused because a render handoff was in flight.
    pub skipped: bool,
    /// True if the grid was discarded and rebuilt this tick.
    pub reset: bool,
    /// The collapse committed this tick, if any cell was still open.
    pub collapsed: Option<CellCollapse>,
    /// Cells narrowed by the propagation sweep.
    pub cells_updated: usize,
    /// Cells left with empty possibility sets after the sweep.
    pub contradictions: usize,
    /// Collapsed cells in the grid after this tick.
    pub collapsed_cells: usize,
    /// Total cells in the grid.
    pub total_cells: usize,
}

impl TickReport {
    /// True once every cell in the grid is collapsed.
    pub fn is_complete(&self) -> bool {
        self.collapsed_cells == self.total_cells
    }
}

/// Drives one selection + propagation + render cycle per external tick.
///
/// The runner owns the grid and shares the rule table with the rest of the
/// process via [`Arc`]. Hosts call [`tick`](Self::tick) once per time unit;
/// the call is non-reentrant by `&mut self`, single-threaded by design, and
/// guarded by a busy flag across the render handoff so a half-presented
/// frame can never be overwritten by the next tick.
pub struct StepRunner {
    rules: Arc<AdjacencyRules>,
    grid: CellGrid,
    propagator: Box<dyn ConstraintPropagator>,
    rng: Box<dyn RngCore>,
    requested: (usize, usize),
    busy: bool,
    iterations: u64,
}

impl std::fmt::Debug for StepRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepRunner")
            .field("requested", &self.requested)
            .field("busy", &self.busy)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

impl StepRunner {
    /// Creates a runner with its own RNG: seeded from `config.seed` when
    /// given, otherwise from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the configured dimensions are zero or the
    /// rule table has no states.
    pub fn new(rules: Arc<AdjacencyRules>, config: &RunnerConfig) -> Result<Self, GridError> {
        let rng: Box<dyn RngCore> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        Self::with_rng(rules, config, rng)
    }

    /// Creates a runner drawing from a caller-supplied RNG.
    ///
    /// Injecting the RNG makes whole collapse traces reproducible; tests
    /// pass deterministic sources here.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the configured dimensions are zero or the
    /// rule table has no states.
    pub fn with_rng(
        rules: Arc<AdjacencyRules>,
        config: &RunnerConfig,
        rng: Box<dyn RngCore>,
    ) -> Result<Self, GridError> {
        let grid = CellGrid::new(config.width, config.height, rules.num_states())?;
        Ok(Self {
            grid,
            propagator: config.sweep.propagator(),
            rng,
            requested: (config.width, config.height),
            busy: false,
            iterations: 0,
            rules,
        })
    }

    /// Runs one solver step.
    ///
    /// In order: skip if the previous render handoff never completed;
    /// discard and rebuild the grid if requested dimensions changed; collapse
    /// one lowest-entropy cell; run one propagation sweep; hand the collapsed
    /// cells to `renderer`.
    ///
    /// # Errors
    ///
    /// Returns [`WfcError::Contradiction`] when the selector is forced onto
    /// a cell with no states left, [`WfcError::Grid`] if a pending resize is
    /// invalid, and [`WfcError::Render`] when the renderer fails. A render
    /// failure releases the handoff guard before surfacing; only a renderer
    /// panic leaves the runner wedged, which mirrors never finishing the
    /// handoff.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) -> Result<TickReport, WfcError> {
        if self.busy {
            debug!("tick skipped: render handoff still in flight");
            return Ok(TickReport {
                iteration: self.iterations,
                skipped: true,
                reset: false,
                collapsed: None,
                cells_updated: 0,
                contradictions: 0,
                collapsed_cells: self.grid.collapsed_cells(),
                total_cells: self.grid.total_cells(),
            });
        }

        self.iterations += 1;

        let mut reset = false;
        if (self.grid.width, self.grid.height) != self.requested {
            let (width, height) = self.requested;
            self.grid = CellGrid::new(width, height, self.rules.num_states())?;
            reset = true;
            info!("grid reset to {width}x{height}, prior progress discarded");
        }

        let collapsed = collapse_random(&mut self.grid, &mut self.rng)?;
        if let Some(collapse) = collapsed {
            debug!(
                "iteration {}: collapsed cell ({}, {}) to state {}",
                self.iterations, collapse.row, collapse.col, collapse.state
            );
        }

        let sweep = self.propagator.propagate(&mut self.grid, &self.rules);
        if sweep.contradictions > 0 {
            warn!(
                "{} cell(s) contradicted after {}",
                sweep.contradictions,
                self.propagator.name()
            );
        }

        let cells: Vec<RenderCell> = self
            .grid
            .iter()
            .filter_map(|((row, col), cell)| {
                cell.resolved().map(|state| RenderCell { row, col, state })
            })
            .collect();
        let frame = Frame {
            width: self.grid.width,
            height: self.grid.height,
            cells: &cells,
        };

        self.busy = true;
        let handoff = renderer.render(&frame);
        self.busy = false;
        handoff?;

        Ok(TickReport {
            iteration: self.iterations,
            skipped: false,
            reset,
            collapsed,
            cells_updated: sweep.cells_updated,
            contradictions: sweep.contradictions,
            collapsed_cells: self.grid.collapsed_cells(),
            total_cells: self.grid.total_cells(),
        })
    }

    /// Requests new grid dimensions, applied at the start of the next tick.
    ///
    /// The current grid keeps serving until then; the rebuild discards all
    /// collapse progress.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] immediately for zero dimensions,
    /// leaving the pending request unchanged.
    pub fn set_dimensions(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        self.requested = (width, height);
        Ok(())
    }

    /// The current grid.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Whether a render handoff is currently in flight.
    pub fn in_flight(&self) -> bool {
        self.busy
    }

    /// Completed (non-skipped) ticks so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// True once every cell is collapsed.
    pub fn is_fully_collapsed(&self) -> bool {
        self.grid.collapsed_cells() == self.grid.total_cells()
    }
}
