// tilewave-core/tests/runner_tests.rs
use std::sync::Arc;

use rand::rngs::mock::StepRng;
use tilewave_core::{
    ContradictionError, Frame, NullRenderer, RenderCell, RenderError, Renderer, RunnerConfig,
    StepRunner, SweepMode, WfcError,
};
use tilewave_rules::{tracks, AdjacencyRules, TileState};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// StepRng::new(0, 0) makes every uniform draw land on index 0: the first
// candidate in scan order and the lowest remaining state always win, so the
// whole collapse trace is hand-checkable.
fn tracks_runner(width: usize, height: usize) -> StepRunner {
    let config = RunnerConfig {
        width,
        height,
        seed: None,
        sweep: SweepMode::RowMajor,
    };
    StepRunner::with_rng(
        Arc::new(tracks::rules()),
        &config,
        Box::new(StepRng::new(0, 0)),
    )
    .unwrap()
}

/// Renderer that keeps a copy of every frame it was handed.
#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<Vec<RenderCell>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.frames.push(frame.cells.to_vec());
        Ok(())
    }
}

/// Renderer that always refuses the handoff.
struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&mut self, _frame: &Frame<'_>) -> Result<(), RenderError> {
        Err(RenderError("display went away".to_string()))
    }
}

const A: TileState = TileState(0);
const B: TileState = TileState(1);

// Both states forbid every eastern neighbor, so the first collapse starves
// the cell to its right.
fn dead_end_rules() -> AdjacencyRules {
    let table: [[&[TileState]; 4]; 2] = [
        [&[A, B], &[], &[A, B], &[A, B]],
        [&[A, B], &[], &[A, B], &[A, B]],
    ];
    AdjacencyRules::new(&table).unwrap()
}

#[test]
fn two_by_two_tracks_grid_collapses_fully() {
    init_logs();
    let mut runner = tracks_runner(2, 2);
    let mut renderer = RecordingRenderer::default();

    // Under the zero RNG each tick commits the first lowest-entropy cell to
    // its lowest remaining state, which on the track table is always blank.
    for tick in 1..=4u64 {
        let report = runner.tick(&mut renderer).unwrap();
        assert!(!report.skipped);
        assert_eq!(report.iteration, tick);
        assert!(report.collapsed.is_some());
        assert_eq!(report.collapsed_cells as u64, tick);
        assert_eq!(report.contradictions, 0);
    }

    assert!(runner.is_fully_collapsed());
    for ((row, col), cell) in runner.grid().iter() {
        assert!(cell.is_collapsed(), "cell ({row}, {col}) never collapsed");
        assert_eq!(cell.resolved(), Some(tracks::BLANK));
    }

    // One frame per tick, each carrying exactly the cells committed so far.
    let sizes: Vec<usize> = renderer.frames.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![1, 2, 3, 4]);
}

#[test]
fn ticks_after_completion_leave_the_grid_alone() {
    let mut runner = tracks_runner(2, 2);
    for _ in 0..4 {
        runner.tick(&mut NullRenderer).unwrap();
    }
    assert!(runner.is_fully_collapsed());
    let settled = runner.grid().clone();

    let report = runner.tick(&mut NullRenderer).unwrap();
    assert_eq!(report.collapsed, None);
    assert!(report.is_complete());
    assert_eq!(runner.grid(), &settled);
}

#[test]
fn renderer_receives_only_committed_cells() {
    let mut runner = tracks_runner(3, 3);
    let mut renderer = RecordingRenderer::default();

    runner.tick(&mut renderer).unwrap();

    // Propagation narrowed the collapse's neighbors, but narrowing is not
    // commitment: the frame carries the one selected cell and nothing else.
    assert_eq!(renderer.frames.len(), 1);
    assert_eq!(
        renderer.frames[0],
        vec![RenderCell {
            row: 0,
            col: 0,
            state: tracks::BLANK,
        }]
    );
}

#[test]
fn resize_discards_all_progress() {
    let mut runner = tracks_runner(2, 2);
    runner.tick(&mut NullRenderer).unwrap();
    let report = runner.tick(&mut NullRenderer).unwrap();
    assert_eq!(report.collapsed_cells, 2);

    runner.set_dimensions(3, 3).unwrap();
    let report = runner.tick(&mut NullRenderer).unwrap();

    assert!(report.reset);
    assert_eq!(report.iteration, 3);
    assert_eq!(runner.grid().width, 3);
    assert_eq!(runner.grid().height, 3);
    assert_eq!(report.total_cells, 9);
    // Only the fresh tick's own collapse survives the rebuild.
    assert_eq!(report.collapsed_cells, 1);
    let open = runner
        .grid()
        .iter()
        .filter(|(_, cell)| !cell.is_collapsed())
        .count();
    assert_eq!(open, 8);
}

#[test]
fn unchanged_dimensions_never_reset() {
    let mut runner = tracks_runner(2, 2);
    runner.tick(&mut NullRenderer).unwrap();
    runner.set_dimensions(2, 2).unwrap();
    let report = runner.tick(&mut NullRenderer).unwrap();
    assert!(!report.reset);
    assert_eq!(report.collapsed_cells, 2);
}

#[test]
fn contradiction_surfaces_through_the_selector() {
    init_logs();
    let config = RunnerConfig {
        width: 2,
        height: 1,
        seed: None,
        sweep: SweepMode::RowMajor,
    };
    let mut runner = StepRunner::with_rng(
        Arc::new(dead_end_rules()),
        &config,
        Box::new(StepRng::new(0, 0)),
    )
    .unwrap();

    // The first tick succeeds but its sweep starves the eastern cell.
    let report = runner.tick(&mut NullRenderer).unwrap();
    assert_eq!(report.contradictions, 1);
    assert_eq!(runner.grid().contradicted(), Some((0, 1)));

    // The starved cell wins the next entropy scan at zero, and collapsing
    // it has nothing to commit.
    let err = runner.tick(&mut NullRenderer).unwrap_err();
    assert_eq!(
        err,
        WfcError::Contradiction(ContradictionError { row: 0, col: 1 })
    );
}

#[test]
fn render_failure_releases_the_handoff_guard() {
    let mut runner = tracks_runner(2, 2);

    let err = runner.tick(&mut FailingRenderer).unwrap_err();
    assert_eq!(
        err,
        WfcError::Render(RenderError("display went away".to_string()))
    );

    // The guard was cleared and the tick's solver work kept: the run can
    // continue with a renderer that cooperates.
    assert!(!runner.in_flight());
    assert_eq!(runner.grid().collapsed_cells(), 1);
    let report = runner.tick(&mut NullRenderer).unwrap();
    assert!(!report.skipped);
    assert_eq!(report.iteration, 2);
    assert_eq!(report.collapsed_cells, 2);
}

#[test]
fn seeded_runs_reproduce_the_same_trace() {
    let config = RunnerConfig {
        width: 4,
        height: 4,
        seed: Some(42),
        sweep: SweepMode::RowMajor,
    };
    let rules = Arc::new(tracks::rules());
    let mut first = StepRunner::new(Arc::clone(&rules), &config).unwrap();
    let mut second = StepRunner::new(rules, &config).unwrap();

    for _ in 0..200 {
        let a = first.tick(&mut NullRenderer);
        let b = second.tick(&mut NullRenderer);
        assert_eq!(a, b);
        match a {
            Ok(report) if report.is_complete() => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }
    assert_eq!(first.grid(), second.grid());
}
