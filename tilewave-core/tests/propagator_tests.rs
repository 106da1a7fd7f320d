// tilewave-core/tests/propagator_tests.rs
use tilewave_core::grid::CellGrid;
use tilewave_core::propagator::{ConstraintPropagator, SweepPropagator, TwoPhasePropagator};
use tilewave_rules::{tracks, AdjacencyRules, TileState};

const A: TileState = TileState(0);
const B: TileState = TileState(1);

// Two states that each tolerate only themselves on every side, so a collapse
// wants to spread its state down the whole row.
fn same_state_chain() -> AdjacencyRules {
    let table: [[&[TileState]; 4]; 2] = [
        [&[A], &[A], &[A], &[A]],
        [&[B], &[B], &[B], &[B]],
    ];
    AdjacencyRules::new(&table).unwrap()
}

// Both states forbid every eastern neighbor; collapsing any cell with a cell
// to its right forces that right cell to empty.
fn dead_end_east() -> AdjacencyRules {
    let table: [[&[TileState]; 4]; 2] = [
        [&[A, B], &[], &[A, B], &[A, B]],
        [&[A, B], &[], &[A, B], &[A, B]],
    ];
    AdjacencyRules::new(&table).unwrap()
}

fn possible_states(grid: &CellGrid, row: usize, col: usize) -> Vec<usize> {
    grid.get(row, col)
        .expect("coordinates in bounds")
        .possibilities()
        .iter_ones()
        .collect()
}

#[test]
fn single_collapse_narrows_the_four_neighbors() {
    let rules = tracks::rules();
    let mut grid = CellGrid::new(3, 3, rules.num_states()).unwrap();
    grid.get_mut(1, 1).unwrap().collapse_to(tracks::UP);

    let report = SweepPropagator.propagate(&mut grid, &rules);

    // An up piece opens west, north, and east, and is flat south.
    assert_eq!(
        possible_states(&grid, 0, 1),
        vec![tracks::RIGHT.0, tracks::DOWN.0, tracks::LEFT.0],
        "cell above must open south"
    );
    assert_eq!(
        possible_states(&grid, 1, 0),
        vec![tracks::UP.0, tracks::RIGHT.0, tracks::DOWN.0],
        "cell to the west must open east"
    );
    assert_eq!(
        possible_states(&grid, 1, 2),
        vec![tracks::UP.0, tracks::DOWN.0, tracks::LEFT.0],
        "cell to the east must open west"
    );
    assert_eq!(
        possible_states(&grid, 2, 1),
        vec![tracks::BLANK.0, tracks::DOWN.0],
        "cell below must be flat north"
    );

    // Under the track table a fully open neighbor never constrains, so the
    // diagonal corners keep all five states.
    for (row, col) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
        assert_eq!(
            possible_states(&grid, row, col).len(),
            5,
            "corner ({row}, {col}) should stay fully open"
        );
    }

    assert_eq!(report.cells_updated, 4);
    assert_eq!(report.contradictions, 0);
}

#[test]
fn row_major_sweep_sees_updates_from_earlier_in_the_pass() {
    let rules = same_state_chain();
    let mut grid = CellGrid::new(4, 1, rules.num_states()).unwrap();
    grid.get_mut(0, 0).unwrap().collapse_to(A);

    let report = SweepPropagator.propagate(&mut grid, &rules);

    // One in-place pass walks the collapse across the whole row: each cell
    // reads the neighbor the same pass just narrowed.
    for col in 1..4 {
        assert_eq!(possible_states(&grid, 0, col), vec![A.0]);
        assert!(
            !grid.get(0, col).unwrap().is_collapsed(),
            "narrowed cells are not committed"
        );
    }
    assert_eq!(report.cells_updated, 3);
}

#[test]
fn two_phase_sweep_reads_the_sweep_start_state() {
    let rules = same_state_chain();
    let mut grid = CellGrid::new(4, 1, rules.num_states()).unwrap();
    grid.get_mut(0, 0).unwrap().collapse_to(A);

    let report = TwoPhasePropagator.propagate(&mut grid, &rules);

    // Against the snapshot only the direct neighbor of the collapse narrows;
    // the rest saw fully open neighbors when the sweep began.
    assert_eq!(possible_states(&grid, 0, 1), vec![A.0]);
    assert_eq!(possible_states(&grid, 0, 2), vec![A.0, B.0]);
    assert_eq!(possible_states(&grid, 0, 3), vec![A.0, B.0]);
    assert_eq!(report.cells_updated, 1);
}

#[test]
fn empty_sets_are_reported_not_raised() {
    let rules = dead_end_east();
    let mut grid = CellGrid::new(2, 1, rules.num_states()).unwrap();
    grid.get_mut(0, 0).unwrap().collapse_to(A);

    let report = SweepPropagator.propagate(&mut grid, &rules);

    assert_eq!(report.contradictions, 1);
    assert_eq!(report.cells_updated, 1);
    let starved = grid.get(0, 1).unwrap();
    assert!(starved.is_contradicted());
    assert_eq!(starved.possibility_count(), 0);
    assert_eq!(grid.contradicted(), Some((0, 1)));
}

#[test]
fn empty_sets_spread_like_any_other_set() {
    let rules = dead_end_east();
    let mut grid = CellGrid::new(3, 1, rules.num_states()).unwrap();
    grid.get_mut(0, 0).unwrap().collapse_to(A);

    let report = SweepPropagator.propagate(&mut grid, &rules);

    // The collapse starves (0, 1), and the same pass then reads the freshly
    // emptied set when recomputing (0, 2): a union over no states allows
    // nothing, so the emptiness walks the row.
    assert!(grid.get(0, 1).unwrap().is_contradicted());
    assert!(grid.get(0, 2).unwrap().is_contradicted());
    assert_eq!(report.contradictions, 2);
    assert_eq!(report.cells_updated, 2);
}

#[test]
fn propagation_is_a_pure_function_of_its_input() {
    let rules = tracks::rules();
    let mut first = CellGrid::new(3, 3, rules.num_states()).unwrap();
    first.get_mut(0, 0).unwrap().collapse_to(tracks::BLANK);
    first.get_mut(1, 1).unwrap().collapse_to(tracks::RIGHT);
    let mut second = first.clone();

    let report_first = SweepPropagator.propagate(&mut first, &rules);
    let report_second = SweepPropagator.propagate(&mut second, &rules);

    assert_eq!(first, second);
    assert_eq!(report_first, report_second);
}

#[test]
fn collapsed_cells_survive_every_sweep() {
    let rules = tracks::rules();
    let mut grid = CellGrid::new(3, 3, rules.num_states()).unwrap();
    grid.get_mut(1, 1).unwrap().collapse_to(tracks::LEFT);

    for _ in 0..3 {
        SweepPropagator.propagate(&mut grid, &rules);
        let center = grid.get(1, 1).unwrap();
        assert!(center.is_collapsed());
        assert_eq!(center.resolved(), Some(tracks::LEFT));
        assert_eq!(center.possibility_count(), 1);
    }
}
