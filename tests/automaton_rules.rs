mod common;

use common::GridBuilder;
use conways_voronoi_core::automaton::CellState;

#[test]
fn test_exact_threshold_activates() {
    // (5, 5) has three active neighbors and no active state of its own.
    let (mut automaton, mut sampler) = GridBuilder::new(10, 10)
        .with_active(4, 4)
        .with_active(6, 4)
        .with_active(5, 6)
        .build();

    automaton.step(&mut sampler);
    assert_eq!(automaton.grid().get(5, 5), CellState::Active);
}

#[test]
fn test_single_neighbor_deactivates() {
    let (mut automaton, mut sampler) = GridBuilder::new(10, 10)
        .with_active(3, 3)
        .with_active(4, 3)
        .build();

    automaton.step(&mut sampler);
    assert_eq!(automaton.grid().get(3, 3), CellState::Inactive);
    assert_eq!(automaton.grid().get(4, 3), CellState::Inactive);
    assert_eq!(automaton.active_count(), 0);
}

#[test]
fn test_crowded_cell_deactivates() {
    // Center of a plus shape sees four neighbors.
    let (mut automaton, mut sampler) = GridBuilder::new(10, 10)
        .with_active(5, 5)
        .with_active(4, 5)
        .with_active(6, 5)
        .with_active(5, 4)
        .with_active(5, 6)
        .build();

    automaton.step(&mut sampler);
    assert_eq!(automaton.grid().get(5, 5), CellState::Inactive);
}

#[test]
fn test_blinker_oscillates() {
    let (mut automaton, mut sampler) = GridBuilder::new(10, 10).with_blinker(5, 5).build();

    automaton.step(&mut sampler);
    let grid = automaton.grid();
    assert_eq!(grid.get(5, 4), CellState::Active);
    assert_eq!(grid.get(5, 5), CellState::Active);
    assert_eq!(grid.get(5, 6), CellState::Active);
    assert_eq!(grid.get(4, 5), CellState::Inactive);
    assert_eq!(grid.get(6, 5), CellState::Inactive);

    automaton.step(&mut sampler);
    let grid = automaton.grid();
    assert_eq!(grid.get(4, 5), CellState::Active);
    assert_eq!(grid.get(6, 5), CellState::Active);
    assert_eq!(automaton.active_count(), 3);
    assert_eq!(automaton.generation(), 2);
}

#[test]
fn test_rule_reads_previous_generation() {
    // A block is stable only if every cell sees the old generation.
    let (mut automaton, mut sampler) = GridBuilder::new(8, 8)
        .with_active(3, 3)
        .with_active(4, 3)
        .with_active(3, 4)
        .with_active(4, 4)
        .build();

    for _ in 0..5 {
        automaton.step(&mut sampler);
    }
    let grid = automaton.grid();
    for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
        assert_eq!(grid.get(x, y), CellState::Active);
    }
    assert_eq!(automaton.active_count(), 4);
}

#[test]
fn test_custom_threshold() {
    let (mut automaton, mut sampler) = GridBuilder::new(10, 10)
        .with_config(|c| c.neighbors_to_be_active = 2)
        .with_active(4, 4)
        .with_active(6, 4)
        .build();

    automaton.step(&mut sampler);
    assert_eq!(automaton.grid().get(5, 4), CellState::Active);
    assert_eq!(automaton.grid().get(5, 3), CellState::Active);
    assert_eq!(automaton.grid().get(5, 5), CellState::Active);
}

#[test]
fn test_cells_near_border_do_not_touch_it() {
    let (mut automaton, mut sampler) = GridBuilder::new(6, 6)
        .with_active(1, 1)
        .with_active(2, 1)
        .with_active(1, 2)
        .build();

    automaton.step(&mut sampler);
    common::assert_border_intact(&automaton);
    assert_eq!(automaton.grid().get(2, 2), CellState::Active);
}
