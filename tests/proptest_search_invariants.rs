//! Property-based invariant tests for the search engine.
//!
//! 1. Dijkstra and A* agree on reachability and route length, and both match BFS.
//! 2. Routes are contiguous orthogonal walks from start to finish.
//! 3. Walls never appear in the trace or the route.
//! 4. No cell is finalized twice.
//! 5. Resetting and re-running reproduces the same events.
//! 6. Toggling a wall twice restores the board; endpoints never toggle.

mod common;

use common::bfs_steps;
use pathviz::path::{is_contiguous, step_count};
use pathviz::{run, Algorithm, Grid, Position, SearchState, WallToggle};
use proptest::prelude::*;
use std::collections::HashSet;

// ── Helpers ─────────────────────────────────────────────────────────────

/// A small board with random endpoints and a random wall mask
fn board_strategy() -> impl Strategy<Value = Grid> {
    (2i32..=9, 2i32..=9)
        .prop_flat_map(|(rows, cols)| {
            let n = (rows * cols) as usize;
            (
                Just(rows),
                Just(cols),
                0..n,
                0..n,
                prop::collection::vec(prop::bool::weighted(0.3), n),
            )
        })
        .prop_filter("endpoints must differ", |(_, _, s, f, _)| s != f)
        .prop_map(|(rows, cols, s, f, walls)| {
            let at = |i: usize| Position::new(i as i32 / cols, i as i32 % cols);
            let mut grid = Grid::new(rows, cols, at(s), at(f)).unwrap();
            for (i, wall) in walls.into_iter().enumerate() {
                if wall {
                    let p = at(i);
                    grid.toggle_wall(p.row, p.col);
                }
            }
            grid
        })
}

fn open_board_strategy() -> impl Strategy<Value = Grid> {
    board_strategy().prop_map(|mut grid| {
        grid.clear_walls();
        grid
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Both algorithms find equally short routes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn algorithms_agree_with_bfs(grid in board_strategy()) {
        let expected = bfs_steps(&grid);
        for algorithm in Algorithm::ALL {
            let mut state = SearchState::new(&grid);
            let result = run(&grid, algorithm, &mut state);
            prop_assert_eq!(result.outcome.found, expected.is_some(), "{} reachability", algorithm);
            let steps = result.events.has_path().then(|| step_count(result.events.path()));
            prop_assert_eq!(steps, expected, "{} route length", algorithm);
        }
    }

    #[test]
    fn open_boards_give_manhattan_routes(grid in open_board_strategy()) {
        let manhattan = grid.start().manhattan(&grid.finish()) as usize;
        for algorithm in Algorithm::ALL {
            let mut state = SearchState::new(&grid);
            let result = run(&grid, algorithm, &mut state);
            prop_assert!(result.outcome.found);
            prop_assert_eq!(step_count(result.events.path()), manhattan);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Route shape, walls and trace uniqueness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn routes_and_traces_are_well_formed(grid in board_strategy()) {
        for algorithm in Algorithm::ALL {
            let mut state = SearchState::new(&grid);
            let result = run(&grid, algorithm, &mut state);
            let events = &result.events;

            prop_assert!(events.visited().iter().all(|p| !grid.is_wall(*p)));
            prop_assert!(events.path().iter().all(|p| !grid.is_wall(*p)));

            let unique: HashSet<Position> = events.visited().iter().copied().collect();
            prop_assert_eq!(unique.len(), events.visited_count());

            if events.has_path() {
                prop_assert!(is_contiguous(events.path()));
                prop_assert_eq!(events.path().first(), Some(&grid.start()));
                prop_assert_eq!(events.path().last(), Some(&grid.finish()));
                prop_assert!(events.path().iter().all(|p| unique.contains(p)));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rerun_after_reset_is_deterministic(grid in board_strategy()) {
        for algorithm in Algorithm::ALL {
            let mut state = SearchState::new(&grid);
            let first = run(&grid, algorithm, &mut state);
            state.reset();
            let second = run(&grid, algorithm, &mut state);
            prop_assert_eq!(&first.events, &second.events);
            prop_assert_eq!(first.outcome, second.outcome);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Wall toggling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn double_toggle_restores_board(grid in board_strategy(), row in -1i32..10, col in -1i32..10) {
        let mut edited = grid.clone();
        let first = edited.toggle_wall(row, col);
        let second = edited.toggle_wall(row, col);
        prop_assert_eq!(edited.cells(), grid.cells());

        let pos = Position::new(row, col);
        if !grid.in_bounds(pos) {
            prop_assert_eq!(first, WallToggle::OutOfBounds);
            prop_assert_eq!(second, WallToggle::OutOfBounds);
        } else if pos == grid.start() || pos == grid.finish() {
            prop_assert_eq!(first, WallToggle::Endpoint);
            prop_assert_eq!(edited.revision(), grid.revision());
        } else {
            prop_assert_eq!(first, WallToggle::Toggled { is_wall: !grid.is_wall(pos) });
        }
    }
}
