use crate::grid::{Grid, Position};
use crate::search_state::SearchState;

/// Walk predecessor links back from the finish cell and return the route
/// ordered start to finish.
///
/// An empty route means the last run never reached the finish. That is a
/// normal outcome, not an error.
pub fn reconstruct_path(grid: &Grid, state: &SearchState) -> Vec<Position> {
    let start = grid.start_index();
    let finish = grid.finish_index();

    if finish != start && state.predecessor_index(finish).is_none() {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = Some(finish);
    while let Some(index) = current {
        path.push(grid.position(index));
        // A chain longer than the grid can only come from a corrupted state.
        if path.len() > grid.len() {
            return Vec::new();
        }
        current = state.predecessor_index(index);
    }
    path.reverse();
    path
}

/// Number of moves in a route (cells minus one)
pub fn step_count(path: &[Position]) -> usize {
    path.len().saturating_sub(1)
}

/// True when every consecutive pair of cells shares an edge
pub fn is_contiguous(path: &[Position]) -> bool {
    path.windows(2).all(|w| w[0].is_adjacent(&w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::dijkstra;

    #[test]
    fn no_predecessor_means_no_path() {
        let grid = Grid::new(2, 2, Position::new(0, 0), Position::new(1, 1)).unwrap();
        let state = SearchState::new(&grid);
        assert!(reconstruct_path(&grid, &state).is_empty());
    }

    #[test]
    fn path_runs_start_to_finish() {
        let grid = Grid::new(3, 4, Position::new(0, 0), Position::new(2, 3)).unwrap();
        let mut state = SearchState::new(&grid);
        dijkstra(&grid, &mut state);
        let path = reconstruct_path(&grid, &state);
        assert_eq!(path.first(), Some(&grid.start()));
        assert_eq!(path.last(), Some(&grid.finish()));
        assert_eq!(step_count(&path), 5);
        assert!(is_contiguous(&path));
    }

    #[test]
    fn contiguity_rejects_diagonals_and_gaps() {
        let diag = [Position::new(0, 0), Position::new(1, 1)];
        let gap = [Position::new(0, 0), Position::new(0, 2)];
        assert!(!is_contiguous(&diag));
        assert!(!is_contiguous(&gap));
        assert_eq!(step_count(&[]), 0);
    }
}
