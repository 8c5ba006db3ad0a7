use crate::grid::{Grid, Position};

/// Tentative distance of a cell no run has reached
pub const UNREACHABLE: u32 = u32::MAX;

const UNDISCOVERED: u64 = u64::MAX;

/// Per-run search bookkeeping, indexed by cell index.
///
/// The grid only carries structure (walls, endpoints, heuristic). Everything
/// a run writes lives here, so a grid can be shared by reference while a
/// single `SearchState` is owned by the active run and reused between runs
/// through [`SearchState::reset`].
#[derive(Debug, Clone)]
pub struct SearchState {
    pub(crate) distances: Vec<u32>,
    pub(crate) visited: Vec<bool>,
    pub(crate) predecessors: Vec<Option<usize>>,
    /// Order in which each cell first entered the frontier, for tie-breaking
    pub(crate) discovered: Vec<u64>,
    pub(crate) trace: Vec<usize>,
    next_discovery: u64,
}

impl SearchState {
    pub fn new(grid: &Grid) -> Self {
        let len = grid.len();
        SearchState {
            distances: vec![UNREACHABLE; len],
            visited: vec![false; len],
            predecessors: vec![None; len],
            discovered: vec![UNDISCOVERED; len],
            trace: Vec::new(),
            next_discovery: 0,
        }
    }

    /// Restore every cell to distance = +inf, unvisited, no predecessor,
    /// keeping the allocations.
    pub fn reset(&mut self) {
        self.distances.fill(UNREACHABLE);
        self.visited.fill(false);
        self.predecessors.fill(None);
        self.discovered.fill(UNDISCOVERED);
        self.trace.clear();
        self.next_discovery = 0;
    }

    /// Reset for a run on `grid`, resizing only if the grid size changed
    pub(crate) fn prepare(&mut self, grid: &Grid) {
        if self.distances.len() != grid.len() {
            *self = SearchState::new(grid);
        } else {
            self.reset();
        }
    }

    /// Discovery rank of a cell, assigned the first time it is asked for
    pub(crate) fn discover(&mut self, index: usize) -> u64 {
        if self.discovered[index] == UNDISCOVERED {
            self.discovered[index] = self.next_discovery;
            self.next_discovery += 1;
        }
        self.discovered[index]
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn distance(&self, grid: &Grid, pos: Position) -> Option<u32> {
        grid.index(pos)
            .map(|i| self.distances[i])
            .filter(|&d| d != UNREACHABLE)
    }

    pub fn is_visited(&self, grid: &Grid, pos: Position) -> bool {
        grid.index(pos).is_some_and(|i| self.visited[i])
    }

    pub fn predecessor(&self, grid: &Grid, pos: Position) -> Option<Position> {
        grid.index(pos)
            .and_then(|i| self.predecessors[i])
            .map(|p| grid.position(p))
    }

    pub(crate) fn predecessor_index(&self, index: usize) -> Option<usize> {
        self.predecessors[index]
    }

    /// Cell indices in the order the run finalized them
    pub fn trace(&self) -> &[usize] {
        &self.trace
    }

    pub fn trace_positions(&self, grid: &Grid) -> Vec<Position> {
        self.trace.iter().map(|&i| grid.position(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_initial_values() {
        let grid = Grid::new(3, 3, Position::new(0, 0), Position::new(2, 2)).unwrap();
        let mut state = SearchState::new(&grid);
        state.distances[4] = 2;
        state.visited[4] = true;
        state.predecessors[4] = Some(1);
        state.trace.push(4);
        assert_eq!(state.discover(4), 0);
        assert_eq!(state.discover(5), 1);
        assert_eq!(state.discover(4), 0);

        state.reset();
        let mid = Position::new(1, 1);
        assert_eq!(state.distance(&grid, mid), None);
        assert!(!state.is_visited(&grid, mid));
        assert_eq!(state.predecessor(&grid, mid), None);
        assert!(state.trace().is_empty());
        assert_eq!(state.discover(5), 0);
        assert_eq!(state.len(), 9);
    }

    #[test]
    fn prepare_resizes_for_a_different_grid() {
        let small = Grid::new(2, 2, Position::new(0, 0), Position::new(1, 1)).unwrap();
        let large = Grid::new(4, 4, Position::new(0, 0), Position::new(3, 3)).unwrap();
        let mut state = SearchState::new(&small);
        state.prepare(&large);
        assert_eq!(state.len(), 16);
    }
}
