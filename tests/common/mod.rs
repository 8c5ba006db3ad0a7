#![allow(dead_code)]

use pathviz::layout::parse_layout;
use pathviz::{Grid, Position};
use std::collections::{HashSet, VecDeque};

/// The board the visualizer starts with: 20x50, start (10,15), finish (10,35)
pub fn classic_grid() -> Grid {
    Grid::new(20, 50, Position::new(10, 15), Position::new(10, 35)).unwrap()
}

pub fn grid_from(text: &str) -> Grid {
    parse_layout(text).unwrap_or_else(|e| panic!("bad test layout: {}", e))
}

/// Independent flood fill from start over non-wall cells
pub fn reachable_cells(grid: &Grid) -> HashSet<Position> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(grid.start());
    queue.push_back(grid.start());

    while let Some(pos) = queue.pop_front() {
        for (dr, dc) in [(-1, 0), (0, 1), (1, 0), (0, -1)] {
            let next = Position::new(pos.row + dr, pos.col + dc);
            if grid.in_bounds(next) && !grid.is_wall(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Shortest step count by plain BFS, used as an oracle
pub fn bfs_steps(grid: &Grid) -> Option<usize> {
    let mut dist = vec![usize::MAX; grid.len()];
    let mut queue = VecDeque::new();
    let start = grid.start_index();
    dist[start] = 0;
    queue.push_back(start);

    while let Some(i) = queue.pop_front() {
        if i == grid.finish_index() {
            return Some(dist[i]);
        }
        for n in grid.neighbors(i) {
            if !grid.cell_at(n).is_wall && dist[n] == usize::MAX {
                dist[n] = dist[i] + 1;
                queue.push_back(n);
            }
        }
    }
    None
}
