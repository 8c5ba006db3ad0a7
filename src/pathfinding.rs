use crate::error::GridError;
use crate::events::EventSequence;
use crate::grid::{Grid, Position};
use crate::path::reconstruct_path;
use crate::search_state::SearchState;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Search algorithm selectable from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Uniform-cost search, frontier ordered by distance from start
    #[default]
    #[serde(alias = "djiktra")]
    Dijkstra,
    /// Frontier ordered by distance from start plus Manhattan distance to finish
    #[serde(alias = "a*")]
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::Astar];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Astar => "astar",
        }
    }

    /// Frontier priority of a cell reached at `distance`
    fn priority(&self, grid: &Grid, index: usize, distance: u32) -> u32 {
        match self {
            Algorithm::Dijkstra => distance,
            Algorithm::Astar => distance + grid.cell_at(index).heuristic_cost,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dijkstra" | "djiktra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::Astar),
            _ => Err(GridError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Summary of one search run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub algorithm: Algorithm,
    /// Whether the finish cell was popped and finalized
    pub found: bool,
    /// Number of cells finalized, i.e. the trace length
    pub visited: usize,
}

/// A frontier entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierNode {
    index: usize,
    distance: u32,
    priority: u32,
    /// Discovery rank of the cell; earlier discovery wins ties
    discovered: u64,
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.discovered.cmp(&self.discovered))
            .then_with(|| other.distance.cmp(&self.distance))
    }
}

/// Run `algorithm` from the grid's start to its finish.
///
/// `state` is reset first, then filled with distances, predecessor links and
/// the finalization trace. The grid is only read. Walls are pushed onto the
/// frontier like any other neighbor but are skipped when popped, so they
/// never reach the trace.
pub fn run_search(grid: &Grid, algorithm: Algorithm, state: &mut SearchState) -> SearchOutcome {
    state.prepare(grid);

    let start = grid.start_index();
    let finish = grid.finish_index();

    debug!(
        %algorithm,
        rows = grid.rows(),
        cols = grid.cols(),
        walls = grid.wall_count(),
        "search started"
    );

    let mut frontier: BinaryHeap<FrontierNode> = BinaryHeap::new();
    state.distances[start] = 0;
    frontier.push(FrontierNode {
        index: start,
        distance: 0,
        priority: algorithm.priority(grid, start, 0),
        discovered: state.discover(start),
    });

    let mut found = false;
    while let Some(node) = frontier.pop() {
        let current = node.index;

        // Skip stale entries.
        if state.visited[current] || node.distance > state.distances[current] {
            continue;
        }

        if grid.cell_at(current).is_wall {
            continue;
        }

        state.visited[current] = true;
        state.trace.push(current);
        trace!(
            cell = ?grid.position(current),
            distance = node.distance,
            priority = node.priority,
            "finalized"
        );

        if current == finish {
            found = true;
            break;
        }

        let candidate = node.distance + 1;
        for next in grid.neighbors(current) {
            if state.visited[next] || candidate >= state.distances[next] {
                continue;
            }
            state.distances[next] = candidate;
            state.predecessors[next] = Some(current);
            frontier.push(FrontierNode {
                index: next,
                distance: candidate,
                priority: algorithm.priority(grid, next, candidate),
                discovered: state.discover(next),
            });
        }
    }

    let outcome = SearchOutcome {
        algorithm,
        found,
        visited: state.trace.len(),
    };
    debug!(%algorithm, found, visited = outcome.visited, "search finished");
    outcome
}

/// Uniform-cost search from start to finish
pub fn dijkstra(grid: &Grid, state: &mut SearchState) -> SearchOutcome {
    run_search(grid, Algorithm::Dijkstra, state)
}

/// A* search from start to finish, guided by the precomputed Manhattan heuristic
pub fn astar(grid: &Grid, state: &mut SearchState) -> SearchOutcome {
    run_search(grid, Algorithm::Astar, state)
}

/// Everything a renderer needs from one run
#[derive(Debug, Clone)]
pub struct RunResult {
    pub outcome: SearchOutcome,
    pub events: EventSequence,
}

/// Run a search, rebuild the route and sequence both for replay
pub fn run(grid: &Grid, algorithm: Algorithm, state: &mut SearchState) -> RunResult {
    let outcome = run_search(grid, algorithm, state);
    let path = reconstruct_path(grid, state);
    let events = EventSequence::new(state.trace_positions(grid), path);
    RunResult { outcome, events }
}

/// Format path for display
pub fn format_path(path: &[Position]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    let mut result = String::new();
    for (i, pos) in path.iter().enumerate() {
        if i > 0 {
            result.push_str(" -> ");
        }
        result.push_str(&format!("({},{})", pos.row, pos.col));
    }
    result
}
