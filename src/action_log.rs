use crate::pathfinding::{Algorithm, SearchOutcome};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// User actions in the visualizer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// A wall was flipped at (row, col)
    ToggleWall { row: i32, col: i32, is_wall: bool },
    /// All walls were removed
    ClearWalls { removed: usize },
    /// A search was run and its replay started
    Run {
        algorithm: Algorithm,
        found: bool,
        visited: usize,
        path_len: usize,
    },
    /// The search overlay was cleared
    ResetSearch,
    /// The grid layout was copied to the clipboard
    CopyLayout,
}

impl Action {
    pub fn run(outcome: &SearchOutcome, path_len: usize) -> Self {
        Action::Run {
            algorithm: outcome.algorithm,
            found: outcome.found,
            visited: outcome.visited,
            path_len,
        }
    }
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Session action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
        });
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.actions)
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut walls_added = 0;
        let mut walls_removed = 0;
        let mut clears = 0;
        let mut runs = 0;
        let mut runs_without_path = 0;
        let mut cells_visited = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::ToggleWall { is_wall: true, .. } => walls_added += 1,
                Action::ToggleWall { is_wall: false, .. } => walls_removed += 1,
                Action::ClearWalls { removed } => {
                    clears += 1;
                    walls_removed += removed;
                }
                Action::Run { found, visited, .. } => {
                    runs += 1;
                    cells_visited += visited;
                    if !found {
                        runs_without_path += 1;
                    }
                }
                Action::ResetSearch | Action::CopyLayout => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Walls: {} added, {} removed ({} clears)\n\
             Searches: {} runs, {} without a path, {} cells visited",
            duration,
            self.actions.len(),
            walls_added,
            walls_removed,
            clears,
            runs,
            runs_without_path,
            cells_visited
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_edits_and_runs() {
        let mut log = ActionLog::new();
        log.log(Action::ToggleWall { row: 1, col: 1, is_wall: true });
        log.log(Action::ToggleWall { row: 1, col: 2, is_wall: true });
        log.log(Action::ToggleWall { row: 1, col: 2, is_wall: false });
        log.log(Action::run(
            &SearchOutcome { algorithm: Algorithm::Astar, found: false, visited: 12 },
            0,
        ));
        log.log(Action::ClearWalls { removed: 1 });

        let summary = log.summary();
        assert!(summary.contains("Total Events: 5"));
        assert!(summary.contains("Walls: 2 added, 2 removed (1 clears)"));
        assert!(summary.contains("Searches: 1 runs, 1 without a path, 12 cells visited"));
    }

    #[test]
    fn serializes_actions_to_json() {
        let mut log = ActionLog::new();
        log.log(Action::ResetSearch);
        let json = log.to_json().unwrap();
        let back: Vec<LoggedAction> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].action, Action::ResetSearch);
    }
}
