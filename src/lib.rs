pub mod action_log;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod layout;
pub mod path;
pub mod pathfinding;
pub mod replay;
pub mod search_state;

pub use error::GridError;
pub use events::{EventSequence, PathEvent};
pub use grid::{Cell, Grid, Position, WallToggle};
pub use path::reconstruct_path;
pub use pathfinding::{astar, dijkstra, run, run_search, Algorithm, RunResult, SearchOutcome};
pub use search_state::SearchState;
