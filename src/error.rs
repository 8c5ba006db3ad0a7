use thiserror::Error;

/// Errors raised while building a grid or selecting an algorithm.
///
/// A search that finds no route is not an error: it is reported through
/// [`crate::pathfinding::SearchOutcome`] and an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("unknown algorithm '{0}' (expected \"dijkstra\" or \"astar\")")]
    UnknownAlgorithm(String),
}

impl GridError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        GridError::InvalidConfiguration(reason.into())
    }
}
