use crate::grid::Position;
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::iter::FusedIterator;
use std::slice;

/// One step of a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(tag = "kind", content = "cell", rename_all = "snake_case")]
pub enum PathEvent {
    /// The search finalized this cell
    Visited(Position),
    /// This cell is part of the reconstructed route
    PathStep(Position),
}

impl PathEvent {
    pub fn position(&self) -> Position {
        match self {
            PathEvent::Visited(p) | PathEvent::PathStep(p) => *p,
        }
    }

    pub fn is_path_step(&self) -> bool {
        matches!(self, PathEvent::PathStep(_))
    }
}

/// Ordered record of a run: every visited cell, then every route cell.
///
/// The sequence carries no timing. Iterate it with [`EventSequence::iter`]
/// as many times as needed; each call starts from the beginning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSequence {
    visited: Vec<Position>,
    path: Vec<Position>,
}

impl EventSequence {
    pub fn new(visited: Vec<Position>, path: Vec<Position>) -> Self {
        EventSequence { visited, path }
    }

    pub fn iter(&self) -> Events<'_> {
        Events {
            visited: self.visited.iter(),
            path: self.path.iter(),
        }
    }

    pub fn visited(&self) -> &[Position] {
        &self.visited
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    pub fn len(&self) -> usize {
        self.visited.len() + self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty() && self.path.is_empty()
    }

    /// False is the "no path" signal for the renderer
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for EventSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'a> IntoIterator for &'a EventSequence {
    type Item = PathEvent;
    type IntoIter = Events<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over an [`EventSequence`]
#[derive(Debug, Clone)]
pub struct Events<'a> {
    visited: slice::Iter<'a, Position>,
    path: slice::Iter<'a, Position>,
}

impl Iterator for Events<'_> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        if let Some(&p) = self.visited.next() {
            return Some(PathEvent::Visited(p));
        }
        self.path.next().map(|&p| PathEvent::PathStep(p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.visited.len() + self.path.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Events<'_> {}

impl FusedIterator for Events<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EventSequence {
        EventSequence::new(
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 0)],
            vec![Position::new(0, 0), Position::new(0, 1)],
        )
    }

    #[test]
    fn visited_events_come_before_path_steps() {
        let events: Vec<_> = sample().iter().collect();
        assert_eq!(events.len(), 5);
        assert!(events[..3].iter().all(|e| !e.is_path_step()));
        assert!(events[3..].iter().all(|e| e.is_path_step()));
        assert_eq!(events[3], PathEvent::PathStep(Position::new(0, 0)));
    }

    #[test]
    fn iteration_restarts_from_the_beginning() {
        let seq = sample();
        let mut first = seq.iter();
        first.next();
        first.next();
        assert_eq!(first.len(), 3);
        assert_eq!(seq.iter().next(), Some(PathEvent::Visited(Position::new(0, 0))));
        assert_eq!(seq.iter().count(), seq.len());
    }

    #[test]
    fn empty_path_signals_no_route() {
        let seq = EventSequence::new(vec![Position::new(0, 0)], Vec::new());
        assert!(!seq.has_path());
        assert!(!seq.is_empty());
        assert!(seq.iter().all(|e| !e.is_path_step()));
    }

    #[test]
    fn serializes_as_tagged_event_list() {
        let seq = EventSequence::new(vec![Position::new(1, 2)], vec![Position::new(1, 2)]);
        let value: serde_json::Value = serde_json::from_str(&seq.to_json().unwrap()).unwrap();
        assert_eq!(value[0]["kind"], "visited");
        assert_eq!(value[0]["cell"]["row"], 1);
        assert_eq!(value[1]["kind"], "path_step");

        let back: Vec<PathEvent> = serde_json::from_value(value).unwrap();
        assert_eq!(back, seq.iter().collect::<Vec<_>>());
    }
}
