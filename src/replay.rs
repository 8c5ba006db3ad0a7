use crate::events::{EventSequence, PathEvent};
use crate::grid::Position;
use std::collections::HashMap;
use std::time::Duration;

/// How a replayed cell should be painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOverlay {
    Visited,
    Path,
}

/// Time-paced reveal of an [`EventSequence`].
///
/// Visited event `i` appears at `i * visited_step`. The route starts once the
/// exploration is fully shown and route cell `j` appears `j * path_step`
/// later. The replay owns a copy of the events and never touches the grid.
#[derive(Debug, Clone)]
pub struct Replay {
    events: Vec<PathEvent>,
    visited_count: usize,
    visited_step: Duration,
    path_step: Duration,
    elapsed: Duration,
    revealed: usize,
    overlay: HashMap<Position, CellOverlay>,
}

impl Replay {
    pub fn new(sequence: &EventSequence, visited_step: Duration, path_step: Duration) -> Self {
        Replay {
            events: sequence.iter().collect(),
            visited_count: sequence.visited_count(),
            visited_step,
            path_step,
            elapsed: Duration::ZERO,
            revealed: 0,
            overlay: HashMap::new(),
        }
    }

    /// Time at which event `i` becomes visible
    pub fn reveal_time(&self, i: usize) -> Duration {
        let steps = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        if i < self.visited_count {
            self.visited_step.saturating_mul(steps(i))
        } else {
            self.visited_step
                .saturating_mul(steps(self.visited_count))
                .saturating_add(self.path_step.saturating_mul(steps(i - self.visited_count)))
        }
    }

    /// Time at which the last event becomes visible
    pub fn total_duration(&self) -> Duration {
        match self.events.len() {
            0 => Duration::ZERO,
            n => self.reveal_time(n - 1),
        }
    }

    /// Move the clock forward and return the events revealed by this step
    pub fn advance(&mut self, dt: Duration) -> &[PathEvent] {
        self.elapsed += dt;
        let from = self.revealed;
        while self.revealed < self.events.len() && self.reveal_time(self.revealed) <= self.elapsed {
            let event = self.events[self.revealed];
            let overlay = if event.is_path_step() {
                CellOverlay::Path
            } else {
                CellOverlay::Visited
            };
            self.overlay.insert(event.position(), overlay);
            self.revealed += 1;
        }
        &self.events[from..self.revealed]
    }

    /// Reveal everything at once
    pub fn skip_to_end(&mut self) -> &[PathEvent] {
        let remaining = self.total_duration().saturating_sub(self.elapsed);
        self.advance(remaining)
    }

    pub fn revealed(&self) -> &[PathEvent] {
        &self.events[..self.revealed]
    }

    pub fn is_finished(&self) -> bool {
        self.revealed == self.events.len()
    }

    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.revealed = 0;
        self.overlay.clear();
    }

    pub fn cell_overlay(&self, pos: Position) -> Option<CellOverlay> {
        self.overlay.get(&pos).copied()
    }
}
