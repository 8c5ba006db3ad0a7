use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// A cell coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Manhattan (L1) distance, the number of orthogonal steps between two cells
    pub fn manhattan(&self, other: &Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan(other) == 1
    }
}

/// Orthogonal neighbor offsets as (row, col): up, right, down, left.
/// Expansion order follows this array, which keeps search traces deterministic.
const DIRS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Structural data for one grid cell. Search progress is kept outside the
/// cell, in [`crate::search_state::SearchState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    pub is_start: bool,
    pub is_finish: bool,
    pub is_wall: bool,
    /// Manhattan distance to the finish cell, fixed at grid creation
    pub heuristic_cost: u32,
}

/// Result of a wall toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallToggle {
    /// The cell flipped; carries the new wall state
    Toggled { is_wall: bool },
    /// Start and finish always stay walkable, so the request was ignored
    Endpoint,
    /// The coordinate lies outside the grid and the request was ignored
    OutOfBounds,
}

/// Fixed-size row-major grid with exactly one start and one finish cell
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    start: Position,
    finish: Position,
    /// Revision number - incremented whenever a wall changes
    revision: u64,
}

impl Grid {
    /// Create a wall-free grid.
    ///
    /// Fails with [`GridError::InvalidConfiguration`] when a dimension is not
    /// positive, an endpoint lies outside the grid, or start equals finish.
    pub fn new(rows: i32, cols: i32, start: Position, finish: Position) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }
        let len = rows.checked_mul(cols).ok_or_else(|| {
            GridError::invalid(format!("grid dimensions {}x{} overflow the cell count", rows, cols))
        })?;
        let in_bounds = |p: Position| p.row >= 0 && p.row < rows && p.col >= 0 && p.col < cols;
        if !in_bounds(start) {
            return Err(GridError::invalid(format!(
                "start ({},{}) lies outside a {}x{} grid",
                start.row, start.col, rows, cols
            )));
        }
        if !in_bounds(finish) {
            return Err(GridError::invalid(format!(
                "finish ({},{}) lies outside a {}x{} grid",
                finish.row, finish.col, rows, cols
            )));
        }
        if start == finish {
            return Err(GridError::invalid(format!(
                "start and finish coincide at ({},{})",
                start.row, start.col
            )));
        }

        let mut cells = Vec::with_capacity(len as usize);
        for row in 0..rows {
            for col in 0..cols {
                let position = Position::new(row, col);
                cells.push(Cell {
                    position,
                    is_start: position == start,
                    is_finish: position == finish,
                    is_wall: false,
                    heuristic_cost: position.manhattan(&finish),
                });
            }
        }

        Ok(Grid {
            rows,
            cols,
            cells,
            start,
            finish,
            revision: 0,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn finish(&self) -> Position {
        self.finish
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    /// Convert a position to its row-major cell index
    pub fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.col + pos.row * self.cols) as usize)
        } else {
            None
        }
    }

    /// Convert a cell index back to its position
    pub fn position(&self, index: usize) -> Position {
        let index = index as i32;
        Position::new(index / self.cols, index % self.cols)
    }

    pub fn start_index(&self) -> usize {
        (self.start.col + self.start.row * self.cols) as usize
    }

    pub fn finish_index(&self) -> usize {
        (self.finish.col + self.finish.row * self.cols) as usize
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Walls and out-of-bounds positions are both treated as blocked
    pub fn is_wall(&self, pos: Position) -> bool {
        self.cell(pos).map_or(true, |c| c.is_wall)
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall).count()
    }

    /// Flip the wall flag of a cell.
    ///
    /// Start and finish are never turned into walls and out-of-bounds
    /// coordinates are ignored. Neither case is an error; the returned
    /// [`WallToggle`] says which branch was taken.
    pub fn toggle_wall(&mut self, row: i32, col: i32) -> WallToggle {
        match self.editable_index(Position::new(row, col)) {
            Ok(i) => {
                let cell = &mut self.cells[i];
                cell.is_wall = !cell.is_wall;
                self.revision += 1;
                WallToggle::Toggled { is_wall: cell.is_wall }
            }
            Err(ignored) => ignored,
        }
    }

    /// Set the wall flag of a cell, with the same guards as [`Grid::toggle_wall`].
    /// The revision only changes when the flag actually changes.
    pub fn set_wall(&mut self, row: i32, col: i32, is_wall: bool) -> WallToggle {
        match self.editable_index(Position::new(row, col)) {
            Ok(i) => {
                let cell = &mut self.cells[i];
                if cell.is_wall != is_wall {
                    cell.is_wall = is_wall;
                    self.revision += 1;
                }
                WallToggle::Toggled { is_wall }
            }
            Err(ignored) => ignored,
        }
    }

    /// Remove every wall
    pub fn clear_walls(&mut self) {
        let mut changed = false;
        for cell in self.cells.iter_mut().filter(|c| c.is_wall) {
            cell.is_wall = false;
            changed = true;
        }
        if changed {
            self.revision += 1;
        }
    }

    fn editable_index(&self, pos: Position) -> Result<usize, WallToggle> {
        let i = self.index(pos).ok_or(WallToggle::OutOfBounds)?;
        if pos == self.start || pos == self.finish {
            return Err(WallToggle::Endpoint);
        }
        Ok(i)
    }

    /// In-bounds orthogonal neighbors of a cell index, in up/right/down/left order.
    /// Walls are included; the search decides what to do with them.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let pos = self.position(index);
        DIRS.iter()
            .filter_map(move |&(dr, dc)| self.index(Position::new(pos.row + dr, pos.col + dc)))
    }
}
