//! Text form of a grid, used for test fixtures and clipboard export.
//!
//! Format, one line per row:
//! - `S`: start cell
//! - `F`: finish cell
//! - `■` or `#`: wall
//! - `□` or `.`: free cell
//! - `o`: visited cell (render only, parsed as free)
//! - `*`: route cell (render only, parsed as free)

use crate::error::GridError;
use crate::events::EventSequence;
use crate::grid::{Grid, Position};
use std::collections::HashSet;

/// Parse a grid from its text form
pub fn parse_layout(text: &str) -> Result<Grid, GridError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GridError::invalid("layout has no rows"));
    }

    let cols = lines[0].chars().count();
    let mut start = None;
    let mut finish = None;
    let mut walls = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        if line.chars().count() != cols {
            return Err(GridError::invalid(format!(
                "row {} has {} cells, expected {}",
                row,
                line.chars().count(),
                cols
            )));
        }
        for (col, ch) in line.chars().enumerate() {
            let pos = Position::new(row as i32, col as i32);
            match ch {
                'S' | 's' => {
                    if start.replace(pos).is_some() {
                        return Err(GridError::invalid("layout has more than one start"));
                    }
                }
                'F' | 'f' => {
                    if finish.replace(pos).is_some() {
                        return Err(GridError::invalid("layout has more than one finish"));
                    }
                }
                '■' | '#' => walls.push(pos),
                '□' | '.' | 'o' | '*' => {}
                other => {
                    return Err(GridError::invalid(format!(
                        "unexpected character '{}' at ({},{})",
                        other, row, col
                    )));
                }
            }
        }
    }

    let start = start.ok_or_else(|| GridError::invalid("layout has no start 'S'"))?;
    let finish = finish.ok_or_else(|| GridError::invalid("layout has no finish 'F'"))?;

    let mut grid = Grid::new(lines.len() as i32, cols as i32, start, finish)?;
    for pos in walls {
        grid.set_wall(pos.row, pos.col, true);
    }
    Ok(grid)
}

/// Render a grid, optionally overlaying the visited cells and route of a run
pub fn render_layout(grid: &Grid, events: Option<&EventSequence>) -> String {
    let (visited, path): (HashSet<Position>, HashSet<Position>) = match events {
        Some(seq) => (
            seq.visited().iter().copied().collect(),
            seq.path().iter().copied().collect(),
        ),
        None => (HashSet::new(), HashSet::new()),
    };

    let mut result = String::with_capacity(grid.len() + grid.rows() as usize);
    for cell in grid.cells() {
        let pos = cell.position;
        let symbol = if cell.is_start {
            'S'
        } else if cell.is_finish {
            'F'
        } else if cell.is_wall {
            '■'
        } else if path.contains(&pos) {
            '*'
        } else if visited.contains(&pos) {
            'o'
        } else {
            '□'
        };
        result.push(symbol);
        if pos.col == grid.cols() - 1 {
            result.push('\n');
        }
    }
    result
}
