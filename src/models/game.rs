use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move one step along `direction`. Returns `None` when the step would
    /// leave the non-negative quadrant; the upper bound is the grid's concern.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let row = self.row.checked_add_signed(direction.d_row as isize)?;
        let col = self.col.checked_add_signed(direction.d_col as isize)?;
        Some(Position { row, col })
    }
}

/// One of the eight straight-line unit vectors on the grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Direction {
    pub d_row: i8,
    pub d_col: i8,
}

impl Direction {
    pub const EAST: Direction = Direction::new(0, 1);
    pub const SOUTH: Direction = Direction::new(1, 0);
    pub const SOUTH_EAST: Direction = Direction::new(1, 1);
    pub const SOUTH_WEST: Direction = Direction::new(1, -1);
    pub const WEST: Direction = Direction::new(0, -1);
    pub const NORTH: Direction = Direction::new(-1, 0);
    pub const NORTH_WEST: Direction = Direction::new(-1, -1);
    pub const NORTH_EAST: Direction = Direction::new(-1, 1);

    pub const ALL: [Direction; 8] = [
        Self::EAST,
        Self::SOUTH,
        Self::SOUTH_EAST,
        Self::SOUTH_WEST,
        Self::WEST,
        Self::NORTH,
        Self::NORTH_WEST,
        Self::NORTH_EAST,
    ];

    const fn new(d_row: i8, d_col: i8) -> Self {
        Self { d_row, d_col }
    }

    /// Sign vector pointing from `from` towards `to`, or `None` if they are the same cell.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        let d_row = sign(to.row, from.row);
        let d_col = sign(to.col, from.col);
        if d_row == 0 && d_col == 0 {
            None
        } else {
            Some(Direction { d_row, d_col })
        }
    }
}

fn sign(to: usize, from: usize) -> i8 {
    match to.cmp(&from) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Square letter matrix, stored row-major. Every cell holds exactly one
/// uppercase ASCII letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Build a grid from its rows, e.g. `["CATX", "DOGX", ...]`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> GameResult<Self> {
        let size = rows.len();
        if size < 2 {
            return Err(GameError::InvalidGridSize(size));
        }

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref().to_ascii_uppercase();
            if row.chars().count() != size {
                return Err(GameError::InvalidGridSize(size));
            }
            if let Some(bad) = row.chars().find(|c| !c.is_ascii_uppercase()) {
                return Err(GameError::InvalidWord {
                    word: bad.to_string(),
                    reason: "grid cells must be letters",
                });
            }
            cells.extend(row.chars());
        }

        Ok(Self { size, cells })
    }

    /// Caller guarantees `cells.len() == size * size` and every cell is a letter.
    pub(crate) fn from_cells(size: usize, cells: Vec<char>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        if self.contains(pos) {
            Some(self.cells[pos.row * self.size + pos.col])
        } else {
            None
        }
    }

    /// Rows as strings, top to bottom. This is what the presentation surface renders.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Concatenate the letters under `path`. Returns `None` if any cell is off the grid.
    pub fn letters_at(&self, path: &[Position]) -> Option<String> {
        path.iter().map(|pos| self.get(*pos)).collect()
    }
}

/// Where a word sits on the grid: the direction it runs in and every cell
/// it occupies in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    pub direction: Direction,
    pub cells: Vec<Position>,
}

impl Placement {
    pub fn start(&self) -> Position {
        self.cells[0]
    }

    pub fn end(&self) -> Position {
        self.cells[self.cells.len() - 1]
    }
}

/// Word → placement for every word that made it onto the grid.
pub type Placements = BTreeMap<String, Placement>;

/// Everything the presentation surface needs to draw a found word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundRecord {
    pub word: String,
    /// First and last cell of the player's selection, for the overlay line
    pub start: Position,
    pub end: Position,
    pub color: String,
    /// True when the word was selected from its last letter to its first
    pub reversed: bool,
    /// Seconds since the previous find, or since the round started for the first one
    pub duration_seconds: u64,
    pub elapsed_seconds: u64,
    pub found_at: DateTime<Utc>,
}

/// Emitted once when every active word has been found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_id: Uuid,
    pub total_seconds: u64,
    pub average_seconds: f64,
    pub word_times: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_between_uses_sign_vector() {
        let origin = Position::new(2, 2);
        assert_eq!(Direction::between(origin, Position::new(2, 5)), Some(Direction::EAST));
        assert_eq!(Direction::between(origin, Position::new(0, 0)), Some(Direction::NORTH_WEST));
        // Not on a straight line, but the sign vector still picks a diagonal
        assert_eq!(Direction::between(origin, Position::new(5, 3)), Some(Direction::SOUTH_EAST));
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn test_all_directions_are_distinct_unit_vectors() {
        for (i, a) in Direction::ALL.iter().enumerate() {
            assert!(a.d_row != 0 || a.d_col != 0, "Zero vector is not a direction");
            assert!(a.d_row.abs() <= 1 && a.d_col.abs() <= 1);
            for b in &Direction::ALL[i + 1..] {
                assert_ne!(a, b, "Directions must be unique");
            }
        }
    }

    #[test]
    fn test_step_refuses_negative_coordinates() {
        assert_eq!(Position::new(0, 0).step(Direction::NORTH), None);
        assert_eq!(Position::new(0, 3).step(Direction::SOUTH_WEST), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_grid_from_rows() {
        let grid = Grid::from_rows(&["cat", "DOG", "ZZZ"]).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.get(Position::new(0, 0)), Some('C'));
        assert_eq!(grid.get(Position::new(3, 0)), None);
        assert_eq!(grid.rows(), vec!["CAT", "DOG", "ZZZ"]);
    }

    #[test]
    fn test_grid_from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(&["CAT", "DO", "ZZZ"]).is_err());
        assert!(Grid::from_rows(&["C1T", "DOG", "ZZZ"]).is_err());
        assert!(Grid::from_rows(&["C"]).is_err());
    }

    #[test]
    fn test_letters_at() {
        let grid = Grid::from_rows(&["CAT", "DOG", "ZZZ"]).unwrap();
        let path = [Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)];
        assert_eq!(grid.letters_at(&path).as_deref(), Some("TOZ"));
        assert_eq!(grid.letters_at(&[Position::new(0, 9)]), None);
    }
}
