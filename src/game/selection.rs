use crate::models::{Direction, Position};

/// Tracks one drag gesture across the grid.
///
/// The second cell locks a direction; after that the path only grows by
/// exactly one step along that direction at a time. Events that would bend
/// the line, jump cells, or revisit a cell are dropped individually and the
/// drag carries on.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    path: Vec<Position>,
    direction: Option<Direction>,
    active: bool,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer down: start a fresh path at `cell`.
    pub fn begin(&mut self, cell: Position) {
        self.path.clear();
        self.path.push(cell);
        self.direction = None;
        self.active = true;
    }

    /// Pointer entered `cell` while dragging. Returns whether the cell joined the path.
    pub fn extend(&mut self, cell: Position) -> bool {
        if !self.active || self.path.contains(&cell) {
            return false;
        }

        if self.path.len() == 1 {
            let Some(direction) = Direction::between(self.path[0], cell) else {
                return false;
            };
            self.direction = Some(direction);
            self.path.push(cell);
            return true;
        }

        let (Some(direction), Some(last)) = (self.direction, self.path.last()) else {
            return false;
        };
        if last.step(direction) == Some(cell) {
            self.path.push(cell);
            true
        } else {
            false
        }
    }

    /// Pointer up: hand back the finished path and reset for the next drag.
    /// Returns `None` if no drag was in progress.
    pub fn end(&mut self) -> Option<Vec<Position>> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.direction = None;
        Some(std::mem::take(&mut self.path))
    }

    /// Drop any in-progress drag without producing a path.
    pub fn cancel(&mut self) {
        self.path.clear();
        self.direction = None;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}
