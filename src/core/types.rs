//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for units. The player is always `UnitId::PLAYER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    pub const PLAYER: UnitId = UnitId(0);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn is_player(&self) -> bool {
        *self == Self::PLAYER
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_player() {
            write!(f, "player")
        } else {
            write!(f, "enemy#{}", self.0)
        }
    }
}

/// Game turn counter
pub type Turn = u32;

/// A cell on the grid, addressed by row and column.
///
/// Signed so that neighbours of edge cells can be expressed and then
/// rejected by bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Sum of absolute row and column differences
    pub fn manhattan(&self, other: &Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn euclidean(&self, other: &Self) -> f64 {
        let dr = f64::from(self.row - other.row);
        let dc = f64::from(self.col - other.col);
        (dr * dr + dc * dc).sqrt()
    }

    /// Shares a row or a column with `other`
    pub fn is_cardinal_to(&self, other: &Self) -> bool {
        self.row == other.row || self.col == other.col
    }

    pub fn offset(&self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Orthogonal neighbours in up, down, left, right order
    pub fn neighbors(&self) -> [GridPos; 4] {
        Direction::all().map(|d| self.offset(d))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = GridPos::new(2, 3);
        let b = GridPos::new(5, 1);
        assert_eq!(a.manhattan(&b), 5);
        assert_eq!(b.manhattan(&a), 5);
    }

    #[test]
    fn test_euclidean_distance() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 4);
        assert!((a.euclidean(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_cardinal_alignment() {
        let a = GridPos::new(4, 4);
        assert!(a.is_cardinal_to(&GridPos::new(4, 9)));
        assert!(a.is_cardinal_to(&GridPos::new(0, 4)));
        assert!(!a.is_cardinal_to(&GridPos::new(5, 5)));
    }

    #[test]
    fn test_neighbors_order() {
        let n = GridPos::new(3, 3).neighbors();
        assert_eq!(n[0], GridPos::new(2, 3));
        assert_eq!(n[1], GridPos::new(4, 3));
        assert_eq!(n[2], GridPos::new(3, 2));
        assert_eq!(n[3], GridPos::new(3, 4));
    }

    #[test]
    fn test_unit_id_display() {
        assert_eq!(UnitId::PLAYER.to_string(), "player");
        assert_eq!(UnitId(7).to_string(), "enemy#7");
    }
}
