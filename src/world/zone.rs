//! Shrinking safe zone

use serde::{Deserialize, Serialize};

use crate::core::types::GridPos;

/// Inclusive rectangle outside of which the storm deals damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeZone {
    pub min_row: i32,
    pub max_row: i32,
    pub min_col: i32,
    pub max_col: i32,
}

impl SafeZone {
    pub fn new(min_row: i32, max_row: i32, min_col: i32, max_col: i32) -> Self {
        Self {
            min_row,
            max_row,
            min_col,
            max_col,
        }
    }

    /// Zone covering the whole map
    pub fn covering(rows: u32, cols: u32) -> Self {
        Self::new(0, rows as i32 - 1, 0, cols as i32 - 1)
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.row >= self.min_row
            && pos.row <= self.max_row
            && pos.col >= self.min_col
            && pos.col <= self.max_col
    }

    /// Integer-rounded centroid
    pub fn center(&self) -> GridPos {
        let row = (f64::from(self.min_row + self.max_row) / 2.0).round() as i32;
        let col = (f64::from(self.min_col + self.max_col) / 2.0).round() as i32;
        GridPos::new(row, col)
    }

    pub fn height(&self) -> u32 {
        (self.max_row - self.min_row + 1).max(0) as u32
    }

    pub fn width(&self) -> u32 {
        (self.max_col - self.min_col + 1).max(0) as u32
    }

    /// Pull every side inward by `step`, keeping each axis at least
    /// `min_size` cells. The zone never grows.
    ///
    /// Returns `true` if the zone actually changed.
    pub fn shrink(&mut self, step: u32, min_size: u32) -> bool {
        let before = *self;
        let step = step as i32;
        let min_size = min_size.max(1);

        let shrink_axis = |lo: &mut i32, hi: &mut i32| {
            let size = (*hi - *lo + 1) as u32;
            if size <= min_size {
                return;
            }
            let max_step = ((size - min_size) / 2) as i32;
            let applied = step.min(max_step);
            *lo += applied;
            *hi -= applied;
        };

        shrink_axis(&mut self.min_row, &mut self.max_row);
        shrink_axis(&mut self.min_col, &mut self.max_col);

        *self != before
    }
}
