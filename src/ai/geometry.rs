//! Grid line tracing and line-of-sight predicates
//!
//! Two sight rules exist on purpose. Attacks travel along a row or column
//! only, so `has_cardinal_sight` is the gate for shooting. Perception works
//! at any angle through `has_clear_sight`.

use crate::core::types::GridPos;
use crate::world::map::GameMap;

/// Upper bound on cells produced by a single trace
pub const MAX_TRACE_STEPS: usize = 1024;

/// Cells on the line from `from` to `to`, both inclusive (Bresenham)
///
/// The trace is always computed in a canonical direction, so tracing B to A
/// gives exactly the cells of A to B in reverse order.
pub fn trace_line(from: GridPos, to: GridPos) -> Vec<GridPos> {
    if (to.row, to.col) < (from.row, from.col) {
        let mut line = bresenham(to, from);
        line.reverse();
        line
    } else {
        bresenham(from, to)
    }
}

fn bresenham(from: GridPos, to: GridPos) -> Vec<GridPos> {
    let dx = (to.col - from.col).abs();
    let dy = -(to.row - from.row).abs();
    let sx = if from.col < to.col { 1 } else { -1 };
    let sy = if from.row < to.row { 1 } else { -1 };
    let mut err = dx + dy;

    let mut col = from.col;
    let mut row = from.row;
    let mut line = Vec::with_capacity((dx.max(-dy) as usize + 1).min(MAX_TRACE_STEPS));

    loop {
        line.push(GridPos::new(row, col));
        if (row == to.row && col == to.col) || line.len() >= MAX_TRACE_STEPS {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            col += sx;
        }
        if e2 <= dx {
            err += dx;
            row += sy;
        }
    }

    line
}

/// Straight row/column sight used for attacks
///
/// Fails closed: same cell, diagonal pairs, pairs beyond `max_range`
/// (Manhattan), endpoints off the map and any blocking cell in between all
/// return `false`.
pub fn has_cardinal_sight(map: &GameMap, from: GridPos, to: GridPos, max_range: u32) -> bool {
    let distance = from.manhattan(&to);
    if distance == 0 || distance > max_range || !from.is_cardinal_to(&to) {
        return false;
    }
    if !map.in_bounds(from) || !map.in_bounds(to) {
        return false;
    }

    let step_row = (to.row - from.row).signum();
    let step_col = (to.col - from.col).signum();
    let mut cursor = GridPos::new(from.row + step_row, from.col + step_col);
    while cursor != to {
        if map.blocks_sight(cursor) {
            return false;
        }
        cursor = GridPos::new(cursor.row + step_row, cursor.col + step_col);
    }

    true
}

/// All-angle sight used for perception
///
/// Range is Euclidean. Only the cells strictly between the endpoints are
/// checked for blockers.
pub fn has_clear_sight(map: &GameMap, from: GridPos, to: GridPos, max_range: u32) -> bool {
    if from.euclidean(&to) > f64::from(max_range) {
        return false;
    }

    let line = trace_line(from, to);
    if line.last() != Some(&to) {
        // trace was truncated
        return false;
    }

    line.iter()
        .skip(1)
        .take(line.len().saturating_sub(2))
        .all(|cell| !map.blocks_sight(*cell))
}
