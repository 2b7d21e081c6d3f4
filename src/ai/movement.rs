//! Movement primitives shared by every state handler and the player
//!
//! Moves are one orthogonal step. Stepping onto a resource tile picks it up.

use crate::ai::random::RandomSource;
use crate::core::config::CombatConfig;
use crate::core::types::{GridPos, UnitId};
use crate::world::log::{LogLevel, LogTarget};
use crate::world::map::{ResourceKind, TileKind};
use crate::world::state::GameState;

/// Orthogonal neighbours the unit could step onto this turn
///
/// A cell qualifies when it is walkable and no other living unit stands on
/// it. Unknown or unplaced units have no moves.
pub fn valid_moves(state: &GameState, id: UnitId) -> Vec<GridPos> {
    let Some(origin) = state.unit(id).and_then(|u| u.position) else {
        return Vec::new();
    };
    let occupied = state.occupied_cells(id);

    origin
        .neighbors()
        .into_iter()
        .filter(|pos| state.map.is_walkable(*pos) && !occupied.contains(pos))
        .collect()
}

/// Step toward `target`, choosing the first move with minimal Manhattan distance
///
/// Returns `false` when the unit is boxed in.
pub fn move_towards(
    state: &mut GameState,
    id: UnitId,
    target: GridPos,
    reason: &str,
    combat: &CombatConfig,
) -> bool {
    let mut best: Option<(GridPos, u32)> = None;
    for pos in valid_moves(state, id) {
        let distance = pos.manhattan(&target);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((pos, distance));
        }
    }

    match best {
        Some((dest, _)) => {
            step_to(state, id, dest, reason, combat);
            true
        }
        None => false,
    }
}

/// Step onto a uniformly chosen valid neighbour
pub fn move_randomly(
    state: &mut GameState,
    id: UnitId,
    rng: &mut dyn RandomSource,
    combat: &CombatConfig,
) -> bool {
    let moves = valid_moves(state, id);
    if moves.is_empty() {
        return false;
    }
    let Some(&dest) = moves.get(rng.index(moves.len())) else {
        return false;
    };
    step_to(state, id, dest, "wander", combat);
    true
}

/// Move the unit to `dest` and collect whatever resource lies there
///
/// Callers are responsible for `dest` being one of the unit's valid moves.
pub fn step_to(
    state: &mut GameState,
    id: UnitId,
    dest: GridPos,
    reason: &str,
    combat: &CombatConfig,
) {
    let Some(unit) = state.unit_mut(id) else {
        return;
    };
    unit.position = Some(dest);

    state.record(
        format!("{} moves to {} ({})", id, dest, reason),
        LogLevel::Debug,
        LogTarget::Ai,
        None,
    );

    pick_up(state, id, dest, combat);
}

/// Collect the resource lying at `pos`, if any, and clear the tile
pub fn pick_up(state: &mut GameState, id: UnitId, pos: GridPos, combat: &CombatConfig) {
    let Some(kind) = state.map.get(pos).and_then(|tile| tile.resource()) else {
        return;
    };
    let amount = match kind {
        ResourceKind::Ammo => combat.ammo_pickup,
        ResourceKind::Medkit => combat.medkit_pickup,
    };

    let Some(unit) = state.unit_mut(id) else {
        return;
    };
    unit.add_resource(kind, amount);
    let (ammo, medkits) = (unit.ammo, unit.medkits);
    state.map.set(pos, TileKind::Land);

    state.record(
        format!(
            "{} picked up {} x{} (ammo {}, medkits {})",
            id,
            kind.name(),
            amount,
            ammo,
            medkits
        ),
        LogLevel::Info,
        LogTarget::Main,
        Some("pickup"),
    );
}
