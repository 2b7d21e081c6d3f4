//! What an enemy can see: threats, resources and the zone centre

use crate::ai::geometry::{has_cardinal_sight, has_clear_sight};
use crate::core::types::{GridPos, UnitId};
use crate::world::map::ResourceKind;
use crate::world::state::GameState;
use crate::world::unit::{Enemy, Unit};

/// Cardinal line of sight between two placed units within `max_range`
pub fn has_clear_cardinal_line_of_sight(
    attacker: &Unit,
    target: &Unit,
    max_range: u32,
    state: &GameState,
) -> bool {
    match (attacker.position, target.position) {
        (Some(from), Some(to)) => has_cardinal_sight(&state.map, from, to, max_range),
        _ => false,
    }
}

/// All-angle line of sight between two placed units within `max_range`
pub fn has_clear_line_of_sight(a: &Unit, b: &Unit, max_range: u32, state: &GameState) -> bool {
    match (a.position, b.position) {
        (Some(from), Some(to)) => has_clear_sight(&state.map, from, to, max_range),
        _ => false,
    }
}

/// Nearest living opponent the enemy can see within its detection range
///
/// Everyone is an opponent in a battle royale: the player and every other
/// enemy. The player is considered first, then enemies in array order; on
/// equal distance the first one found wins.
pub fn find_nearest_visible_enemy(enemy: &Enemy, state: &GameState) -> Option<UnitId> {
    let me = &enemy.unit;
    let origin = me.position?;

    let mut best: Option<(UnitId, f64)> = None;
    for other in state.active_units() {
        if other.id == me.id {
            continue;
        }
        if !has_clear_line_of_sight(me, other, enemy.detection_range, state) {
            continue;
        }
        let Some(pos) = other.position else {
            continue;
        };
        let distance = origin.euclidean(&pos);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((other.id, distance));
        }
    }

    best.map(|(id, _)| id)
}

/// Nearest tile of `kind` within Manhattan `range`, inside the safe zone
/// and in clear sight of the unit
pub fn find_nearby_resource(
    unit: &Unit,
    range: u32,
    kind: ResourceKind,
    state: &GameState,
) -> Option<GridPos> {
    let origin = unit.position?;
    let wanted = kind.tile();
    let reach = i32::try_from(range).unwrap_or(i32::MAX);
    let last_row = state.map.rows() as i32 - 1;
    let last_col = state.map.cols() as i32 - 1;
    // scan box clipped to the map
    let rows = origin.row.saturating_sub(reach).max(0)
        ..=origin.row.saturating_add(reach).min(last_row);
    let cols = origin.col.saturating_sub(reach).max(0)
        ..=origin.col.saturating_add(reach).min(last_col);

    let mut best: Option<(GridPos, u32)> = None;
    for row in rows {
        for col in cols.clone() {
            let pos = GridPos::new(row, col);
            let distance = origin.manhattan(&pos);
            if distance > range {
                continue;
            }
            if state.map.get(pos) != Some(wanted) || !state.zone.contains(pos) {
                continue;
            }
            if !has_clear_sight(&state.map, origin, pos, range) {
                continue;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((pos, distance));
            }
        }
    }

    best.map(|(pos, _)| pos)
}

/// Rounded centre of the current safe zone
pub fn safe_zone_center(state: &GameState) -> GridPos {
    state.zone.center()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::map::{GameMap, TileKind};
    use crate::world::zone::SafeZone;

    fn state_with(enemies: Vec<Enemy>, player_pos: GridPos) -> GameState {
        let player = Unit::new(UnitId::PLAYER, 100).with_position(player_pos);
        GameState::new(GameMap::new(20, 20), player, enemies)
    }

    fn enemy_at(id: u32, pos: GridPos, range: u32) -> Enemy {
        Enemy::new(Unit::new(UnitId(id), 50).with_position(pos), range)
    }

    #[test]
    fn test_finds_player_in_range() {
        let state = state_with(vec![enemy_at(1, GridPos::new(5, 5), 6)], GridPos::new(5, 9));
        assert_eq!(
            find_nearest_visible_enemy(&state.enemies[0], &state),
            Some(UnitId::PLAYER)
        );
    }

    #[test]
    fn test_ignores_out_of_range_and_dead() {
        let mut state = state_with(
            vec![
                enemy_at(1, GridPos::new(5, 5), 4),
                enemy_at(2, GridPos::new(5, 7), 4),
            ],
            GridPos::new(15, 15),
        );
        state.enemies[1].unit.hp = 0;
        assert_eq!(find_nearest_visible_enemy(&state.enemies[0], &state), None);
    }

    #[test]
    fn test_prefers_closer_enemy_over_player() {
        let state = state_with(
            vec![
                enemy_at(1, GridPos::new(5, 5), 8),
                enemy_at(2, GridPos::new(5, 7), 8),
            ],
            GridPos::new(5, 11),
        );
        assert_eq!(
            find_nearest_visible_enemy(&state.enemies[0], &state),
            Some(UnitId(2))
        );
    }

    #[test]
    fn test_tie_goes_to_player() {
        let state = state_with(
            vec![
                enemy_at(1, GridPos::new(5, 5), 8),
                enemy_at(2, GridPos::new(5, 2), 8),
            ],
            GridPos::new(5, 8),
        );
        assert_eq!(
            find_nearest_visible_enemy(&state.enemies[0], &state),
            Some(UnitId::PLAYER)
        );
    }

    #[test]
    fn test_wall_hides_threat() {
        let mut state = state_with(vec![enemy_at(1, GridPos::new(5, 5), 8)], GridPos::new(5, 9));
        state.map.set(GridPos::new(5, 7), TileKind::Wall);
        assert_eq!(find_nearest_visible_enemy(&state.enemies[0], &state), None);
    }

    #[test]
    fn test_resource_found_within_range() {
        let mut state = state_with(vec![enemy_at(1, GridPos::new(5, 5), 6)], GridPos::new(15, 15));
        state.map.set(GridPos::new(5, 7), TileKind::Medkit);
        let unit = state.enemies[0].unit.clone();

        assert_eq!(
            find_nearby_resource(&unit, 3, ResourceKind::Medkit, &state),
            Some(GridPos::new(5, 7))
        );
        assert_eq!(find_nearby_resource(&unit, 1, ResourceKind::Medkit, &state), None);
        assert_eq!(find_nearby_resource(&unit, 3, ResourceKind::Ammo, &state), None);
    }

    #[test]
    fn test_resource_scan_with_huge_range_stays_on_map() {
        let mut state = state_with(vec![enemy_at(1, GridPos::new(0, 0), 6)], GridPos::new(10, 0));
        state.map.set(GridPos::new(19, 19), TileKind::Ammo);
        let unit = state.enemies[0].unit.clone();

        assert_eq!(
            find_nearby_resource(&unit, u32::MAX, ResourceKind::Ammo, &state),
            Some(GridPos::new(19, 19))
        );
    }

    #[test]
    fn test_resource_outside_zone_ignored() {
        let mut state = state_with(vec![enemy_at(1, GridPos::new(5, 5), 6)], GridPos::new(15, 15));
        state.map.set(GridPos::new(5, 3), TileKind::Ammo);
        state.zone = SafeZone::new(4, 19, 4, 19);
        let unit = state.enemies[0].unit.clone();
        assert_eq!(find_nearby_resource(&unit, 3, ResourceKind::Ammo, &state), None);
    }

    #[test]
    fn test_resource_picks_nearest() {
        let mut state = state_with(vec![enemy_at(1, GridPos::new(5, 5), 6)], GridPos::new(15, 15));
        state.map.set(GridPos::new(5, 8), TileKind::Ammo);
        state.map.set(GridPos::new(4, 5), TileKind::Ammo);
        let unit = state.enemies[0].unit.clone();
        assert_eq!(
            find_nearby_resource(&unit, 5, ResourceKind::Ammo, &state),
            Some(GridPos::new(4, 5))
        );
    }

    #[test]
    fn test_safe_zone_center() {
        let mut state = state_with(vec![], GridPos::new(0, 0));
        state.zone = SafeZone::new(2, 10, 4, 8);
        assert_eq!(safe_zone_center(&state), GridPos::new(6, 6));
    }
}
