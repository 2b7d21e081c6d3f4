//! The storm: damage outside the safe zone and periodic zone shrinking

use crate::core::config::StormConfig;
use crate::core::types::UnitId;
use crate::world::log::{LogLevel, LogTarget};
use crate::world::state::GameState;

/// Damage every living unit standing outside the safe zone
///
/// Returns the ids of the units that were hit.
pub fn apply_storm_damage(state: &mut GameState, storm: &StormConfig) -> Vec<UnitId> {
    if storm.damage == 0 {
        return Vec::new();
    }

    let exposed: Vec<UnitId> = state
        .active_units()
        .filter(|u| u.position.is_some_and(|pos| !state.zone.contains(pos)))
        .map(|u| u.id)
        .collect();

    for &id in &exposed {
        let Some(unit) = state.unit_mut(id) else {
            continue;
        };
        let lethal = unit.take_damage(storm.damage);
        let hp = unit.hp;

        state.record(
            format!("The storm hits {} for {} ({} HP left)", id, storm.damage, hp),
            LogLevel::Info,
            LogTarget::Combat,
            Some("storm"),
        );
        if lethal {
            state.record(
                format!("{} was consumed by the storm", id),
                LogLevel::Info,
                LogTarget::Main,
                Some("elimination"),
            );
        }
    }

    exposed
}

/// Shrink the zone if this turn is a shrink turn. Returns `true` if it shrank.
pub fn shrink_zone_if_due(state: &mut GameState, storm: &StormConfig) -> bool {
    if storm.shrink_interval == 0 || state.turn == 0 || state.turn % storm.shrink_interval != 0 {
        return false;
    }
    if !state.zone.shrink(storm.shrink_step, storm.min_size) {
        return false;
    }

    let zone = state.zone;
    tracing::info!(
        "Zone shrinks on turn {} to rows {}..={}, cols {}..={}",
        state.turn,
        zone.min_row,
        zone.max_row,
        zone.min_col,
        zone.max_col
    );
    state.record(
        format!("The safe zone shrinks to {}x{}", zone.height(), zone.width()),
        LogLevel::Warn,
        LogTarget::Main,
        Some("zone"),
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::GridPos;
    use crate::world::map::GameMap;
    use crate::world::unit::{Enemy, Unit};
    use crate::world::zone::SafeZone;

    fn create_state() -> GameState {
        let player = Unit::new(UnitId::PLAYER, 100).with_position(GridPos::new(5, 5));
        let enemies = vec![
            Enemy::new(Unit::new(UnitId(1), 4).with_position(GridPos::new(0, 0)), 4),
            Enemy::new(Unit::new(UnitId(2), 50).with_position(GridPos::new(6, 6)), 4),
        ];
        let mut state = GameState::new(GameMap::new(12, 12), player, enemies);
        state.zone = SafeZone::new(2, 9, 2, 9);
        state
    }

    #[test]
    fn test_storm_hits_only_outside_units() {
        let mut state = create_state();
        let storm = StormConfig::default();
        let hit = apply_storm_damage(&mut state, &storm);
        assert_eq!(hit, vec![UnitId(1)]);
        assert_eq!(state.player.hp, 100);
        assert!(!state.enemies[0].unit.is_alive());
        assert_eq!(state.log.with_style("elimination").count(), 1);
    }

    #[test]
    fn test_shrinks_on_interval_only() {
        let mut state = create_state();
        let storm = StormConfig::default();

        state.turn = 7;
        assert!(!shrink_zone_if_due(&mut state, &storm));

        state.turn = storm.shrink_interval;
        assert!(shrink_zone_if_due(&mut state, &storm));
        assert_eq!(state.zone, SafeZone::new(3, 8, 3, 8));
    }

    #[test]
    fn test_zone_stops_at_min_size() {
        let mut state = create_state();
        state.zone = SafeZone::new(4, 6, 4, 6);
        state.turn = 10;
        let storm = StormConfig::default();
        assert!(!shrink_zone_if_due(&mut state, &storm));
        assert_eq!(state.zone.height(), 3);
    }
}
