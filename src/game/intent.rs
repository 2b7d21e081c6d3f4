//! Player intents and the headless autopilot that produces them

use std::str::FromStr;

use crate::ai::actions::{try_ranged_attack, use_medkit};
use crate::ai::movement::{step_to, valid_moves};
use crate::ai::perception::{has_clear_cardinal_line_of_sight, safe_zone_center};
use crate::core::config::GameConfig;
use crate::core::error::UnknownIntent;
use crate::core::types::{Direction, GridPos, UnitId};
use crate::world::log::{LogLevel, LogTarget};
use crate::world::state::GameState;

/// One player decision for a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    Move(Direction),
    Shoot(Direction),
    UseMedkit,
    Wait,
}

impl FromStr for PlayerIntent {
    type Err = UnknownIntent;

    /// Accepts `up`, `move_up`, `shoot_up` (and the other directions),
    /// `heal`/`medkit` and `wait`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let direction = |name: &str| match name {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        };

        let intent = match key.as_str() {
            "wait" | "skip" => Some(PlayerIntent::Wait),
            "heal" | "medkit" | "use_medkit" => Some(PlayerIntent::UseMedkit),
            other => {
                if let Some(dir) = other.strip_prefix("shoot_") {
                    direction(dir).map(PlayerIntent::Shoot)
                } else {
                    direction(other.strip_prefix("move_").unwrap_or(other)).map(PlayerIntent::Move)
                }
            }
        };

        intent.ok_or_else(|| UnknownIntent(s.to_string()))
    }
}

/// Carry out the player's intent. Returns `false` if it had no effect.
pub fn apply_player_intent(
    state: &mut GameState,
    intent: PlayerIntent,
    config: &GameConfig,
) -> bool {
    if !state.player.is_active() {
        return false;
    }

    match intent {
        PlayerIntent::Move(direction) => {
            let Some(pos) = state.player.position else {
                return false;
            };
            let dest = pos.offset(direction);
            if !valid_moves(state, UnitId::PLAYER).contains(&dest) {
                state.record(
                    "You can't move there".to_string(),
                    LogLevel::Info,
                    LogTarget::Main,
                    None,
                );
                return false;
            }
            step_to(state, UnitId::PLAYER, dest, "player", &config.combat);
            true
        }
        PlayerIntent::Shoot(direction) => {
            let target = first_unit_in_line(state, direction, config.combat.ranged_range);
            match target {
                Some(id) => try_ranged_attack(state, UnitId::PLAYER, id, &config.combat),
                None => {
                    state.record(
                        "Nothing to shoot at".to_string(),
                        LogLevel::Info,
                        LogTarget::Combat,
                        None,
                    );
                    false
                }
            }
        }
        PlayerIntent::UseMedkit => use_medkit(state, UnitId::PLAYER, config.combat.medkit_heal),
        PlayerIntent::Wait => true,
    }
}

/// First living unit along `direction` from the player, stopping at cover
fn first_unit_in_line(state: &GameState, direction: Direction, range: u32) -> Option<UnitId> {
    let mut cursor = state.player.position?;
    for _ in 0..range {
        cursor = cursor.offset(direction);
        if let Some(unit) = state.unit_at(cursor) {
            return Some(unit.id);
        }
        if state.map.blocks_sight(cursor) {
            return None;
        }
    }
    None
}

/// Simple scripted player used by the headless runner
///
/// Shoots the first enemy in a clear cardinal line, heals when hurt, keeps
/// inside the safe zone and otherwise holds position.
pub fn autopilot(state: &GameState, config: &GameConfig) -> PlayerIntent {
    let player = &state.player;
    let Some(pos) = player.position else {
        return PlayerIntent::Wait;
    };

    if player.ammo > 0 {
        let range = config.combat.ranged_range;
        for enemy in state.enemies.iter().filter(|e| e.unit.is_active()) {
            if has_clear_cardinal_line_of_sight(player, &enemy.unit, range, state) {
                if let Some(direction) = enemy.unit.position.and_then(|to| direction_to(pos, to)) {
                    return PlayerIntent::Shoot(direction);
                }
            }
        }
    }

    if player.hp_ratio() < config.ai.heal_hp_ratio && player.medkits > 0 {
        return PlayerIntent::UseMedkit;
    }

    if !state.zone.contains(pos) {
        let center = safe_zone_center(state);
        let best = valid_moves(state, UnitId::PLAYER)
            .into_iter()
            .min_by_key(|p| p.manhattan(&center));
        if let Some(dest) = best {
            if let Some(direction) = direction_to(pos, dest) {
                return PlayerIntent::Move(direction);
            }
        }
    }

    PlayerIntent::Wait
}

/// Cardinal direction from `from` toward `to`, if they share a row or column
fn direction_to(from: GridPos, to: GridPos) -> Option<Direction> {
    if from == to || !from.is_cardinal_to(&to) {
        return None;
    }
    Some(if to.row < from.row {
        Direction::Up
    } else if to.row > from.row {
        Direction::Down
    } else if to.col < from.col {
        Direction::Left
    } else {
        Direction::Right
    })
}
