//! Transition policy run before every handler attempt
//!
//! Priority: threat (flee or engage), healing, resource seeking, exploring.
//! The first rule that applies wins.

use crate::ai::perception::{find_nearby_resource, find_nearest_visible_enemy};
use crate::core::config::AiConfig;
use crate::core::error::AiError;
use crate::core::types::UnitId;
use crate::world::log::{LogLevel, LogTarget};
use crate::world::map::ResourceKind;
use crate::world::state::GameState;
use crate::world::unit::{AiState, ResourceTarget};

/// Re-evaluate an enemy's state and targets from what it currently perceives
pub fn reevaluate(state: &mut GameState, id: UnitId, ai: &AiConfig) -> Result<AiState, AiError> {
    let enemy = state.enemy(id).ok_or(AiError::UnitNotFound(id))?.clone();
    if enemy.unit.position.is_none() {
        return Err(AiError::NotPlaced(id));
    }
    let hp_ratio = enemy.unit.hp_ratio();
    let wounded = hp_ratio < ai.heal_hp_ratio;

    let mut target_enemy = None;
    let mut target_resource = None;

    let next = if let Some(threat) = find_nearest_visible_enemy(&enemy, state) {
        target_enemy = Some(threat);
        if hp_ratio < ai.flee_hp_ratio {
            AiState::Fleeing
        } else {
            AiState::EngagingEnemy
        }
    } else if wounded && enemy.unit.medkits > 0 {
        AiState::Healing
    } else {
        let mut wanted = Vec::with_capacity(2);
        if wounded {
            wanted.push(ResourceKind::Medkit);
        }
        if enemy.unit.ammo <= ai.low_ammo_threshold {
            wanted.push(ResourceKind::Ammo);
        }

        target_resource = wanted.into_iter().find_map(|kind| {
            find_nearby_resource(&enemy.unit, enemy.detection_range, kind, state)
                .map(|pos| ResourceTarget { pos, kind })
        });

        if target_resource.is_some() {
            AiState::SeekingResources
        } else {
            AiState::Exploring
        }
    };

    let previous = enemy.state;
    if let Some(enemy) = state.enemy_mut(id) {
        enemy.target_enemy = target_enemy;
        enemy.target_resource = target_resource;
        enemy.transition(next);
    }
    if previous != next {
        state.record(
            format!("{} {} -> {}", id, previous.name(), next.name()),
            LogLevel::Debug,
            LogTarget::Ai,
            None,
        );
    }

    Ok(next)
}
