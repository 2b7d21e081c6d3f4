//! EngagingEnemy: shoot, strike or close the distance

use crate::ai::actions::{try_melee_attack, try_ranged_attack};
use crate::ai::geometry::has_cardinal_sight;
use crate::ai::movement::{step_to, valid_moves};
use crate::ai::perception::has_clear_line_of_sight;
use crate::ai::states::{snapshot, wait, Action, AiContext, StateHandler, Step};
use crate::core::error::AiError;
use crate::core::types::{GridPos, UnitId};
use crate::world::state::GameState;
use crate::world::unit::{AiState, Unit};

pub struct EngagingHandler;

impl StateHandler for EngagingHandler {
    fn state(&self) -> AiState {
        AiState::EngagingEnemy
    }

    fn handle(
        &self,
        state: &mut GameState,
        id: UnitId,
        ctx: &mut AiContext<'_>,
    ) -> Result<Step, AiError> {
        let config = ctx.config;
        let (enemy, pos) = snapshot(state, id)?;

        let Some(target_id) = enemy.target_enemy else {
            return Ok(Step::Reevaluate);
        };
        let target = match state.unit(target_id) {
            Some(unit) if unit.is_active() => unit.clone(),
            _ => return Ok(drop_target(state, id)),
        };
        if !has_clear_line_of_sight(&enemy.unit, &target, enemy.detection_range, state) {
            return Ok(drop_target(state, id));
        }

        if enemy.unit.hp_ratio() < config.ai.flee_hp_ratio {
            if let Some(enemy) = state.enemy_mut(id) {
                enemy.transition(AiState::Fleeing);
            }
            return Ok(Step::Reevaluate);
        }

        if try_ranged_attack(state, id, target_id, &config.combat)
            || try_melee_attack(state, id, target_id, &config.combat)
        {
            return Ok(Step::Acted(Action::Attacked));
        }

        let Some(target_pos) = target.position else {
            return Ok(drop_target(state, id));
        };
        let Some(dest) = closing_move(state, id, pos, target_pos) else {
            return Ok(wait(state, id, "no way to close in"));
        };

        if exposed_to(&target, dest, state, config.combat.ranged_range)
            && ctx.rng.chance(config.ai.engage_hesitation_chance)
        {
            return Ok(wait(state, id, "hesitates under fire"));
        }

        step_to(state, id, dest, "engage", &config.combat);
        Ok(Step::Acted(Action::Moved))
    }
}

fn drop_target(state: &mut GameState, id: UnitId) -> Step {
    if let Some(enemy) = state.enemy_mut(id) {
        enemy.target_enemy = None;
    }
    Step::Reevaluate
}

/// First valid move that brings the enemy closest to the target without
/// increasing the distance
fn closing_move(state: &GameState, id: UnitId, from: GridPos, target: GridPos) -> Option<GridPos> {
    let current = from.manhattan(&target);
    let mut best: Option<(GridPos, u32)> = None;
    for pos in valid_moves(state, id) {
        let distance = pos.manhattan(&target);
        if distance > current {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((pos, distance));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Whether `target` could shoot back at a unit standing on `cell`
fn exposed_to(target: &Unit, cell: GridPos, state: &GameState, range: u32) -> bool {
    match target.position {
        Some(from) if target.ammo > 0 => has_cardinal_sight(&state.map, from, cell, range),
        _ => false,
    }
}
