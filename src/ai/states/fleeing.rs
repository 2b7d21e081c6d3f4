//! Fleeing: break line of sight with the threat or put distance between us

use crate::ai::actions::{try_melee_attack, try_ranged_attack};
use crate::ai::geometry::has_clear_sight;
use crate::ai::movement::{step_to, valid_moves};
use crate::ai::perception::has_clear_line_of_sight;
use crate::ai::states::{snapshot, wait, Action, AiContext, StateHandler, Step};
use crate::core::error::AiError;
use crate::core::types::{GridPos, UnitId};
use crate::world::log::{LogLevel, LogTarget};
use crate::world::state::GameState;
use crate::world::unit::AiState;

pub struct FleeingHandler;

impl StateHandler for FleeingHandler {
    fn state(&self) -> AiState {
        AiState::Fleeing
    }

    fn handle(
        &self,
        state: &mut GameState,
        id: UnitId,
        ctx: &mut AiContext<'_>,
    ) -> Result<Step, AiError> {
        let config = ctx.config;
        let (enemy, _) = snapshot(state, id)?;

        let Some(threat_id) = enemy.target_enemy else {
            return Ok(Step::Reevaluate);
        };
        let threat = match state.unit(threat_id) {
            Some(unit) if unit.is_active() => unit.clone(),
            _ => return Ok(drop_threat(state, id)),
        };
        let Some(threat_pos) = threat.position else {
            return Ok(drop_threat(state, id));
        };

        if !has_clear_line_of_sight(&enemy.unit, &threat, enemy.detection_range, state) {
            state.record(
                format!("{} slipped away from {}", id, threat_id),
                LogLevel::Info,
                LogTarget::Ai,
                None,
            );
            return Ok(drop_threat(state, id));
        }

        let moves = valid_moves(state, id);
        if moves.is_empty() {
            // cornered
            if try_ranged_attack(state, id, threat_id, &config.combat)
                || try_melee_attack(state, id, threat_id, &config.combat)
            {
                return Ok(Step::Acted(Action::Attacked));
            }
            return Ok(wait(state, id, "cornered"));
        }

        // furthest cell the threat cannot see
        let mut hidden: Option<(GridPos, u32)> = None;
        for &pos in &moves {
            if has_clear_sight(&state.map, threat_pos, pos, enemy.detection_range) {
                continue;
            }
            let distance = pos.manhattan(&threat_pos);
            if hidden.map_or(true, |(_, d)| distance > d) {
                hidden = Some((pos, distance));
            }
        }
        if let Some((dest, _)) = hidden {
            step_to(state, id, dest, "flee to cover", &config.combat);
            return Ok(Step::Acted(Action::Moved));
        }

        let safe: Vec<GridPos> = moves
            .into_iter()
            .filter(|pos| !next_to_other_enemy(state, id, *pos))
            .collect();
        let Some(furthest) = safe.iter().map(|pos| pos.manhattan(&threat_pos)).max() else {
            return Ok(wait(state, id, "nowhere safe to run"));
        };
        let best: Vec<GridPos> = safe
            .into_iter()
            .filter(|pos| pos.manhattan(&threat_pos) == furthest)
            .collect();
        let Some(&dest) = best.get(ctx.rng.index(best.len())) else {
            return Ok(wait(state, id, "no escape roll"));
        };

        step_to(state, id, dest, "flee", &config.combat);
        Ok(Step::Acted(Action::Moved))
    }
}

fn drop_threat(state: &mut GameState, id: UnitId) -> Step {
    if let Some(enemy) = state.enemy_mut(id) {
        enemy.target_enemy = None;
    }
    Step::Reevaluate
}

/// Whether `pos` touches a living enemy other than `id`
fn next_to_other_enemy(state: &GameState, id: UnitId, pos: GridPos) -> bool {
    state
        .enemies
        .iter()
        .filter(|e| e.id() != id && e.unit.is_active())
        .filter_map(|e| e.unit.position)
        .any(|other| other.manhattan(&pos) == 1)
}
