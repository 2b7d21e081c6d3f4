//! Healing: use a medkit, then go back to exploring

use crate::ai::actions::use_medkit;
use crate::ai::states::{snapshot, Action, AiContext, StateHandler, Step};
use crate::core::error::AiError;
use crate::core::types::UnitId;
use crate::world::state::GameState;
use crate::world::unit::AiState;

pub struct HealingHandler;

impl StateHandler for HealingHandler {
    fn state(&self) -> AiState {
        AiState::Healing
    }

    /// Never loops and always counts as the enemy's action
    fn handle(
        &self,
        state: &mut GameState,
        id: UnitId,
        ctx: &mut AiContext<'_>,
    ) -> Result<Step, AiError> {
        snapshot(state, id)?;
        let healed = use_medkit(state, id, ctx.config.combat.medkit_heal);

        if let Some(enemy) = state.enemy_mut(id) {
            enemy.transition(AiState::Exploring);
        }

        Ok(Step::Acted(if healed {
            Action::Healed
        } else {
            Action::Waited
        }))
    }
}
