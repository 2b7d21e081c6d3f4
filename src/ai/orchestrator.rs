//! AI phase: every living enemy takes exactly one turn
//!
//! Enemies act one after another in the order they had when the phase
//! started. An enemy eliminated earlier in the phase is skipped. Each enemy
//! loops transition policy and handler until the handler acts or the
//! evaluation cap runs out.

use crate::ai::states::{dispatch, Action, AiContext, Step};
use crate::ai::transition::reevaluate;
use crate::core::error::AiError;
use crate::core::types::UnitId;
use crate::world::log::{LogLevel, LogTarget};
use crate::world::state::GameState;

/// Notifications the phase sends to whoever drives the game
pub trait PhaseHooks {
    /// Called after each enemy's turn. Returning `true` ends the phase.
    fn after_enemy_turn(&mut self, state: &mut GameState, _id: UnitId) -> bool {
        state.check_game_over()
    }

    /// Called once when the phase completes, halted or not
    fn end_ai_phase(&mut self, _state: &mut GameState) {}
}

/// Checks for game over after every enemy and nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHooks;

impl PhaseHooks for DefaultHooks {}

/// What happened during one AI phase
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    /// Enemies whose handler reported an action
    pub acted: usize,
    /// Enemies that hit the evaluation cap and waited
    pub capped: usize,
    /// Enemies whose processing failed and was skipped
    pub failed: usize,
    /// Dead or unplaced enemies passed over
    pub skipped: usize,
    /// The phase stopped early because the game ended
    pub halted: bool,
}

/// Advance every living enemy by one turn
pub fn run_ai_phase(
    state: &mut GameState,
    ctx: &mut AiContext<'_>,
    hooks: &mut dyn PhaseHooks,
) -> PhaseReport {
    run_ai_phase_with(state, ctx, hooks, take_turn)
}

/// Same as [`run_ai_phase`], with `turn` standing in for [`take_turn`]
pub fn run_ai_phase_with<F>(
    state: &mut GameState,
    ctx: &mut AiContext<'_>,
    hooks: &mut dyn PhaseHooks,
    mut turn: F,
) -> PhaseReport
where
    F: FnMut(&mut GameState, UnitId, &mut AiContext<'_>) -> Result<Option<Action>, AiError>,
{
    let mut report = PhaseReport::default();

    for id in state.enemy_ids() {
        if state.game_over {
            report.halted = true;
            break;
        }
        let active = state.enemy(id).is_some_and(|e| e.unit.is_active());
        if !active {
            report.skipped += 1;
            continue;
        }

        match turn(state, id, ctx) {
            Ok(Some(action)) => {
                tracing::trace!("{} turn {}: {:?}", id, state.turn, action);
                report.acted += 1;
            }
            Ok(None) => {
                state.record(
                    format!("{} ran out of evaluations and waits", id),
                    LogLevel::Debug,
                    LogTarget::Ai,
                    None,
                );
                report.capped += 1;
            }
            Err(err) => {
                state.record(
                    format!("AI error while processing {}: {}", id, err),
                    LogLevel::Error,
                    LogTarget::Ai,
                    None,
                );
                report.failed += 1;
            }
        }

        if hooks.after_enemy_turn(state, id) {
            report.halted = true;
            break;
        }
    }

    hooks.end_ai_phase(state);
    report
}

/// Transition and dispatch until the enemy acts. `None` means the cap was hit.
pub fn take_turn(
    state: &mut GameState,
    id: UnitId,
    ctx: &mut AiContext<'_>,
) -> Result<Option<Action>, AiError> {
    let cap = ctx.config.ai.evaluation_cap.max(1);
    for _ in 0..cap {
        reevaluate(state, id, &ctx.config.ai)?;
        if let Step::Acted(action) = dispatch(state, id, ctx)? {
            return Ok(Some(action));
        }
    }
    Ok(None)
}
