//! State handlers for the enemy FSM
//!
//! Each handler runs one attempt for one enemy and reports whether the enemy
//! used its turn. Handlers are resolved once per state through
//! [`handler_for`], so every capability they need (perception, movement,
//! actions, logging) is a plain function call on `GameState`.

mod engaging;
mod exploring;
mod fleeing;
mod healing;
mod seeking;

pub use engaging::EngagingHandler;
pub use exploring::ExploringHandler;
pub use fleeing::FleeingHandler;
pub use healing::HealingHandler;
pub use seeking::SeekingHandler;

use crate::ai::random::RandomSource;
use crate::core::config::GameConfig;
use crate::core::error::AiError;
use crate::core::types::{GridPos, UnitId};
use crate::world::log::{LogLevel, LogTarget};
use crate::world::state::GameState;
use crate::world::unit::{AiState, Enemy};

/// What an enemy did with its attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Moved,
    Attacked,
    Healed,
    Waited,
}

/// Outcome of a single handler attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The enemy's turn is used up
    Acted(Action),
    /// Nothing happened; run the transition policy again
    Reevaluate,
}

impl Step {
    pub fn acted(&self) -> bool {
        matches!(self, Step::Acted(_))
    }
}

/// Collaborators shared by every handler during an AI phase
pub struct AiContext<'a> {
    pub config: &'a GameConfig,
    pub rng: &'a mut dyn RandomSource,
}

impl<'a> AiContext<'a> {
    pub fn new(config: &'a GameConfig, rng: &'a mut dyn RandomSource) -> Self {
        Self { config, rng }
    }
}

/// Behaviour for one FSM state
pub trait StateHandler {
    fn state(&self) -> AiState;

    fn handle(
        &self,
        state: &mut GameState,
        id: UnitId,
        ctx: &mut AiContext<'_>,
    ) -> Result<Step, AiError>;
}

/// Handler responsible for `ai_state`
pub fn handler_for(ai_state: AiState) -> &'static dyn StateHandler {
    match ai_state {
        AiState::Exploring => &ExploringHandler,
        AiState::SeekingResources => &SeekingHandler,
        AiState::EngagingEnemy => &EngagingHandler,
        AiState::Fleeing => &FleeingHandler,
        AiState::Healing => &HealingHandler,
    }
}

/// Run the handler matching the enemy's current state
pub fn dispatch(
    state: &mut GameState,
    id: UnitId,
    ctx: &mut AiContext<'_>,
) -> Result<Step, AiError> {
    let current = state.enemy(id).ok_or(AiError::UnitNotFound(id))?.state;
    handler_for(current).handle(state, id, ctx)
}

// === SHARED HELPERS ===

/// Copy of the acting enemy together with its position
pub(crate) fn snapshot(state: &GameState, id: UnitId) -> Result<(Enemy, GridPos), AiError> {
    let enemy = state.enemy(id).ok_or(AiError::UnitNotFound(id))?.clone();
    let pos = enemy.unit.position.ok_or(AiError::NotPlaced(id))?;
    Ok((enemy, pos))
}

/// Spend the turn doing nothing
pub(crate) fn wait(state: &mut GameState, id: UnitId, why: &str) -> Step {
    state.record(
        format!("{} waits ({})", id, why),
        LogLevel::Debug,
        LogTarget::Ai,
        None,
    );
    Step::Acted(Action::Waited)
}

pub(crate) fn moved(moved: bool, state: &mut GameState, id: UnitId, why: &str) -> Step {
    if moved {
        Step::Acted(Action::Moved)
    } else {
        wait(state, id, why)
    }
}
