//! Exploring: the idle state

use crate::ai::movement::{move_randomly, move_towards};
use crate::ai::perception::safe_zone_center;
use crate::ai::states::{moved, snapshot, wait, Action, AiContext, StateHandler, Step};
use crate::core::error::AiError;
use crate::core::types::UnitId;
use crate::world::state::GameState;
use crate::world::unit::AiState;

pub struct ExploringHandler;

impl StateHandler for ExploringHandler {
    fn state(&self) -> AiState {
        AiState::Exploring
    }

    /// Outside the zone: head for the centre, then wander, then wait.
    /// Inside: roll between centre, wander and wait. Always acts.
    fn handle(
        &self,
        state: &mut GameState,
        id: UnitId,
        ctx: &mut AiContext<'_>,
    ) -> Result<Step, AiError> {
        let (_, pos) = snapshot(state, id)?;
        let config = ctx.config;
        let combat = &config.combat;
        let ai = &config.ai;
        let center = safe_zone_center(state);

        if !state.zone.contains(pos) {
            if move_towards(state, id, center, "safety", combat) {
                return Ok(Step::Acted(Action::Moved));
            }
            let wandered = move_randomly(state, id, ctx.rng, combat);
            return Ok(moved(wandered, state, id, "trapped outside the zone"));
        }

        let roll = ctx.rng.next_f64();
        let step = if roll < ai.move_to_center_chance {
            let ok = move_towards(state, id, center, "center", combat);
            moved(ok, state, id, "blocked")
        } else if roll < ai.move_to_center_chance + ai.random_move_chance {
            let ok = move_randomly(state, id, ctx.rng, combat);
            moved(ok, state, id, "blocked")
        } else {
            wait(state, id, "idle")
        };
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::random::ScriptedRandom;
    use crate::core::config::GameConfig;
    use crate::core::types::GridPos;
    use crate::world::map::{GameMap, TileKind};
    use crate::world::unit::{Enemy, Unit};
    use crate::world::zone::SafeZone;

    fn create_state(pos: GridPos) -> GameState {
        let player = Unit::new(UnitId::PLAYER, 100).with_position(GridPos::new(0, 0));
        let enemy = Enemy::new(Unit::new(UnitId(1), 50).with_position(pos), 4);
        GameState::new(GameMap::new(20, 20), player, vec![enemy])
    }

    #[test]
    fn test_outside_zone_moves_toward_center_first() {
        let mut state = create_state(GridPos::new(2, 10));
        state.zone = SafeZone::new(8, 12, 8, 12);
        let config = GameConfig::default();
        // a roll that would mean "wait" if it were consulted
        let mut rng = ScriptedRandom::new().with_fallback(0.99);
        let mut ctx = AiContext::new(&config, &mut rng);

        let step = ExploringHandler.handle(&mut state, UnitId(1), &mut ctx).unwrap();
        assert_eq!(step, Step::Acted(Action::Moved));
        assert_eq!(state.enemies[0].unit.position, Some(GridPos::new(3, 10)));
    }

    #[test]
    fn test_boxed_in_outside_zone_waits() {
        let mut state = create_state(GridPos::new(2, 10));
        state.zone = SafeZone::new(8, 12, 8, 12);
        for pos in GridPos::new(2, 10).neighbors() {
            state.map.set(pos, TileKind::Tree);
        }
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&config, &mut rng);

        let step = ExploringHandler.handle(&mut state, UnitId(1), &mut ctx).unwrap();
        assert_eq!(step, Step::Acted(Action::Waited));
    }

    #[test]
    fn test_inside_zone_roll_selects_branch() {
        let config = GameConfig::default();

        // below move_to_center_chance: step toward the centre (10, 10)
        let mut state = create_state(GridPos::new(10, 4));
        let mut rng = ScriptedRandom::new().with_rolls(&[0.1]);
        let mut ctx = AiContext::new(&config, &mut rng);
        ExploringHandler.handle(&mut state, UnitId(1), &mut ctx).unwrap();
        assert_eq!(state.enemies[0].unit.position, Some(GridPos::new(10, 5)));

        // above both chances: wait in place
        let mut state = create_state(GridPos::new(10, 4));
        let mut rng = ScriptedRandom::new().with_rolls(&[0.95]);
        let mut ctx = AiContext::new(&config, &mut rng);
        let step = ExploringHandler.handle(&mut state, UnitId(1), &mut ctx).unwrap();
        assert_eq!(step, Step::Acted(Action::Waited));
        assert_eq!(state.enemies[0].unit.position, Some(GridPos::new(10, 4)));
    }

    #[test]
    fn test_random_branch_moves() {
        let config = GameConfig::default();
        let mut state = create_state(GridPos::new(10, 4));
        let mut rng = ScriptedRandom::new().with_rolls(&[0.5]).with_indices(&[1]);
        let mut ctx = AiContext::new(&config, &mut rng);
        let step = ExploringHandler.handle(&mut state, UnitId(1), &mut ctx).unwrap();
        assert_eq!(step, Step::Acted(Action::Moved));
        assert_eq!(state.enemies[0].unit.position, Some(GridPos::new(11, 4)));
    }
}
