//! SeekingResources: walk to a remembered medkit or ammo tile

use crate::ai::movement::{move_towards, pick_up};
use crate::ai::states::{moved, snapshot, AiContext, StateHandler, Step};
use crate::core::error::AiError;
use crate::core::types::UnitId;
use crate::world::state::GameState;
use crate::world::unit::AiState;

pub struct SeekingHandler;

impl StateHandler for SeekingHandler {
    fn state(&self) -> AiState {
        AiState::SeekingResources
    }

    fn handle(
        &self,
        state: &mut GameState,
        id: UnitId,
        ctx: &mut AiContext<'_>,
    ) -> Result<Step, AiError> {
        let (enemy, pos) = snapshot(state, id)?;
        let Some(target) = enemy.target_resource else {
            return Ok(Step::Reevaluate);
        };

        if pos == target.pos {
            // normally collected on the move in, but a unit can stand on a
            // tile it never stepped onto
            pick_up(state, id, pos, &ctx.config.combat);
            if let Some(enemy) = state.enemy_mut(id) {
                enemy.target_resource = None;
                enemy.transition(AiState::Exploring);
            }
            return Ok(Step::Reevaluate);
        }

        let still_there = state.map.get(target.pos) == Some(target.kind.tile());
        let in_range = pos.manhattan(&target.pos) <= enemy.detection_range;
        if !still_there || !in_range {
            tracing::debug!("{} drops stale {} target at {}", id, target.kind.name(), target.pos);
            if let Some(enemy) = state.enemy_mut(id) {
                enemy.target_resource = None;
            }
            return Ok(Step::Reevaluate);
        }

        let reason = format!("seeking {}", target.kind.name());
        let ok = move_towards(state, id, target.pos, &reason, &ctx.config.combat);
        Ok(moved(ok, state, id, "path to resource blocked"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::random::ScriptedRandom;
    use crate::ai::states::Action;
    use crate::core::config::GameConfig;
    use crate::core::types::GridPos;
    use crate::world::map::{GameMap, ResourceKind, TileKind};
    use crate::world::unit::{Enemy, ResourceTarget, Unit};

    fn create_state(target: GridPos, kind: ResourceKind) -> GameState {
        let player = Unit::new(UnitId::PLAYER, 100).with_position(GridPos::new(0, 0));
        let mut enemy = Enemy::new(Unit::new(UnitId(1), 50).with_position(GridPos::new(10, 10)), 5);
        enemy.state = AiState::SeekingResources;
        enemy.target_resource = Some(ResourceTarget { pos: target, kind });
        let mut state = GameState::new(GameMap::new(20, 20), player, vec![enemy]);
        state.map.set(target, kind.tile());
        state
    }

    fn run(state: &mut GameState) -> Step {
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&config, &mut rng);
        SeekingHandler.handle(state, UnitId(1), &mut ctx).unwrap()
    }

    #[test]
    fn test_walks_to_resource_and_picks_it_up() {
        let mut state = create_state(GridPos::new(10, 12), ResourceKind::Ammo);

        assert_eq!(run(&mut state), Step::Acted(Action::Moved));
        assert_eq!(state.enemies[0].unit.position, Some(GridPos::new(10, 11)));

        assert_eq!(run(&mut state), Step::Acted(Action::Moved));
        assert_eq!(state.enemies[0].unit.ammo, GameConfig::default().combat.ammo_pickup);
        assert_eq!(state.map.get(GridPos::new(10, 12)), Some(TileKind::Land));

        // standing on the target: clear it and go back to exploring
        assert_eq!(run(&mut state), Step::Reevaluate);
        assert!(state.enemies[0].target_resource.is_none());
        assert_eq!(state.enemies[0].state, AiState::Exploring);
    }

    #[test]
    fn test_standing_on_live_resource_collects_it() {
        let mut state = create_state(GridPos::new(10, 10), ResourceKind::Ammo);

        assert_eq!(run(&mut state), Step::Reevaluate);
        assert_eq!(state.enemies[0].unit.ammo, GameConfig::default().combat.ammo_pickup);
        assert_eq!(state.map.get(GridPos::new(10, 10)), Some(TileKind::Land));
        assert!(state.enemies[0].target_resource.is_none());
        assert_eq!(state.log.with_style("pickup").count(), 1);
    }

    #[test]
    fn test_vanished_resource_is_dropped() {
        let mut state = create_state(GridPos::new(10, 13), ResourceKind::Medkit);
        state.map.set(GridPos::new(10, 13), TileKind::Land);

        assert_eq!(run(&mut state), Step::Reevaluate);
        assert!(state.enemies[0].target_resource.is_none());
        assert_eq!(state.enemies[0].unit.position, Some(GridPos::new(10, 10)));
    }

    #[test]
    fn test_out_of_range_target_is_dropped() {
        let mut state = create_state(GridPos::new(18, 18), ResourceKind::Ammo);
        assert_eq!(run(&mut state), Step::Reevaluate);
        assert!(state.enemies[0].target_resource.is_none());
    }

    #[test]
    fn test_missing_target_requests_reevaluation() {
        let mut state = create_state(GridPos::new(10, 12), ResourceKind::Ammo);
        state.enemies[0].target_resource = None;
        assert_eq!(run(&mut state), Step::Reevaluate);
    }
}
