//! Full turn loop: player, enemies, storm

use serde::Serialize;

use crate::ai::orchestrator::{run_ai_phase, DefaultHooks, PhaseHooks, PhaseReport};
use crate::ai::random::SeededRandom;
use crate::ai::states::AiContext;
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::Turn;
use crate::game::intent::{apply_player_intent, PlayerIntent};
use crate::game::storm::{apply_storm_damage, shrink_zone_if_due};
use crate::setup::build_state;
use crate::world::state::{GameState, MatchOutcome};

/// End-of-match report
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub outcome: Option<MatchOutcome>,
    pub turns: Turn,
    pub player_hp: u32,
    pub surviving_enemies: usize,
    pub eliminations: usize,
    pub log_entries: usize,
}

/// A running match: state, configuration and the seeded random source
pub struct Match {
    pub state: GameState,
    config: GameConfig,
    rng: SeededRandom,
    seed: u64,
}

impl Match {
    /// Generate a fresh arena from `config` and `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mut rng = SeededRandom::new(seed);
        let state = build_state(&config, &mut rng)?;
        tracing::info!(
            "Match ready: {}x{} grid, {} enemies, seed {}",
            state.map.rows(),
            state.map.cols(),
            state.enemies.len(),
            seed
        );
        Ok(Self {
            state,
            config,
            rng,
            seed,
        })
    }

    /// Wrap an already built state
    pub fn with_state(state: GameState, config: GameConfig, seed: u64) -> Self {
        Self {
            state,
            config,
            rng: SeededRandom::new(seed),
            seed,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    /// Play one full turn with the default hooks
    pub fn play_turn(&mut self, intent: PlayerIntent) -> Option<PhaseReport> {
        self.play_turn_with(intent, &mut DefaultHooks)
    }

    /// Play one full turn: player intent, AI phase, storm, shrink, end checks
    ///
    /// Returns `None` if the match was already over, otherwise the AI phase
    /// report (which is empty if the player's action ended the match).
    pub fn play_turn_with(
        &mut self,
        intent: PlayerIntent,
        hooks: &mut dyn PhaseHooks,
    ) -> Option<PhaseReport> {
        if self.state.game_over {
            return None;
        }

        apply_player_intent(&mut self.state, intent, &self.config);
        if self.state.check_game_over() {
            return Some(PhaseReport::default());
        }

        let report = {
            let mut ctx = AiContext::new(&self.config, &mut self.rng);
            run_ai_phase(&mut self.state, &mut ctx, hooks)
        };

        if !self.state.game_over {
            apply_storm_damage(&mut self.state, &self.config.storm);
            shrink_zone_if_due(&mut self.state, &self.config.storm);
        }

        self.state.turn += 1;
        if !self.state.check_game_over() && self.state.turn >= self.config.game.max_turns {
            self.state.finish(MatchOutcome::Timeout);
        }

        Some(report)
    }

    /// Play until the match ends, asking `policy` for the player's intent
    pub fn run<F>(&mut self, mut policy: F) -> MatchSummary
    where
        F: FnMut(&GameState, &GameConfig) -> PlayerIntent,
    {
        while !self.state.game_over {
            let intent = policy(&self.state, &self.config);
            self.play_turn(intent);
        }
        self.summary()
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            seed: self.seed,
            outcome: self.state.outcome,
            turns: self.state.turn,
            player_hp: self.state.player.hp,
            surviving_enemies: self.state.living_enemy_count(),
            eliminations: self.state.log.with_style("elimination").count(),
            log_entries: self.state.log.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Direction, GridPos, UnitId};
    use crate::world::map::GameMap;
    use crate::world::unit::{Enemy, Unit};

    fn small_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.grid.rows = 12;
        config.grid.cols = 12;
        config.game.enemy_count = 3;
        config.game.max_turns = 40;
        config
    }

    #[test]
    fn test_turn_counter_advances() {
        let mut game = Match::new(small_config(), 7).unwrap();
        assert!(game.play_turn(PlayerIntent::Wait).is_some());
        assert_eq!(game.state.turn, 1);
    }

    #[test]
    fn test_timeout_ends_match() {
        let mut config = small_config();
        config.game.max_turns = 3;
        let player = Unit::new(UnitId::PLAYER, 100).with_position(GridPos::new(1, 1));
        let enemy = Enemy::new(Unit::new(UnitId(1), 50).with_position(GridPos::new(10, 10)), 2);
        let state = GameState::new(GameMap::new(12, 12), player, vec![enemy]);
        let mut game = Match::with_state(state, config, 1);

        let summary = game.run(|_, _| PlayerIntent::Wait);
        assert_eq!(summary.outcome, Some(MatchOutcome::Timeout));
        assert_eq!(summary.turns, 3);
        assert!(game.play_turn(PlayerIntent::Wait).is_none());
    }

    #[test]
    fn test_player_kill_ends_match_before_ai_phase() {
        let player = Unit::new(UnitId::PLAYER, 100)
            .with_position(GridPos::new(5, 5))
            .with_supplies(1, 0);
        let mut unit = Unit::new(UnitId(1), 50).with_position(GridPos::new(5, 7));
        unit.hp = 10;
        let state = GameState::new(GameMap::new(12, 12), player, vec![Enemy::new(unit, 4)]);
        let mut game = Match::with_state(state, small_config(), 1);

        let report = game.play_turn(PlayerIntent::Shoot(Direction::Right));
        assert_eq!(report, Some(PhaseReport::default()));
        assert_eq!(game.state.outcome, Some(MatchOutcome::Victory));
        assert_eq!(game.summary().eliminations, 1);
    }
}
