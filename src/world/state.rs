//! Complete game state
//!
//! `GameState` is the single source of truth handed by reference to every
//! AI and game-loop function. Units never hold references to it or to each
//! other; relations are expressed by `UnitId` and looked up here.

use ahash::AHashSet;
use serde::Serialize;

use crate::core::types::{GridPos, Turn, UnitId};
use crate::world::log::{GameLog, LogLevel, LogTarget};
use crate::world::map::GameMap;
use crate::world::unit::{Enemy, Unit};
use crate::world::zone::SafeZone;

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchOutcome {
    /// Player is the last unit standing
    Victory,
    /// Player was eliminated
    Defeat,
    /// Turn limit reached with the player still alive
    Timeout,
}

impl MatchOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            MatchOutcome::Victory => "victory",
            MatchOutcome::Defeat => "defeat",
            MatchOutcome::Timeout => "timeout",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub map: GameMap,
    pub player: Unit,
    pub enemies: Vec<Enemy>,
    pub zone: SafeZone,
    pub turn: Turn,
    pub log: GameLog,
    pub game_over: bool,
    pub outcome: Option<MatchOutcome>,
}

impl GameState {
    /// Create a state whose safe zone initially covers the whole map
    pub fn new(map: GameMap, player: Unit, enemies: Vec<Enemy>) -> Self {
        let zone = SafeZone::covering(map.rows(), map.cols());
        Self {
            map,
            player,
            enemies,
            zone,
            turn: 0,
            log: GameLog::new(),
            game_over: false,
            outcome: None,
        }
    }

    /// Append to the game log, stamped with the current turn
    pub fn record(
        &mut self,
        message: String,
        level: LogLevel,
        target: LogTarget,
        style: Option<&'static str>,
    ) {
        self.log.push(self.turn, message, level, target, style);
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        if id.is_player() {
            Some(&self.player)
        } else {
            self.enemy(id).map(|e| &e.unit)
        }
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        if id.is_player() {
            Some(&mut self.player)
        } else {
            self.enemy_mut(id).map(|e| &mut e.unit)
        }
    }

    pub fn enemy(&self, id: UnitId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    pub fn enemy_mut(&mut self, id: UnitId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id() == id)
    }

    /// Ids of every enemy in array order
    pub fn enemy_ids(&self) -> Vec<UnitId> {
        self.enemies.iter().map(|e| e.id()).collect()
    }

    /// Living, placed units: the player first, then enemies in array order
    pub fn active_units(&self) -> impl Iterator<Item = &Unit> {
        std::iter::once(&self.player)
            .chain(self.enemies.iter().map(|e| &e.unit))
            .filter(|u| u.is_active())
    }

    pub fn living_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.unit.is_alive()).count()
    }

    /// Cells held by living units other than `excluding`
    pub fn occupied_cells(&self, excluding: UnitId) -> AHashSet<GridPos> {
        self.active_units()
            .filter(|u| u.id != excluding)
            .filter_map(|u| u.position)
            .collect()
    }

    /// Living unit standing at `pos`, if any
    pub fn unit_at(&self, pos: GridPos) -> Option<&Unit> {
        self.active_units().find(|u| u.position == Some(pos))
    }

    /// Evaluate end-of-game conditions, latching `game_over` and `outcome`
    pub fn check_game_over(&mut self) -> bool {
        if self.game_over {
            return true;
        }

        let outcome = if !self.player.is_alive() {
            Some(MatchOutcome::Defeat)
        } else if self.living_enemy_count() == 0 {
            Some(MatchOutcome::Victory)
        } else {
            None
        };

        if let Some(outcome) = outcome {
            self.finish(outcome);
        }
        self.game_over
    }

    /// End the match with the given outcome
    pub fn finish(&mut self, outcome: MatchOutcome) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.outcome = Some(outcome);
        tracing::info!("Match over on turn {}: {}", self.turn, outcome.name());
        self.record(
            format!("Game over: {}", outcome.name()),
            LogLevel::Info,
            LogTarget::Main,
            Some("game_over"),
        );
    }
}
