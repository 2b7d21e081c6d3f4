//! Game configuration loaded from TOML
//!
//! All tunable numbers live here. Every section defaults independently, so a
//! config file only needs to mention the values it changes.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Result};

/// Longest sight line an enemy may be configured with
pub const MAX_DETECTION_RANGE: u32 = 1024;

// === GRID ===

/// Map dimensions and terrain scatter densities (fraction of cells)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub wall_density: f64,
    pub tree_density: f64,
    pub water_density: f64,
    pub medkit_density: f64,
    pub ammo_density: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 30,
            wall_density: 0.08,
            tree_density: 0.06,
            water_density: 0.03,
            medkit_density: 0.01,
            ammo_density: 0.015,
        }
    }
}

// === UNITS ===

/// Starting stats. Enemy values are rolled uniformly within each band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    pub player_hp: u32,
    pub player_ammo: u32,
    pub player_medkits: u32,
    pub enemy_hp_min: u32,
    pub enemy_hp_max: u32,
    pub enemy_ammo_max: u32,
    pub enemy_medkits_max: u32,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            player_hp: 100,
            player_ammo: 10,
            player_medkits: 1,
            enemy_hp_min: 60,
            enemy_hp_max: 100,
            enemy_ammo_max: 5,
            enemy_medkits_max: 1,
        }
    }
}

// === COMBAT ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Maximum cardinal distance for a ranged shot
    pub ranged_range: u32,
    pub ranged_damage: u32,
    pub melee_damage: u32,
    /// Upper bound on HP restored by one medkit
    pub medkit_heal: u32,
    pub ammo_pickup: u32,
    pub medkit_pickup: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            ranged_range: 6,
            ranged_damage: 20,
            melee_damage: 10,
            medkit_heal: 40,
            ammo_pickup: 5,
            medkit_pickup: 1,
        }
    }
}

// === AI ===

/// Enemy decision thresholds and behaviour probabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// HP ratio below which a threatened enemy flees instead of engaging
    pub flee_hp_ratio: f64,
    /// HP ratio below which healing (or seeking a medkit) takes priority
    pub heal_hp_ratio: f64,
    /// Ammo count at or below which the enemy looks for ammo
    pub low_ammo_threshold: u32,
    /// Exploring inside the zone: chance to step toward the zone centre
    pub move_to_center_chance: f64,
    /// Exploring inside the zone: chance to wander randomly.
    /// Whatever probability remains is spent waiting.
    pub random_move_chance: f64,
    /// Chance to hold position instead of advancing into the target's line of fire
    pub engage_hesitation_chance: f64,
    /// Re-evaluation/handler cycles allowed per enemy per AI phase
    pub evaluation_cap: u32,
    pub detection_range_min: u32,
    pub detection_range_max: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            flee_hp_ratio: 0.35,
            heal_hp_ratio: 0.6,
            low_ammo_threshold: 1,
            move_to_center_chance: 0.3,
            random_move_chance: 0.5,
            engage_hesitation_chance: 0.5,
            evaluation_cap: 5,
            detection_range_min: 5,
            detection_range_max: 9,
        }
    }
}

// === STORM ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StormConfig {
    /// Damage dealt each turn to units outside the safe zone
    pub damage: u32,
    /// Turns between zone shrinks
    pub shrink_interval: u32,
    /// Cells removed from every side per shrink
    pub shrink_step: u32,
    /// The zone never shrinks below this many cells per side
    pub min_size: u32,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            damage: 5,
            shrink_interval: 10,
            shrink_step: 1,
            min_size: 3,
        }
    }
}

// === MATCH ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub enemy_count: u32,
    pub max_turns: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            enemy_count: 12,
            max_turns: 300,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub units: UnitConfig,
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub storm: StormConfig,
    #[serde(default, rename = "match")]
    pub game: MatchConfig,
}

impl GameConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let probabilities = [
            ("ai.flee_hp_ratio", self.ai.flee_hp_ratio),
            ("ai.heal_hp_ratio", self.ai.heal_hp_ratio),
            ("ai.move_to_center_chance", self.ai.move_to_center_chance),
            ("ai.random_move_chance", self.ai.random_move_chance),
            ("ai.engage_hesitation_chance", self.ai.engage_hesitation_chance),
            ("grid.wall_density", self.grid.wall_density),
            ("grid.tree_density", self.grid.tree_density),
            ("grid.water_density", self.grid.water_density),
            ("grid.medkit_density", self.grid.medkit_density),
            ("grid.ammo_density", self.grid.ammo_density),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        let exploring = self.ai.move_to_center_chance + self.ai.random_move_chance;
        if exploring > 1.0 {
            return Err(ConfigError::ExploringChancesExceedOne(exploring));
        }

        if self.ai.flee_hp_ratio > self.ai.heal_hp_ratio {
            return Err(ConfigError::ThresholdOrder {
                flee: self.ai.flee_hp_ratio,
                heal: self.ai.heal_hp_ratio,
            });
        }

        let bands = [
            (
                "ai.detection_range",
                self.ai.detection_range_min,
                self.ai.detection_range_max,
            ),
            ("units.enemy_hp", self.units.enemy_hp_min, self.units.enemy_hp_max),
        ];
        for (name, min, max) in bands {
            if min > max {
                return Err(ConfigError::InvertedBand { name, min, max });
            }
        }

        if self.ai.detection_range_max > MAX_DETECTION_RANGE {
            return Err(ConfigError::AboveLimit {
                name: "ai.detection_range_max",
                value: self.ai.detection_range_max,
                max: MAX_DETECTION_RANGE,
            });
        }

        let positives = [
            ("ai.evaluation_cap", self.ai.evaluation_cap),
            ("grid.rows", self.grid.rows),
            ("grid.cols", self.grid.cols),
            ("units.player_hp", self.units.player_hp),
            ("units.enemy_hp_min", self.units.enemy_hp_min),
            ("storm.shrink_interval", self.storm.shrink_interval),
            ("storm.min_size", self.storm.min_size),
        ];
        for (name, value) in positives {
            if value == 0 {
                return Err(ConfigError::MustBePositive(name));
            }
        }

        Ok(())
    }
}

/// Load a configuration by name
///
/// Loads from `data/config/{name}.toml`
pub fn load_config(name: &str) -> Result<GameConfig> {
    let contents = fs::read_to_string(config_path(name))?;
    GameConfig::from_toml_str(&contents)
}

/// Get path to a config file
fn config_path(name: &str) -> PathBuf {
    PathBuf::from("data/config").join(format!("{}.toml", name))
}
