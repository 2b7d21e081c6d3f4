use thiserror::Error;

use crate::core::types::UnitId;

#[derive(Error, Debug)]
pub enum RoyaleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Setup error: {0}")]
    Setup(String),

    #[error("Intent error: {0}")]
    Intent(#[from] UnknownIntent),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RoyaleError>;

/// Invalid configuration values, reported by `GameConfig::validate`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("exploring probabilities sum to {0}, must not exceed 1")]
    ExploringChancesExceedOne(f64),

    #[error("flee_hp_ratio ({flee}) must not exceed heal_hp_ratio ({heal})")]
    ThresholdOrder { flee: f64, heal: f64 },

    #[error("{name} band is inverted: min {min} > max {max}")]
    InvertedBand { name: &'static str, min: u32, max: u32 },

    #[error("{0} must be greater than zero")]
    MustBePositive(&'static str),

    #[error("{name} is {value}, must not exceed {max}")]
    AboveLimit { name: &'static str, value: u32, max: u32 },
}

/// Failures while processing a single enemy's turn.
///
/// These never escape the AI phase: the orchestrator logs them and skips
/// the enemy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {0} has no position on the map")]
    NotPlaced(UnitId),
}

/// A player intent string that maps to no action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized intent {0:?}")]
pub struct UnknownIntent(pub String);
