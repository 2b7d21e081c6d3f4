pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, GameConfig};
pub use error::{AiError, ConfigError, Result, RoyaleError, UnknownIntent};
pub use types::{Direction, GridPos, Turn, UnitId};
