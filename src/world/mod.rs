//! Arena state: map, safe zone, units and the game log

pub mod log;
pub mod map;
pub mod state;
pub mod unit;
pub mod zone;

pub use log::{GameLog, LogEntry, LogLevel, LogTarget};
pub use map::{GameMap, ResourceKind, TileKind};
pub use state::{GameState, MatchOutcome};
pub use unit::{AiState, Enemy, ResourceTarget, Unit};
pub use zone::SafeZone;
