//! Game loop around the enemy AI: player intents, storm and match flow

pub mod intent;
pub mod storm;
pub mod turn;

pub use intent::{apply_player_intent, autopilot, PlayerIntent};
pub use storm::{apply_storm_damage, shrink_zone_if_due};
pub use turn::{Match, MatchSummary};
