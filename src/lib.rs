//! Zone Royale - turn-based grid battle royale with a finite-state enemy AI

pub mod ai;
pub mod core;
pub mod game;
pub mod setup;
pub mod world;
