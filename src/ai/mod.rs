//! Enemy AI: a five-state machine driven once per enemy per turn
//!
//! Architecture:
//! - `geometry` / `perception`: line tracing, sight and target lookup
//! - `movement` / `actions`: the only code that mutates units
//! - `transition`: priority policy choosing the next state
//! - `states`: one handler per state behind the `StateHandler` trait
//! - `orchestrator`: the AI phase entry point

pub mod actions;
pub mod geometry;
pub mod movement;
pub mod orchestrator;
pub mod perception;
pub mod random;
pub mod states;
pub mod transition;

pub use orchestrator::{run_ai_phase, run_ai_phase_with, DefaultHooks, PhaseHooks, PhaseReport};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use states::{Action, AiContext, StateHandler, Step};
pub use transition::reevaluate;
