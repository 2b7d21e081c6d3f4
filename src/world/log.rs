//! Game log sink
//!
//! Player-facing messages produced by the AI and the turn loop. Rendering
//! layers read this independently; warnings and errors are mirrored to
//! `tracing` so they show up in diagnostics too.

use serde::{Deserialize, Serialize};

use crate::core::types::Turn;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Which panel a message is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogTarget {
    Main,
    Combat,
    Ai,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub turn: Turn,
    pub message: String,
    pub level: LogLevel,
    pub target: LogTarget,
    /// Optional presentation hint, e.g. "pickup" or "elimination"
    pub style: Option<&'static str>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GameLog {
    pub entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        turn: Turn,
        message: String,
        level: LogLevel,
        target: LogTarget,
        style: Option<&'static str>,
    ) {
        match level {
            LogLevel::Warn => tracing::warn!("[turn {}] {}", turn, message),
            LogLevel::Error => tracing::error!("[turn {}] {}", turn, message),
            _ => {}
        }
        self.entries.push(LogEntry {
            turn,
            message,
            level,
            target,
            style,
        });
    }

    /// Entries carrying the given style tag
    pub fn with_style<'a>(&'a self, style: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |e| e.style == Some(style))
    }

    pub fn at_level(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter().filter(move |e| e.level == level)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
