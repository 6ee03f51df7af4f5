//! Progress and diagnostic reporting.
//!
//! Stages log through a [`Reporter`] handed to them rather than calling the
//! tracing macros directly, so tests can capture what a stage said.

pub mod logging;
pub mod summary;

use std::cell::RefCell;
use tracing::Level;

/// Leveled sink for human-readable progress messages.
pub trait Reporter {
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Forwards to the global `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn debug(&self, msg: &str) {
        tracing::debug!("{}", msg);
    }

    fn info(&self, msg: &str) {
        tracing::info!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!("{}", msg);
    }
}

/// Records every message in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: RefCell<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    /// Messages logged at exactly `level`, in order.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// True if some message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    fn push(&self, level: Level, msg: &str) {
        self.entries.borrow_mut().push((level, msg.to_string()));
    }
}

impl Reporter for MemoryReporter {
    fn debug(&self, msg: &str) {
        self.push(Level::DEBUG, msg);
    }

    fn info(&self, msg: &str) {
        self.push(Level::INFO, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::WARN, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Level::ERROR, msg);
    }
}
