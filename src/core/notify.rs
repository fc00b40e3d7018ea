//! Operator notifications.
//!
//! Providers report progress through a [`Notifier`]. Notices are
//! informational only and never change the outcome of an operation.

use std::sync::Mutex;

use tracing::{info, warn};

/// Sink for operator-facing messages.
pub trait Notifier: Send + Sync {
    /// Progress or success notice.
    fn info(&self, msg: &str);

    /// Something the operator should look at.
    fn warn(&self, msg: &str);
}

/// Discards notices, keeping only the tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn info(&self, msg: &str) {
        info!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        warn!("{}", msg);
    }
}

/// Level of a recorded notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

/// Collects notices in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    notices: Mutex<Vec<(Level, String)>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far, in order.
    pub fn notices(&self) -> Vec<(Level, String)> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Messages of the given level, in order.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: Level, msg: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push((level, msg.to_string()));
        }
    }
}

impl Notifier for Recorder {
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }
}
