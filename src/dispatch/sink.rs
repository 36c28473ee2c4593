//! Output sinks.
//!
//! # Responsibilities
//! - Accept a finished log line at one of three severity levels
//! - Hide where the line ends up (tracing, console, memory)
//!
//! # Design Decisions
//! - One trait method keyed by `SinkLevel`; routing happens in the logger
//! - Sinks never see channel state or colors

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::dispatch::SinkLevel;

/// Destination for formatted log lines.
pub trait LogSink: Send + Sync {
    fn write(&self, level: SinkLevel, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, level: SinkLevel, message: &str) {
        (**self).write(level, message)
    }
}

/// Forwards lines to the `tracing` macros.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: SinkLevel, message: &str) {
        match level {
            SinkLevel::Info => tracing::info!(target: "enhanced_logger::sink", "{}", message),
            SinkLevel::Warning => tracing::warn!(target: "enhanced_logger::sink", "{}", message),
            SinkLevel::Error => tracing::error!(target: "enhanced_logger::sink", "{}", message),
        }
    }
}

/// Info to stdout, warnings and errors to stderr.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, level: SinkLevel, message: &str) {
        // A closed stdout/stderr is not worth failing a log call over.
        let _ = match level {
            SinkLevel::Info => writeln!(std::io::stdout().lock(), "{}", message),
            SinkLevel::Warning => writeln!(std::io::stderr().lock(), "warning: {}", message),
            SinkLevel::Error => writeln!(std::io::stderr().lock(), "error: {}", message),
        };
    }
}

/// Keeps every line in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(SinkLevel, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines written so far, oldest first.
    pub fn lines(&self) -> Vec<(SinkLevel, String)> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Lines written at `level`.
    pub fn at(&self, level: SinkLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl LogSink for MemorySink {
    fn write(&self, level: SinkLevel, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((level, message.to_string()));
    }
}
