//! Logging collaborator the store writes its audit trail to.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use crate::types::Severity;

/// Destination for severity-tagged, human-readable status lines.
///
/// Writes are fire-and-forget: a sink must never fail the calling operation.
pub trait LogSink: Send {
    /// Records one line.
    fn log(&self, severity: Severity, line: &str);

    /// Returns false when lines at `severity` would be discarded anyway.
    fn enabled(&self, _severity: Severity) -> bool {
        true
    }
}

/// Forwards every line to the `tracing` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, line: &str) {
        match severity {
            Severity::Info => tracing::info!("{line}"),
            Severity::Warn => tracing::warn!("{line}"),
            Severity::Error => tracing::error!("{line}"),
            Severity::Fatal => tracing::error!(fatal = true, "{line}"),
            Severity::Debug => tracing::debug!("{line}"),
        }
    }

    fn enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Info => tracing::enabled!(tracing::Level::INFO),
            Severity::Warn => tracing::enabled!(tracing::Level::WARN),
            Severity::Error | Severity::Fatal => tracing::enabled!(tracing::Level::ERROR),
            Severity::Debug => tracing::enabled!(tracing::Level::DEBUG),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _severity: Severity, _line: &str) {}

    fn enabled(&self, _severity: Severity) -> bool {
        false
    }
}

/// One captured line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Severity the line was written at.
    pub severity: Severity,
    /// Line text without trailing newline.
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out every line captured so far.
    pub fn lines(&self) -> Vec<LogLine> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Copies out only the message text of every captured line.
    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|l| l.message).collect()
    }

    /// Renders every captured line as `[SEVERITY] message`, one per line.
    pub fn transcript(&self) -> String {
        self.lines().iter().map(|l| format!("{l}\n")).collect()
    }

    /// Drops all captured lines.
    pub fn clear(&self) {
        match self.lines.lock() {
            Ok(mut lines) => lines.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl LogSink for MemorySink {
    fn log(&self, severity: Severity, line: &str) {
        let entry = LogLine {
            severity,
            message: line.to_string(),
        };
        match self.lines.lock() {
            Ok(mut lines) => lines.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
