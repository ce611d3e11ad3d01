//! Shared primitive aliases and enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Trip fare as supplied by the caller, in an unspecified currency.
pub type Fare = f64;

/// Severity tag attached to every line written to a [`crate::sink::LogSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Routine audit output.
    Info,
    /// Something unexpected that did not stop the operation.
    Warn,
    /// An operation failed.
    Error,
    /// An unrecoverable condition.
    Fatal,
    /// Verbose diagnostics.
    Debug,
}

impl Severity {
    /// Upper-case tag used when rendering a line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
