//! Diagnostic Backend Abstractions
//!
//! The core reports its own diagnostics (constants being bound, operations
//! that failed to resolve, fatal initialization errors) through a small
//! leveled-logging interface. Hosts can route these into their own logging
//! pipeline:
//! - **Android**: Logcat
//! - **iOS**: OSLog
//! - **Desktop**: console or `tracing`
//!
//! A backend implements six operations, `{debug, warn, error}` with and
//! without a [`Cause`]. Backends that wrap a foreign logger whose surface may
//! be incomplete report what they can actually forward through
//! [`DiagnosticBackend::supports`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

use crate::platform::PlatformSendSync;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Debug,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Debug => "DEBUG",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        })
    }
}

/// One of the six operations a backend must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogOperation {
    Debug,
    DebugWithCause,
    Warn,
    WarnWithCause,
    Error,
    ErrorWithCause,
}

impl LogOperation {
    pub const ALL: [LogOperation; 6] = [
        LogOperation::Debug,
        LogOperation::DebugWithCause,
        LogOperation::Warn,
        LogOperation::WarnWithCause,
        LogOperation::Error,
        LogOperation::ErrorWithCause,
    ];
}

impl fmt::Display for LogOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogOperation::Debug => "debug(tag, message)",
            LogOperation::DebugWithCause => "debug(tag, message, cause)",
            LogOperation::Warn => "warn(tag, message)",
            LogOperation::WarnWithCause => "warn(tag, message, cause)",
            LogOperation::Error => "error(tag, message)",
            LogOperation::ErrorWithCause => "error(tag, message, cause)",
        };
        f.write_str(name)
    }
}

/// Printable description of an error and its source chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub message: String,
    pub sources: Vec<String>,
}

impl Cause {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sources: Vec::new(),
        }
    }

    /// Capture `error` and every error in its `source()` chain.
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let mut sources = Vec::new();
        let mut current = error.source();
        while let Some(source) = current {
            sources.push(source.to_string());
            current = source.source();
        }
        Self {
            message: error.to_string(),
            sources,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for source in &self.sources {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

/// Leveled-logging sink used for the core's own diagnostics.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::diagnostics::{Cause, DiagnosticBackend};
///
/// struct Logcat;
///
/// impl DiagnosticBackend for Logcat {
///     fn debug(&self, tag: &str, message: &str) { android_log(3, tag, message) }
///     // ...five more
/// }
/// ```
pub trait DiagnosticBackend: PlatformSendSync {
    fn debug(&self, tag: &str, message: &str);
    fn debug_with_cause(&self, tag: &str, message: &str, cause: &Cause);
    fn warn(&self, tag: &str, message: &str);
    fn warn_with_cause(&self, tag: &str, message: &str, cause: &Cause);
    fn error(&self, tag: &str, message: &str);
    fn error_with_cause(&self, tag: &str, message: &str, cause: &Cause);

    /// Whether this backend can actually forward `operation`.
    ///
    /// Native implementations support everything. Adapters over a foreign
    /// logger override this to report gaps in the wrapped surface.
    fn supports(&self, _operation: LogOperation) -> bool {
        true
    }
}

/// Single diagnostic message as seen by a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub tag: String,
    pub message: String,
    pub cause: Option<Cause>,
}

impl LogEntry {
    pub fn new(severity: Severity, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            timestamp: Utc::now(),
            tag: tag.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.severity,
            self.tag,
            self.message
        )?;
        if let Some(cause) = &self.cause {
            write!(f, " (caused by: {cause})")?;
        }
        Ok(())
    }
}

/// Console backend for development: prints to stderr at or above
/// `min_severity`.
#[derive(Debug, Clone)]
pub struct ConsoleBackend {
    pub min_severity: Severity,
}

impl Default for ConsoleBackend {
    fn default() -> Self {
        Self {
            min_severity: Severity::Debug,
        }
    }
}

impl ConsoleBackend {
    fn emit(&self, entry: LogEntry) {
        if entry.severity >= self.min_severity {
            eprintln!("{entry}");
        }
    }
}

impl DiagnosticBackend for ConsoleBackend {
    fn debug(&self, tag: &str, message: &str) {
        self.emit(LogEntry::new(Severity::Debug, tag, message));
    }

    fn debug_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
        self.emit(LogEntry::new(Severity::Debug, tag, message).with_cause(cause.clone()));
    }

    fn warn(&self, tag: &str, message: &str) {
        self.emit(LogEntry::new(Severity::Warn, tag, message));
    }

    fn warn_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
        self.emit(LogEntry::new(Severity::Warn, tag, message).with_cause(cause.clone()));
    }

    fn error(&self, tag: &str, message: &str) {
        self.emit(LogEntry::new(Severity::Error, tag, message));
    }

    fn error_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
        self.emit(LogEntry::new(Severity::Error, tag, message).with_cause(cause.clone()));
    }
}
