//! # Diagnostic Sink
//!
//! The channel the core uses for its own diagnostics, plus the binder that
//! validates and installs a [`DiagnosticBackend`].
//!
//! ## Overview
//!
//! Exactly one backend is active at a time. It starts out as the built-in
//! [`TracingBackend`] and can be replaced any number of times with
//! [`set_backend`]. A candidate that cannot serve all six logging operations
//! is rejected: the rejection is reported as a warning through the backend
//! that stays active, and nothing else changes.
//!
//! Logging through the sink never fails visibly. If the active backend
//! panics, the message is dropped.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_traits::diagnostics::{ConsoleBackend, Severity};
//! use core_runtime::diagnostics;
//! use std::sync::Arc;
//!
//! diagnostics::set_backend(Some(Arc::new(ConsoleBackend::default())))?;
//! diagnostics::log(Severity::Warn, "MyTag", "something odd happened");
//! ```

use crate::error::{Error, Result};
use bridge_traits::diagnostics::{Cause, DiagnosticBackend, LogOperation, Severity};
use std::panic::{catch_unwind, AssertUnwindSafe};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

/// Tag used for the binder's own diagnostics.
pub const TAG: &str = "ReflectionServiceUtil";

/// Result of a [`DiagnosticSink::set_backend`] call that got past argument
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The candidate is now the active backend.
    Installed,
    /// The candidate lacks the listed operations; the previous backend stays.
    Rejected { missing: Vec<LogOperation> },
}

impl SwapOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, SwapOutcome::Installed)
    }
}

/// Holder of the active diagnostic backend.
pub struct DiagnosticSink {
    active: RwLock<Arc<dyn DiagnosticBackend>>,
}

impl DiagnosticSink {
    pub fn new(initial: Arc<dyn DiagnosticBackend>) -> Self {
        Self {
            active: RwLock::new(initial),
        }
    }

    /// The backend currently receiving diagnostics.
    pub fn active(&self) -> Arc<dyn DiagnosticBackend> {
        Arc::clone(&*self.active.read())
    }

    /// Validate `candidate` and make it the active backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `candidate` is `None`. This is
    /// a configuration mistake, so it is reported instead of logged.
    pub fn set_backend(
        &self,
        candidate: Option<Arc<dyn DiagnosticBackend>>,
    ) -> Result<SwapOutcome> {
        let candidate = candidate.ok_or_else(|| {
            Error::InvalidArgument("diagnostic backend candidate must not be None".to_string())
        })?;

        let missing: Vec<LogOperation> = LogOperation::ALL
            .into_iter()
            .filter(|operation| !candidate.supports(*operation))
            .collect();

        if !missing.is_empty() {
            let names = missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.log(
                Severity::Warn,
                TAG,
                &format!(
                    "The diagnostic backend provided doesn't implement the required operations \
                     ({names}), sticking with the previous backend."
                ),
            );
            return Ok(SwapOutcome::Rejected { missing });
        }

        *self.active.write() = candidate;
        tracing::debug!("Diagnostic backend swapped");
        Ok(SwapOutcome::Installed)
    }

    /// Route a message to the active backend's operation for `severity`.
    pub fn log(&self, severity: Severity, tag: &str, message: &str) {
        self.dispatch(|backend| match severity {
            Severity::Debug => backend.debug(tag, message),
            Severity::Warn => backend.warn(tag, message),
            Severity::Error => backend.error(tag, message),
        });
    }

    /// Route a message with a cause to the active backend.
    pub fn log_with_cause(&self, severity: Severity, tag: &str, message: &str, cause: &Cause) {
        self.dispatch(|backend| match severity {
            Severity::Debug => backend.debug_with_cause(tag, message, cause),
            Severity::Warn => backend.warn_with_cause(tag, message, cause),
            Severity::Error => backend.error_with_cause(tag, message, cause),
        });
    }

    fn dispatch(&self, call: impl FnOnce(&dyn DiagnosticBackend)) {
        // Call outside the lock so a swap never waits on a slow backend
        let backend = self.active();
        // well, can't exactly log that
        let _ = catch_unwind(AssertUnwindSafe(|| call(backend.as_ref())));
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new(Arc::new(TracingBackend))
    }
}

/// Built-in backend: forwards to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl DiagnosticBackend for TracingBackend {
    fn debug(&self, tag: &str, message: &str) {
        tracing::debug!(tag, "{message}");
    }

    fn debug_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
        tracing::debug!(tag, cause = %cause, "{message}");
    }

    fn warn(&self, tag: &str, message: &str) {
        tracing::warn!(tag, "{message}");
    }

    fn warn_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
        tracing::warn!(tag, cause = %cause, "{message}");
    }

    fn error(&self, tag: &str, message: &str) {
        tracing::error!(tag, "{message}");
    }

    fn error_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
        tracing::error!(tag, cause = %cause, "{message}");
    }
}

/// Process-wide sink, starting out with [`TracingBackend`].
pub fn global() -> &'static DiagnosticSink {
    static GLOBAL: OnceLock<DiagnosticSink> = OnceLock::new();
    GLOBAL.get_or_init(DiagnosticSink::default)
}

/// Validate and install a backend on the process-wide sink.
pub fn set_backend(candidate: Option<Arc<dyn DiagnosticBackend>>) -> Result<SwapOutcome> {
    global().set_backend(candidate)
}

/// Log through the process-wide sink.
pub fn log(severity: Severity, tag: &str, message: &str) {
    global().log(severity, tag, message);
}

/// Log with a cause through the process-wide sink.
pub fn log_with_cause(severity: Severity, tag: &str, message: &str, cause: &Cause) {
    global().log_with_cause(severity, tag, message, cause);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_shims::MemoryBackend;
    use mockall::mock;

    mock! {
        pub Backend {}

        impl DiagnosticBackend for Backend {
            fn debug(&self, tag: &str, message: &str);
            fn debug_with_cause(&self, tag: &str, message: &str, cause: &Cause);
            fn warn(&self, tag: &str, message: &str);
            fn warn_with_cause(&self, tag: &str, message: &str, cause: &Cause);
            fn error(&self, tag: &str, message: &str);
            fn error_with_cause(&self, tag: &str, message: &str, cause: &Cause);
            fn supports(&self, operation: LogOperation) -> bool;
        }
    }

    /// Backend whose wrapped logger lacks one operation.
    struct PartialBackend {
        lacking: LogOperation,
        inner: MemoryBackend,
    }

    impl DiagnosticBackend for PartialBackend {
        fn debug(&self, tag: &str, message: &str) {
            self.inner.debug(tag, message)
        }
        fn debug_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
            self.inner.debug_with_cause(tag, message, cause)
        }
        fn warn(&self, tag: &str, message: &str) {
            self.inner.warn(tag, message)
        }
        fn warn_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
            self.inner.warn_with_cause(tag, message, cause)
        }
        fn error(&self, tag: &str, message: &str) {
            self.inner.error(tag, message)
        }
        fn error_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
            self.inner.error_with_cause(tag, message, cause)
        }
        fn supports(&self, operation: LogOperation) -> bool {
            operation != self.lacking
        }
    }

    struct PanickingBackend;

    impl DiagnosticBackend for PanickingBackend {
        fn debug(&self, _tag: &str, _message: &str) {
            panic!("debug exploded");
        }
        fn debug_with_cause(&self, _tag: &str, _message: &str, _cause: &Cause) {
            panic!("debug exploded");
        }
        fn warn(&self, _tag: &str, _message: &str) {
            panic!("warn exploded");
        }
        fn warn_with_cause(&self, _tag: &str, _message: &str, _cause: &Cause) {
            panic!("warn exploded");
        }
        fn error(&self, _tag: &str, _message: &str) {
            panic!("error exploded");
        }
        fn error_with_cause(&self, _tag: &str, _message: &str, _cause: &Cause) {
            panic!("error exploded");
        }
    }

    fn sink_with_memory() -> (DiagnosticSink, Arc<MemoryBackend>) {
        let memory = Arc::new(MemoryBackend::new());
        let sink = DiagnosticSink::new(memory.clone());
        (sink, memory)
    }

    #[test]
    fn test_valid_candidate_receives_subsequent_warnings() {
        let (sink, previous) = sink_with_memory();

        let mut candidate = MockBackend::new();
        candidate.expect_supports().returning(|_| true);
        candidate
            .expect_warn()
            .withf(|tag, message| tag == "T" && message == "m")
            .times(1)
            .return_const(());

        let outcome = sink.set_backend(Some(Arc::new(candidate))).unwrap();
        assert_eq!(outcome, SwapOutcome::Installed);

        sink.log(Severity::Warn, "T", "m");
        assert!(previous.is_empty());

        // Dropping the sink drops the mock, which verifies `times(1)`
        drop(sink);
    }

    #[test]
    fn test_candidate_missing_any_operation_is_rejected() {
        for lacking in LogOperation::ALL {
            let (sink, previous) = sink_with_memory();
            let candidate = Arc::new(PartialBackend {
                lacking,
                inner: MemoryBackend::new(),
            });

            let outcome = sink.set_backend(Some(candidate.clone())).unwrap();
            assert_eq!(
                outcome,
                SwapOutcome::Rejected {
                    missing: vec![lacking]
                }
            );

            let entries = previous.entries();
            assert_eq!(entries.len(), 1, "exactly one warning for {lacking}");
            assert_eq!(entries[0].severity, Severity::Warn);
            assert_eq!(entries[0].tag, TAG);
            assert!(entries[0].message.contains(&lacking.to_string()));

            sink.log(Severity::Error, "T", "still old");
            assert_eq!(previous.len(), 2);
            assert!(candidate.inner.is_empty());
        }
    }

    #[test]
    fn test_rejected_swap_is_idempotent() {
        let (sink, previous) = sink_with_memory();
        let candidate: Arc<dyn DiagnosticBackend> = Arc::new(PartialBackend {
            lacking: LogOperation::Debug,
            inner: MemoryBackend::new(),
        });

        sink.set_backend(Some(candidate.clone())).unwrap();
        sink.set_backend(Some(candidate)).unwrap();

        assert_eq!(previous.len(), 2);
        sink.log(Severity::Debug, "T", "m");
        assert_eq!(previous.len(), 3);
    }

    #[test]
    fn test_none_candidate_is_invalid_argument() {
        let (sink, previous) = sink_with_memory();

        let err = sink.set_backend(None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(previous.is_empty());

        sink.log(Severity::Debug, "T", "m");
        assert_eq!(previous.len(), 1);
    }

    #[test]
    fn test_log_routes_by_severity_and_arity() {
        let (sink, memory) = sink_with_memory();
        let cause = Cause::new("root");

        sink.log(Severity::Debug, "A", "d");
        sink.log_with_cause(Severity::Warn, "B", "w", &cause);
        sink.log_with_cause(Severity::Error, "C", "e", &cause);

        let entries = memory.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            (entries[0].severity, entries[0].cause.is_none()),
            (Severity::Debug, true)
        );
        assert_eq!(entries[1].severity, Severity::Warn);
        assert_eq!(entries[1].cause, Some(cause.clone()));
        assert_eq!(entries[2].severity, Severity::Error);
        assert_eq!(entries[2].tag, "C");
    }

    #[test]
    fn test_panicking_backend_does_not_escape() {
        let sink = DiagnosticSink::new(Arc::new(PanickingBackend));
        sink.log(Severity::Error, "T", "m");
        sink.log_with_cause(Severity::Warn, "T", "m", &Cause::new("c"));
    }

    #[test]
    fn test_swap_after_panicking_backend() {
        let sink = DiagnosticSink::new(Arc::new(PanickingBackend));
        sink.log(Severity::Warn, "T", "lost");

        let memory = Arc::new(MemoryBackend::new());
        assert!(sink.set_backend(Some(memory.clone())).unwrap().is_installed());

        sink.log(Severity::Warn, "T", "kept");
        sink.active().error("T", "direct");

        let messages: Vec<String> = memory.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["kept".to_string(), "direct".to_string()]);
    }

    #[test]
    fn test_tracing_backend_supports_all_operations() {
        let backend = TracingBackend;
        assert!(LogOperation::ALL.iter().all(|op| backend.supports(*op)));
        backend.warn("T", "through tracing");
    }
}
