//! In-memory Diagnostic Backend

use bridge_traits::diagnostics::{Cause, DiagnosticBackend, LogEntry, Severity};
use parking_lot::Mutex;
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 256;

/// Keeps the most recent diagnostic entries in a bounded buffer.
///
/// Oldest entries are evicted once `capacity` is reached.
#[derive(Debug)]
pub struct MemoryBackend {
    capacity: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Snapshot of the buffered entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticBackend for MemoryBackend {
    fn debug(&self, tag: &str, message: &str) {
        self.push(LogEntry::new(Severity::Debug, tag, message));
    }

    fn debug_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
        self.push(LogEntry::new(Severity::Debug, tag, message).with_cause(cause.clone()));
    }

    fn warn(&self, tag: &str, message: &str) {
        self.push(LogEntry::new(Severity::Warn, tag, message));
    }

    fn warn_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
        self.push(LogEntry::new(Severity::Warn, tag, message).with_cause(cause.clone()));
    }

    fn error(&self, tag: &str, message: &str) {
        self.push(LogEntry::new(Severity::Error, tag, message));
    }

    fn error_with_cause(&self, tag: &str, message: &str, cause: &Cause) {
        self.push(LogEntry::new(Severity::Error, tag, message).with_cause(cause.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_entries_in_order() {
        let backend = MemoryBackend::new();
        backend.debug("A", "first");
        backend.error_with_cause("B", "second", &Cause::new("boom"));

        let entries = backend.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].severity, Severity::Debug);
        assert_eq!(entries[0].tag, "A");
        assert_eq!(entries[1].severity, Severity::Error);
        assert_eq!(entries[1].cause.as_ref().unwrap().message, "boom");
    }

    #[test]
    fn test_evicts_oldest_at_capacity() {
        let backend = MemoryBackend::with_capacity(2);
        backend.warn("T", "1");
        backend.warn("T", "2");
        backend.warn("T", "3");

        let messages: Vec<String> = backend.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["2".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_clear() {
        let backend = MemoryBackend::new();
        backend.warn("T", "m");
        assert!(!backend.is_empty());
        backend.clear();
        assert!(backend.is_empty());
    }
}
