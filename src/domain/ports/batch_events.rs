//! Batch Event Port
//!
//! Progress of a batch run, reported project by project.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum BatchEvent {
    Started {
        config: PathBuf,
        enabled: usize,
        skipped: usize,
    },

    ProjectStarted {
        index: usize,
        total: usize,
        path: PathBuf,
    },

    ProjectSucceeded { index: usize, path: PathBuf },

    ProjectFailed {
        index: usize,
        path: PathBuf,
        error: String,
    },

    Completed { succeeded: usize, failed: usize },
}

/// Trait for receiving batch events
///
/// Implementations can be:
/// - ConsoleBatchSink: progress lines in the terminal
/// - NoopEventSink: silent operation
pub trait BatchEventSink {
    fn on_event(&self, event: BatchEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BatchEventSink for NoopEventSink {
    fn on_event(&self, _event: BatchEvent) {}
}
