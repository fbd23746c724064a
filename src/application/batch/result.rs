//! Batch Result

use std::path::PathBuf;

/// How one enabled project ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub path: PathBuf,
    /// `None` on success
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated result of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub config: PathBuf,
    /// Disabled entries that were never started
    pub skipped: usize,
    /// One entry per enabled project, in config order
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// `(project, reason)` for every failed project.
    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error.as_deref().map(|e| (&o.path, e)))
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// 0 when every project succeeded, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
