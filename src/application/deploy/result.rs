//! Deploy Report
//!
//! What a successful deployment did.

use crate::domain::value_objects::OutputKind;

use super::nginx::NginxOutcome;

/// Result of one project's deployment
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub project: String,
    pub version: String,
    pub kind: OutputKind,
    /// Steps that ran to completion, in order
    pub completed: Vec<&'static str>,
    /// Best-effort actions that failed without stopping the run
    pub warnings: Vec<String>,
    /// Archive of the previous release, when one was taken
    pub release_archive: Option<String>,
    pub nginx: Option<NginxOutcome>,
    /// Set when the feed already held this package version
    pub duplicate_package: bool,
}

impl DeployReport {
    pub fn new(project: impl Into<String>, version: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            project: project.into(),
            version: version.into(),
            kind,
            completed: Vec::new(),
            warnings: Vec::new(),
            release_archive: None,
            nginx: None,
            duplicate_package: false,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub(crate) fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}
