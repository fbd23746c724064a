//! Outcome of probing a directory for something to publish.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    Batch,
    Single,
    NoConfiguration,
    Ambiguous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    pub mode: DetectionMode,
    /// Batch config that was found, if any
    pub batch_config: Option<PathBuf>,
    /// Project descriptors found in the directory, sorted by name
    pub project_files: Vec<PathBuf>,
    pub message: String,
    /// Remediation steps, non-empty whenever detection is unsuccessful
    pub hints: Vec<String>,
}

impl DetectionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.mode, DetectionMode::Batch | DetectionMode::Single)
    }

    /// File names of the discovered descriptors.
    pub fn project_file_names(&self) -> Vec<String> {
        self.project_files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }
}
