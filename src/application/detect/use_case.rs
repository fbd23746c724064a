//! Detect Use Case

use std::path::Path;

use tracing::debug;

use crate::application::resolve::list_projects;
use crate::domain::entities::{DetectionResult, DEFAULT_BATCH_FILE};
use crate::domain::services::classify_directory;

/// Probe `dir` for a batch config and `*.csproj` files, then classify.
pub fn detect(dir: &Path) -> std::io::Result<DetectionResult> {
    let candidate = dir.join(DEFAULT_BATCH_FILE);
    let batch_config = candidate.is_file().then_some(candidate);
    let projects = list_projects(dir)?;
    debug!(
        dir = %dir.display(),
        batch = batch_config.is_some(),
        projects = projects.len(),
        "scanned directory"
    );
    Ok(classify_directory(dir, batch_config, projects))
}
