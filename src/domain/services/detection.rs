//! Detection rules: given what a directory contains, decide how to publish.

use std::path::{Path, PathBuf};

use crate::domain::entities::{DetectionMode, DetectionResult, DEFAULT_BATCH_FILE};

/// Apply the detection priority to already-gathered evidence.
///
/// A batch config wins over any number of project files; otherwise exactly
/// one project file selects single-project mode.
pub fn classify_directory(
    dir: &Path,
    batch_config: Option<PathBuf>,
    mut project_files: Vec<PathBuf>,
) -> DetectionResult {
    project_files.sort();

    if let Some(config) = batch_config {
        return DetectionResult {
            mode: DetectionMode::Batch,
            message: format!("batch config found: {}", config.display()),
            batch_config: Some(config),
            project_files,
            hints: Vec::new(),
        };
    }

    match project_files.len() {
        1 => DetectionResult {
            mode: DetectionMode::Single,
            message: format!("project found: {}", project_files[0].display()),
            batch_config: None,
            project_files,
            hints: Vec::new(),
        },
        0 => DetectionResult {
            mode: DetectionMode::NoConfiguration,
            message: format!(
                "no project file or {} in {}",
                DEFAULT_BATCH_FILE,
                dir.display()
            ),
            batch_config: None,
            project_files,
            hints: vec![
                "Publish a single project: run dotship from a folder with one *.csproj".to_string(),
                "or pass it explicitly: dotship publish --csproj <path>".to_string(),
                format!(
                    "Publish several projects: create {} with: dotship init-batch",
                    DEFAULT_BATCH_FILE
                ),
            ],
        },
        count => {
            let mut hints = vec![
                "Create a batch config: dotship init-batch".to_string(),
                "or pick one project: dotship publish --csproj <path>".to_string(),
                "Found projects:".to_string(),
            ];
            hints.extend(
                project_files
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| format!("  - {}", n.to_string_lossy())),
            );
            DetectionResult {
                mode: DetectionMode::Ambiguous,
                message: format!("{} project files found in {}", count, dir.display()),
                batch_config: None,
                project_files,
                hints,
            }
        }
    }
}
