//! Batch config loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{BatchConfig, DEFAULT_BATCH_FILE};
use crate::error::BatchError;

/// Config file for a batch run: an explicit file, `<folder>/dotship-solution.json`
/// for a solution folder, or the default file in the working directory.
pub fn batch_config_path(
    explicit: Option<&Path>,
    solution_dir: Option<&Path>,
    working_dir: &Path,
) -> PathBuf {
    let absolute = |p: &Path| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            working_dir.join(p)
        }
    };
    match (explicit, solution_dir) {
        (Some(file), _) => absolute(file),
        (None, Some(dir)) => absolute(dir).join(DEFAULT_BATCH_FILE),
        (None, None) => working_dir.join(DEFAULT_BATCH_FILE),
    }
}

/// Read and validate a batch config; `base_directory` is set to the file's folder.
pub fn load_batch_config(path: &Path) -> Result<BatchConfig, BatchError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BatchError::ConfigNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(BatchError::Io(e)),
    };

    let mut config: BatchConfig = serde_json::from_str(content.trim_start_matches('\u{feff}'))
        .map_err(|source| BatchError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if config.projects.is_empty() {
        return Err(BatchError::NoProjects {
            path: path.to_path_buf(),
        });
    }
    if config.enabled_projects().next().is_none() {
        return Err(BatchError::NoEnabledProjects {
            path: path.to_path_buf(),
        });
    }

    config.base_directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    debug!(
        path = %path.display(),
        projects = config.projects.len(),
        "batch config loaded"
    );
    Ok(config)
}
