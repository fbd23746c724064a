//! Batch configuration: the list of projects published in one run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name looked for in the working directory.
pub const DEFAULT_BATCH_FILE: &str = "dotship-solution.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchConfig {
    #[serde(default)]
    pub projects: Vec<ProjectRef>,

    /// Directory of the file this config was loaded from
    #[serde(skip)]
    pub base_directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    pub path: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl BatchConfig {
    pub fn enabled_projects(&self) -> impl Iterator<Item = &ProjectRef> {
        self.projects.iter().filter(|p| p.enabled)
    }

    /// Project path relative to the config file; rooted paths pass through.
    pub fn resolve_path(&self, project: &ProjectRef) -> PathBuf {
        let path = Path::new(&project.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_directory.join(path)
        }
    }

    /// Starter config written by `dotship init-batch`.
    pub fn sample() -> Self {
        Self {
            projects: vec![
                ProjectRef {
                    path: "src/MyLibrary/MyLibrary.csproj".into(),
                    enabled: true,
                },
                ProjectRef {
                    path: "src/MyWebApi/MyWebApi.csproj".into(),
                    enabled: true,
                },
                ProjectRef {
                    path: "src/MyFrontEnd/MyFrontEnd.csproj".into(),
                    enabled: false,
                },
            ],
            base_directory: PathBuf::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_defaults_to_true() {
        let cfg: BatchConfig =
            serde_json::from_str(r#"{"projects":[{"path":"a/A.csproj"}]}"#).unwrap();
        assert!(cfg.projects[0].enabled);
    }

    #[test]
    fn resolve_path_joins_relative_and_keeps_absolute() {
        let base = std::env::temp_dir().join("solution");
        let cfg = BatchConfig {
            projects: Vec::new(),
            base_directory: base.clone(),
        };
        let rel = ProjectRef {
            path: "src/A/A.csproj".into(),
            enabled: true,
        };
        assert_eq!(cfg.resolve_path(&rel), base.join("src/A/A.csproj"));

        let abs_path = std::env::temp_dir().join("B.csproj");
        let abs = ProjectRef {
            path: abs_path.to_string_lossy().into_owned(),
            enabled: true,
        };
        assert_eq!(cfg.resolve_path(&abs), abs_path);
    }

    #[test]
    fn sample_serializes_camel_case_without_base_directory() {
        let json = serde_json::to_string(&BatchConfig::sample()).unwrap();
        assert!(json.contains("\"projects\""));
        assert!(json.contains("\"enabled\":false"));
        assert!(!json.contains("base"));
    }
}
