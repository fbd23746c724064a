//! Resolve Options

use std::path::PathBuf;

use crate::domain::entities::DeployIntent;
use crate::infrastructure::fs::{dotship_home_dir, global_settings_path, user_secrets_root};

/// Options for the resolve use case
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Explicit descriptor path; `None` scans `working_dir`
    pub project: Option<PathBuf>,
    /// Directory relative paths and `./dotship.json` are taken from
    pub working_dir: PathBuf,
    /// Parent of the default work folder (`<temp_root>/dotship`)
    pub temp_root: PathBuf,
    /// User-profile settings layer
    pub global_settings: Option<PathBuf>,
    /// Root of the user-secrets store
    pub user_secrets_root: Option<PathBuf>,
    /// Target of `~` in configured paths
    pub home: Option<PathBuf>,
    pub intent: DeployIntent,
}

impl ResolveOptions {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            project: None,
            working_dir: working_dir.into(),
            temp_root: std::env::temp_dir(),
            global_settings: global_settings_path(),
            user_secrets_root: user_secrets_root(),
            home: dotship_home_dir(),
            intent: DeployIntent::default(),
        }
    }

    pub fn with_project(mut self, project: Option<PathBuf>) -> Self {
        self.project = project;
        self
    }

    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = temp_root.into();
        self
    }

    pub fn with_global_settings(mut self, path: Option<PathBuf>) -> Self {
        self.global_settings = path;
        self
    }

    pub fn with_user_secrets_root(mut self, root: Option<PathBuf>) -> Self {
        self.user_secrets_root = root;
        self
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    pub fn with_intent(mut self, intent: DeployIntent) -> Self {
        self.intent = intent;
        self
    }
}
