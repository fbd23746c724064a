//! Error types for dotship
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.
//! Each error family matches one layer of a publish run:
//! resolving the project, running its deployment, running a batch.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{LocalError, RemoteError};

/// Result type alias for dotship operations
pub type DotshipResult<T> = Result<T, DotshipError>;

/// Crate-level error covering every publish phase
#[derive(Error, Debug)]
pub enum DotshipError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    /// Bad or contradictory command-line input
    #[error("{message}")]
    Validation { message: String },
}

impl DotshipError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DotshipError::Resolve(e) => e.exit_code(),
            _ => 1,
        }
    }
}

/// Failure to turn a project descriptor plus settings into a deployment spec.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no project file (*.csproj) found in {dir}")]
    NoProjectFound { dir: PathBuf },

    #[error("{count} project files found in {dir}; pass --csproj to pick one")]
    AmbiguousProjects { dir: PathBuf, count: usize },

    #[error("project file not found: {path}")]
    ProjectFileMissing { path: PathBuf },

    #[error("'{path}' is not a .csproj file")]
    WrongExtension { path: PathBuf },

    #[error("cannot read project file: {message}")]
    ProjectFileUnreadable { path: PathBuf, message: String },

    #[error("cannot resolve version for {project}: {reason}")]
    VersionUnresolvable { project: String, reason: String },

    #[error("project {project} has no Sdk attribute")]
    MissingSdk { project: String },

    #[error("unknown SDK '{sdk}' in {project}")]
    UnknownSdk { project: String, sdk: String },

    #[error("settings section '{section}' not found for {project}")]
    MissingConfigSection { project: String, section: String },

    #[error("invalid settings: {message}")]
    InvalidSettings { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// Process exit code for this resolution failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ResolveError::NoProjectFound { .. } => 2,
            ResolveError::AmbiguousProjects { .. } => 3,
            ResolveError::ProjectFileMissing { .. } | ResolveError::ProjectFileUnreadable { .. } => 4,
            ResolveError::WrongExtension { .. } => 5,
            ResolveError::VersionUnresolvable { .. } => 6,
            ResolveError::MissingSdk { .. } => 7,
            ResolveError::UnknownSdk { .. } => 8,
            ResolveError::MissingConfigSection { .. } | ResolveError::InvalidSettings { .. } => 9,
            ResolveError::Io(_) => 1,
        }
    }
}

/// Result type alias for deployment steps
pub type DeployResult<T> = Result<T, DeployError>;

/// A failed step of the deployment state machine.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("{step} failed:\n{output}")]
    BuildFailed { step: String, output: String },

    #[error("{what} is not configured ({hint})")]
    CredentialMissing { what: String, hint: String },

    #[error("{step} failed on '{path}': {source}")]
    Remote {
        step: String,
        path: String,
        #[source]
        source: RemoteError,
    },

    #[error("pushing {package} to {feed} failed:\n{output}")]
    PackagePushFailed {
        package: String,
        feed: String,
        output: String,
    },

    #[error("nginx rejected the configuration for {site} (backup restored: {restored})\n{output}")]
    NginxConfigInvalid {
        site: String,
        restored: bool,
        output: String,
    },

    #[error("{step}: {source}")]
    Local {
        step: String,
        #[source]
        source: LocalError,
    },

    #[error("IO error at {path}: {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DeployError {
    pub(crate) fn remote(step: &str, path: &str, source: RemoteError) -> Self {
        DeployError::Remote {
            step: step.to_string(),
            path: path.to_string(),
            source,
        }
    }

    pub(crate) fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeployError::LocalIo {
            path: path.into(),
            source,
        }
    }
}

/// Failure to load or validate a batch configuration.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("batch config not found: {path}\nCreate one with: dotship init-batch")]
    ConfigNotFound { path: PathBuf },

    #[error("invalid batch config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("batch config {path} lists no projects")]
    NoProjects { path: PathBuf },

    #[error("batch config {path} has no enabled projects")]
    NoEnabledProjects { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_error_exit_codes_are_distinct_per_kind() {
        let dir = PathBuf::from("/src/app");
        assert_eq!(ResolveError::NoProjectFound { dir: dir.clone() }.exit_code(), 2);
        assert_eq!(
            ResolveError::AmbiguousProjects { dir, count: 2 }.exit_code(),
            3
        );
        assert_eq!(
            ResolveError::ProjectFileMissing {
                path: PathBuf::from("a.csproj")
            }
            .exit_code(),
            4
        );
        assert_eq!(
            ResolveError::WrongExtension {
                path: PathBuf::from("a.txt")
            }
            .exit_code(),
            5
        );
        assert_eq!(
            ResolveError::VersionUnresolvable {
                project: "App".into(),
                reason: "no Version".into()
            }
            .exit_code(),
            6
        );
        assert_eq!(
            ResolveError::MissingSdk {
                project: "App".into()
            }
            .exit_code(),
            7
        );
        assert_eq!(
            ResolveError::UnknownSdk {
                project: "App".into(),
                sdk: "Foo".into()
            }
            .exit_code(),
            8
        );
        assert_eq!(
            ResolveError::MissingConfigSection {
                project: "App".into(),
                section: "Dotship".into()
            }
            .exit_code(),
            9
        );
    }

    #[test]
    fn batch_not_found_names_init_command() {
        let err = BatchError::ConfigNotFound {
            path: PathBuf::from("dotship-solution.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("dotship-solution.json"));
        assert!(msg.contains("dotship init-batch"));
    }

    #[test]
    fn dotship_error_forwards_resolve_exit_code() {
        let err: DotshipError = ResolveError::WrongExtension {
            path: PathBuf::from("x.sln"),
        }
        .into();
        assert_eq!(err.exit_code(), 5);

        let err = DotshipError::Validation {
            message: "--csproj conflicts with --solution".into(),
        };
        assert_eq!(err.exit_code(), 1);
    }
}
