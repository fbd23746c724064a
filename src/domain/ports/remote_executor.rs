//! RemoteExecutor port - file and service operations on the target host
//!
//! Remote paths are plain strings because the target is always a POSIX
//! host, whatever platform dotship itself runs on.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::domain::entities::LinuxTargetConfig;

/// Result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote command ran and exited non-zero
    #[error("`{command}` exited with status {status}: {output}")]
    CommandFailed {
        command: String,
        status: i32,
        output: String,
    },

    /// ssh/scp could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl RemoteError {
    /// Captured output of a failed command, if any.
    pub fn output(&self) -> &str {
        match self {
            RemoteError::CommandFailed { output, .. } => output,
            _ => "",
        }
    }
}

/// Service manager actions issued through `systemctl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
    Enable,
    DaemonReload,
}

impl ServiceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Enable => "enable",
            ServiceAction::DaemonReload => "daemon-reload",
        }
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations the deployment state machine needs on the target host.
///
/// Only presence of files and directories is ever checked; content is
/// written or replaced but never read back for comparison.
///
/// Implementations:
/// - `SshRemote` - ssh/scp shell-out
/// - simulated remotes in tests
pub trait RemoteExecutor {
    fn file_exists(&self, path: &str) -> RemoteResult<bool>;

    fn dir_exists(&self, path: &str) -> RemoteResult<bool>;

    /// `mkdir -p`, as root when `privileged`
    fn create_dir(&self, path: &str, privileged: bool) -> RemoteResult<()>;

    /// `rm -rf`, as root when `privileged`
    fn remove_dir(&self, path: &str, privileged: bool) -> RemoteResult<()>;

    /// Remove everything inside `path`, keeping the directory
    fn clear_dir(&self, path: &str) -> RemoteResult<()>;

    /// Copy a local file into `remote_dir`, keeping its file name
    fn upload(&self, local: &Path, remote_dir: &str) -> RemoteResult<()>;

    fn download(&self, remote: &str, local: &Path) -> RemoteResult<()>;

    fn move_path(&self, from: &str, to: &str, overwrite: bool) -> RemoteResult<()>;

    /// Move every entry of `from_dir` into `to_dir`
    fn move_contents(&self, from_dir: &str, to_dir: &str) -> RemoteResult<()>;

    fn copy(&self, from: &str, to: &str, overwrite: bool) -> RemoteResult<()>;

    /// Extract a `.tar.gz` into `dest_dir`
    fn unpack(&self, archive: &str, dest_dir: &str) -> RemoteResult<()>;

    /// Pack the contents of `source_dir` into a `.tar.gz`
    fn archive_dir(&self, source_dir: &str, archive: &str) -> RemoteResult<()>;

    fn chown(&self, owner: &str, path: &str, recursive: bool) -> RemoteResult<()>;

    fn symlink(&self, target: &str, link: &str, overwrite: bool) -> RemoteResult<()>;

    fn service(&self, action: ServiceAction, unit: &str) -> RemoteResult<()>;

    fn install_package(&self, package: &str) -> RemoteResult<()>;

    /// Run a shell command as root inside `working_dir`, returning its output
    fn run_privileged(&self, working_dir: &str, command: &str) -> RemoteResult<String>;

    /// `nginx -t`; a rejected configuration is an error carrying nginx's output
    fn nginx_test(&self) -> RemoteResult<()>;

    fn nginx_reload(&self) -> RemoteResult<()>;

    /// Provision a certificate for `host_names` at the given paths
    fn request_certificate(
        &self,
        host_names: &[String],
        certificate_path: &str,
        key_path: &str,
    ) -> RemoteResult<()>;
}

/// Opens a remote executor for a Linux target.
///
/// Library publishes never connect; host deployments connect once per run.
pub trait RemoteConnector {
    type Remote: RemoteExecutor;

    fn connect(&self, target: &LinuxTargetConfig) -> Self::Remote;
}

impl<F, R> RemoteConnector for F
where
    F: Fn(&LinuxTargetConfig) -> R,
    R: RemoteExecutor,
{
    type Remote = R;

    fn connect(&self, target: &LinuxTargetConfig) -> R {
        self(target)
    }
}
