//! LocalExecutor port - build tooling and scratch files on this machine

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for local operations
pub type LocalResult<T> = Result<T, LocalError>;

#[derive(Debug, Error)]
pub enum LocalError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// A program plus arguments. Arguments marked secret are masked when displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    secret: Vec<usize>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            secret: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    /// An argument that must never show up in logs.
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret.push(self.args.len());
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for (i, arg) in self.args.iter().enumerate() {
            if self.secret.contains(&i) {
                f.write_str(" ***")?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn combined(&self) -> String {
        match (self.stdout.trim(), self.stderr.trim()) {
            ("", err) => err.to_string(),
            (out, "") => out.to_string(),
            (out, err) => format!("{}\n{}", out, err),
        }
    }
}

/// Implementations:
/// - `ProcessExecutor` - `std::process::Command`, in-process tar/gzip
/// - scripted executors in tests
pub trait LocalExecutor {
    /// Run a command to completion in `working_dir`.
    ///
    /// A command that starts but exits non-zero is `Ok` with `success == false`.
    fn run(&self, command: &CommandSpec, working_dir: &Path) -> LocalResult<CommandOutput>;

    /// Delete files in `dir` (not recursive) matching `*.<ext>` or an exact name.
    fn delete_glob(&self, dir: &Path, pattern: &str) -> LocalResult<usize>;

    /// Write `<root>/<entry>` recursively into a gzip tarball at `archive`.
    fn archive(&self, root: &Path, entry: &str, archive: &Path) -> LocalResult<()>;
}
