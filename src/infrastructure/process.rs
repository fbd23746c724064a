//! Local executor backed by `std::process::Command`.
//!
//! Archives are built in-process with `tar` + `flate2` so publishing
//! does not depend on a `tar` binary on the developer machine.

use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Stdio};

use flate2::write::GzEncoder;
use flate2::Compression;
use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::domain::ports::{CommandOutput, CommandSpec, LocalError, LocalExecutor, LocalResult};

/// Plain file names, compared without regard to case.
const FILE_NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl LocalExecutor for ProcessExecutor {
    fn run(&self, command: &CommandSpec, working_dir: &Path) -> LocalResult<CommandOutput> {
        debug!(command = %command, dir = %working_dir.display(), "running");
        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| LocalError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn delete_glob(&self, dir: &Path, pattern: &str) -> LocalResult<usize> {
        let matcher = Pattern::new(pattern).map_err(|e| LocalError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        })?;
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(LocalError::Io {
                    path: dir.to_path_buf(),
                    source,
                })
            }
        };

        let mut deleted = 0;
        for entry in entries {
            let entry = entry.map_err(|source| LocalError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let name = entry.file_name();
            if !path.is_file() || !matcher.matches_with(&name.to_string_lossy(), FILE_NAME_MATCH) {
                continue;
            }
            fs::remove_file(&path).map_err(|source| LocalError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "deleted");
            deleted += 1;
        }
        Ok(deleted)
    }

    fn archive(&self, root: &Path, entry: &str, archive: &Path) -> LocalResult<()> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| LocalError::Io { path, source }
        };

        let file = File::create(archive).map_err(io_err(archive))?;
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        let source = root.join(entry);
        builder
            .append_dir_all(entry, &source)
            .map_err(io_err(&source))?;
        builder
            .into_inner()
            .and_then(|gz| gz.finish())
            .map_err(io_err(archive))?;
        Ok(())
    }
}
