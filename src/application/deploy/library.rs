//! Library deployment: `dotnet pack`, then `dotnet nuget push`.
//!
//! Pre-release versions go to the local debug package store together with
//! their symbols; release versions go to the configured feed with the API key
//! read from the token file.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::entities::{DeploymentSpec, NuGetConfig};
use crate::domain::ports::{CommandOutput, CommandSpec, LocalExecutor};
use crate::error::{DeployError, DeployResult};

use super::plan::LibraryStep;
use super::result::DeployReport;

pub(super) fn run_step<L: LocalExecutor>(
    local: &L,
    spec: &DeploymentSpec,
    nuget: &NuGetConfig,
    step: LibraryStep,
    report: &mut DeployReport,
) -> DeployResult<()> {
    match step {
        LibraryStep::Pack => pack(local, spec),
        LibraryStep::PublishPackage if spec.is_prerelease() => push_debug(local, spec, nuget),
        LibraryStep::PublishPackage => push_release(local, spec, nuget, report),
    }
}

fn pack<L: LocalExecutor>(local: &L, spec: &DeploymentSpec) -> DeployResult<()> {
    let output = &spec.work.output_path;
    let removed = local
        .delete_glob(output, "*.nupkg")
        .map_err(|source| DeployError::Local {
            step: "pack".into(),
            source,
        })?;
    if removed > 0 {
        debug!(count = removed, dir = %output.display(), "removed stale packages");
    }

    let mut command = CommandSpec::new("dotnet")
        .arg("pack")
        .arg("--configuration")
        .arg(spec.build_configuration.as_str());
    if spec.is_prerelease() {
        command = command.arg("--include-source");
    }
    let command = command
        .arg("--output")
        .path_arg(output)
        .path_arg(&spec.project.path);

    run_checked(local, &command, &spec.project.folder, "dotnet pack")
}

fn push_debug<L: LocalExecutor>(
    local: &L,
    spec: &DeploymentSpec,
    nuget: &NuGetConfig,
) -> DeployResult<()> {
    let storage = nuget
        .local_debug_storage
        .as_ref()
        .ok_or_else(|| DeployError::CredentialMissing {
            what: "local debug package storage".into(),
            hint: "dotship set --nuget-debug-package-path <folder>".into(),
        })?;

    let package = spec.work.output_path.join(format!(
        "{}.{}.symbols.nupkg",
        spec.project_name(),
        spec.version
    ));
    info!(package = %package.display(), storage = %storage.display(), "pushing debug package");

    let command = CommandSpec::new("dotnet")
        .arg("nuget")
        .arg("push")
        .path_arg(&package)
        .arg("--source")
        .path_arg(storage);
    let output = run(local, &command, &spec.project.folder, "dotnet nuget push")?;
    if output.success {
        Ok(())
    } else {
        Err(DeployError::PackagePushFailed {
            package: package.display().to_string(),
            feed: storage.display().to_string(),
            output: output.combined(),
        })
    }
}

fn push_release<L: LocalExecutor>(
    local: &L,
    spec: &DeploymentSpec,
    nuget: &NuGetConfig,
    report: &mut DeployReport,
) -> DeployResult<()> {
    let token_path = nuget
        .auth_token_path
        .as_ref()
        .ok_or_else(|| DeployError::CredentialMissing {
            what: "NuGet API key file".into(),
            hint: "dotship set --nuget-key-path <file>".into(),
        })?;
    let token = read_token(token_path)?;

    info!(feed = %nuget.feed_url, version = %spec.version, "pushing package");
    let command = CommandSpec::new("dotnet")
        .arg("nuget")
        .arg("push")
        .arg("*.nupkg")
        .arg("-k")
        .secret_arg(token)
        .arg("-s")
        .arg(nuget.feed_url.as_str())
        .arg("--skip-duplicate");
    let output = run(local, &command, &spec.work.output_path, "dotnet nuget push")?;

    let combined = output.combined();
    if output.success {
        return Ok(());
    }
    if is_duplicate_push(&combined) {
        report.duplicate_package = true;
        report.warn(format!(
            "{} {} already exists on {}",
            spec.project_name(),
            spec.version,
            nuget.feed_url
        ));
        return Ok(());
    }
    Err(DeployError::PackagePushFailed {
        package: format!("{}.{}", spec.project_name(), spec.version),
        feed: nuget.feed_url.clone(),
        output: combined,
    })
}

/// Read the API key: the file must hold exactly one non-empty line.
pub(crate) fn read_token(path: &Path) -> DeployResult<String> {
    let content = fs::read_to_string(path).map_err(|e| DeployError::CredentialMissing {
        what: format!("NuGet API key file {}", path.display()),
        hint: e.to_string(),
    })?;
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    match lines.as_slice() {
        [token] => Ok((*token).to_string()),
        _ => Err(DeployError::CredentialMissing {
            what: format!("NuGet API key in {}", path.display()),
            hint: format!("expected exactly one line, found {}", lines.len()),
        }),
    }
}

const STATUS_LINE: &str = "response status code does not indicate success:";

/// The feed refused the push because this version is already published.
///
/// A status line from the feed decides on its own; only a 409 counts. Without
/// one, the feed's "already exists" wording is accepted. Package file names
/// and versions echoed by `dotnet nuget push` are never inspected.
pub(crate) fn is_duplicate_push(output: &str) -> bool {
    let lower = output.to_lowercase();
    let statuses: Vec<&str> = lower
        .lines()
        .filter_map(|line| line.split_once(STATUS_LINE).map(|(_, rest)| rest.trim_start()))
        .collect();
    if !statuses.is_empty() {
        return statuses.iter().any(|rest| {
            let code: String = rest.chars().take_while(char::is_ascii_digit).collect();
            code == "409"
        });
    }
    lower
        .lines()
        .any(|line| line.contains("already exists") || line.contains("already contains"))
}

fn run<L: LocalExecutor>(
    local: &L,
    command: &CommandSpec,
    working_dir: &Path,
    step: &str,
) -> DeployResult<CommandOutput> {
    debug!(command = %command, dir = %working_dir.display(), "exec");
    local
        .run(command, working_dir)
        .map_err(|source| DeployError::Local {
            step: step.to_string(),
            source,
        })
}

pub(super) fn run_checked<L: LocalExecutor>(
    local: &L,
    command: &CommandSpec,
    working_dir: &Path,
    step: &str,
) -> DeployResult<()> {
    let output = run(local, command, working_dir, step)?;
    if output.success {
        Ok(())
    } else {
        Err(DeployError::BuildFailed {
            step: step.to_string(),
            output: output.combined(),
        })
    }
}
