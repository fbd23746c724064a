//! Publish command - the default action
//!
//! Project selection, first match wins:
//! 1. `--csproj <path>` publishes that project
//! 2. `--batch <file>` or `--solution <folder>` runs a batch
//! 3. Otherwise the working directory is scanned (see `detect`)

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use dotship::application::{
    batch_config_path, detect, load_batch_config, BatchReport, BatchUseCase, DeployReport,
    ResolveOptions,
};
use dotship::domain::entities::{DeployIntent, DetectionMode, DetectionResult};
use dotship::error::{DotshipError, DotshipResult, ResolveError};
use dotship::presentation::{factory, Cli};

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::events::ConsoleBatchSink;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

pub fn cmd_publish(cli: &Cli, working_dir: &Path) -> Result<i32> {
    if cli.csproj.is_some() && (cli.solution.is_some() || cli.batch.is_some()) {
        return Err(DotshipError::Validation {
            message: "--csproj cannot be combined with --solution or --batch".to_string(),
        }
        .into());
    }

    let caps = detect_capabilities();
    let intent = cli.intent();

    if let Some(project) = &cli.csproj {
        return publish_single(project, working_dir, intent, &caps);
    }

    if cli.solution.is_some() || cli.batch.is_some() {
        let config = batch_config_path(cli.batch.as_deref(), cli.solution.as_deref(), working_dir);
        return run_batch(&config, working_dir, intent, &caps);
    }

    let detection = detect(working_dir)
        .with_context(|| format!("Failed to scan {}", working_dir.display()))?;
    debug!(mode = ?detection.mode, "detected publish mode");

    match detection.mode {
        DetectionMode::Batch => {
            let config = detection
                .batch_config
                .unwrap_or_else(|| batch_config_path(None, None, working_dir));
            run_batch(&config, working_dir, intent, &caps)
        }
        DetectionMode::Single => match detection.project_files.first() {
            Some(project) => publish_single(project, working_dir, intent, &caps),
            None => Ok(report_detection_failure(&detection, working_dir, &caps)),
        },
        DetectionMode::NoConfiguration | DetectionMode::Ambiguous => {
            Ok(report_detection_failure(&detection, working_dir, &caps))
        }
    }
}

/// Resolve and deploy one project.
fn publish_project(
    project: &Path,
    working_dir: &Path,
    intent: DeployIntent,
) -> DotshipResult<DeployReport> {
    let options = ResolveOptions::new(working_dir)
        .with_project(Some(project.to_path_buf()))
        .with_intent(intent);
    let spec = factory::create_resolve_use_case().resolve(&options)?;
    let report = factory::create_deploy_use_case().run(&spec)?;
    Ok(report)
}

fn publish_single(
    project: &Path,
    working_dir: &Path,
    intent: DeployIntent,
    caps: &TerminalCapabilities,
) -> Result<i32> {
    let report = publish_project(project, working_dir, intent)?;
    print!(
        "{}",
        deploy_summary(&report).render(caps.supports_color, caps.supports_unicode)
    );
    Ok(0)
}

fn run_batch(
    config_path: &Path,
    working_dir: &Path,
    intent: DeployIntent,
    caps: &TerminalCapabilities,
) -> Result<i32> {
    let config = load_batch_config(config_path).map_err(DotshipError::from)?;
    let sink = ConsoleBatchSink::new(caps);

    let publisher = |project: &Path| -> DotshipResult<()> {
        let report = publish_project(project, working_dir, intent)?;
        print!(
            "{}",
            deploy_summary(&report).render(caps.supports_color, caps.supports_unicode)
        );
        Ok(())
    };
    let report = BatchUseCase::new(publisher).run(&config, config_path, &sink);

    print!(
        "{}",
        batch_summary(&report).render(caps.supports_color, caps.supports_unicode)
    );
    Ok(report.exit_code())
}

/// Print why nothing can be published and return the matching exit code.
fn report_detection_failure(
    detection: &DetectionResult,
    working_dir: &Path,
    caps: &TerminalCapabilities,
) -> i32 {
    let dir = working_dir.to_path_buf();
    let error = match detection.mode {
        DetectionMode::Ambiguous => ResolveError::AmbiguousProjects {
            dir,
            count: detection.project_files.len(),
        },
        _ => ResolveError::NoProjectFound { dir },
    };

    let block = ErrorBlock::new(detection.message.as_str())
        .with_fixes(detection.hints.iter().cloned());
    eprint!("{}", block.render(caps.supports_color, caps.supports_unicode));
    error.exit_code()
}

pub(crate) fn deploy_summary(report: &DeployReport) -> ResultSummary {
    let mut summary = ResultSummary::success(format!(
        "Published {} {} ({})",
        report.project, report.version, report.kind
    ));
    summary.add_stat("steps completed", report.completed.len());

    if let Some(archive) = &report.release_archive {
        summary.add_info(format!("previous release archived to {}", archive));
    }
    if let Some(nginx) = &report.nginx {
        if nginx.installed {
            summary.add_info("nginx installed");
        }
        if nginx.created {
            summary.add_info("nginx site created");
        }
        if nginx.relinked {
            summary.add_info("nginx site re-enabled");
        }
        if let Some(backup) = &nginx.backup {
            summary.add_info(format!("nginx site updated (backup: {})", backup));
        }
        if nginx.reloaded {
            summary.add_info("nginx reloaded");
        }
    }
    for warning in &report.warnings {
        summary.add_warning(warning.as_str());
    }
    if report.duplicate_package {
        summary.with_next_step("raise <Version> in the project file to push a new package");
    }
    summary
}

pub(crate) fn batch_summary(report: &BatchReport) -> ResultSummary {
    let mut summary = if report.is_success() {
        ResultSummary::success(format!("Batch {} finished", report.config.display()))
    } else {
        ResultSummary::partial(format!(
            "Batch {} finished with failures",
            report.config.display()
        ))
    };
    summary.add_stat("succeeded", report.succeeded());
    summary.add_stat("failed", report.failed());
    if report.skipped > 0 {
        summary.add_stat("skipped (disabled)", report.skipped);
    }
    for (path, error) in report.failures() {
        summary.add_failure(format!("{}: {}", path.display(), error));
    }
    summary
}
