//! Linux host steps: build, transfer and the service / front-end updates.
//!
//! Every remote action goes through `RemoteExecutor`. Clearing or archiving
//! the previous release is best-effort and only produces a warning; all other
//! failures end the run.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::entities::{
    DeploymentSpec, LinuxTargetConfig, SERVICE_CONFIG_ROOT, SYSTEMD_UNIT_DIR,
};
use crate::domain::ports::{
    CommandSpec, LocalExecutor, RemoteError, RemoteExecutor, RemoteResult, ServiceAction,
};
use crate::domain::services::{render_service_config, render_systemd_unit};
use crate::error::{DeployError, DeployResult};

use super::library::run_checked;
use super::nginx;
use super::plan::HostStep;
use super::result::DeployReport;

/// Everything a host step needs.
pub(super) struct HostContext<'a, L, R> {
    pub local: &'a L,
    pub remote: &'a R,
    pub spec: &'a DeploymentSpec,
    pub linux: &'a LinuxTargetConfig,
    /// `yyyyMMddHHmmss`, shared by every backup of one run
    pub timestamp: String,
}

/// Attach the failing step and remote path to a remote error.
pub(super) trait RemoteStep<T> {
    fn at(self, step: &str, path: &str) -> DeployResult<T>;
}

impl<T> RemoteStep<T> for RemoteResult<T> {
    fn at(self, step: &str, path: &str) -> DeployResult<T> {
        self.map_err(|source| DeployError::remote(step, path, source))
    }
}

pub(super) fn run_step<L, R>(
    ctx: &HostContext<'_, L, R>,
    step: HostStep,
    report: &mut DeployReport,
) -> DeployResult<()>
where
    L: LocalExecutor,
    R: RemoteExecutor,
{
    match step {
        HostStep::Build => build(ctx),
        HostStep::Transfer => transfer(ctx, report),
        HostStep::UpdateFrontEnd => update_front_end(ctx, report),
        HostStep::StopService => stop_service(ctx),
        HostStep::RotateRelease => rotate_release(ctx, report),
        HostStep::DeployContent => deploy_content(ctx),
        HostStep::Migrate => migrate(ctx),
        HostStep::InstallService => install_service(ctx),
        HostStep::ReconcileNginx => {
            let outcome = nginx::reconcile(ctx)?;
            report.nginx = Some(outcome);
            Ok(())
        }
        HostStep::StartService => {
            let unit = ctx.linux.unit_file_name();
            ctx.remote
                .service(ServiceAction::Start, &unit)
                .at("start service", &unit)
        }
    }
}

fn build<L: LocalExecutor, R>(ctx: &HostContext<'_, L, R>) -> DeployResult<()> {
    let staging = &ctx.spec.work.temp_project_folder;
    if staging.exists() {
        fs::remove_dir_all(staging).map_err(|e| DeployError::local_io(staging, e))?;
    }
    fs::create_dir_all(staging).map_err(|e| DeployError::local_io(staging, e))?;

    // Host deployments always publish a Release build.
    let command = CommandSpec::new("dotnet")
        .arg("publish")
        .path_arg(&ctx.spec.project.path)
        .arg("--configuration")
        .arg("Release")
        .arg("-o")
        .path_arg(staging);
    run_checked(ctx.local, &command, &ctx.spec.project.folder, "dotnet publish")
}

fn transfer<L, R>(ctx: &HostContext<'_, L, R>, report: &mut DeployReport) -> DeployResult<()>
where
    L: LocalExecutor,
    R: RemoteExecutor,
{
    let linux = ctx.linux;
    let work = &ctx.spec.work;
    let archive = work.temp_work_folder.join(&linux.tar_file_name);

    ctx.local
        .archive(&work.temp_work_folder, ctx.spec.project_name(), &archive)
        .map_err(|source| DeployError::Local {
            step: "archive".into(),
            source,
        })?;

    let remote = ctx.remote;
    if !remote.dir_exists(&linux.temp_folder).at("transfer", &linux.temp_folder)? {
        remote
            .create_dir(&linux.temp_folder, false)
            .at("transfer", &linux.temp_folder)?;
    }
    if remote
        .dir_exists(&linux.temp_project_folder)
        .at("transfer", &linux.temp_project_folder)?
    {
        remote
            .remove_dir(&linux.temp_project_folder, true)
            .at("transfer", &linux.temp_project_folder)?;
    }
    remote
        .upload(&archive, &linux.temp_folder)
        .at("upload", &linux.temp_folder)?;
    remote
        .unpack(&linux.remote_archive_path(), &linux.temp_folder)
        .at("unpack", &linux.remote_archive_path())?;
    info!(archive = %linux.remote_archive_path(), "uploaded");

    if let Err(e) = fs::remove_file(&archive) {
        report.warn(format!("could not remove {}: {}", archive.display(), e));
    }
    if let Err(e) = fs::remove_dir_all(&work.temp_project_folder) {
        report.warn(format!(
            "could not remove {}: {}",
            work.temp_project_folder.display(),
            e
        ));
    }
    Ok(())
}

fn update_front_end<L, R>(ctx: &HostContext<'_, L, R>, report: &mut DeployReport) -> DeployResult<()>
where
    R: RemoteExecutor,
{
    let linux = ctx.linux;
    let publish = linux.publish_folder.as_str();
    prepare_publish_folder(ctx, report)?;

    let web_root = format!("{}/wwwroot", linux.temp_project_folder);
    ctx.remote
        .move_contents(&web_root, publish)
        .at("update front-end", &web_root)?;
    ctx.remote
        .chown(&linux.service_user, publish, true)
        .at("update front-end", publish)
}

fn stop_service<L, R: RemoteExecutor>(ctx: &HostContext<'_, L, R>) -> DeployResult<()> {
    let unit_path = ctx.linux.unit_file_path();
    if ctx.remote.file_exists(&unit_path).at("stop service", &unit_path)? {
        let unit = ctx.linux.unit_file_name();
        ctx.remote
            .service(ServiceAction::Stop, &unit)
            .at("stop service", &unit)?;
    } else {
        debug!(unit = %unit_path, "no unit installed yet");
    }
    Ok(())
}

fn rotate_release<L, R>(ctx: &HostContext<'_, L, R>, report: &mut DeployReport) -> DeployResult<()>
where
    R: RemoteExecutor,
{
    let linux = ctx.linux;
    let publish = linux.publish_folder.as_str();
    if ctx.remote.dir_exists(publish).at("rotate release", publish)? {
        let archive = format!(
            "{}/{}-{}.tar.gz",
            linux.release_archive_dir().trim_end_matches('/'),
            linux.service_name,
            ctx.timestamp
        );
        match ctx.remote.archive_dir(publish, &archive) {
            Ok(()) => {
                info!(archive = %archive, "previous release archived");
                report.release_archive = Some(archive);
            }
            Err(e) => report.warn(format!("could not archive {}: {}", publish, e)),
        }
    }
    prepare_publish_folder(ctx, report)
}

/// Empty the publish folder, creating it when absent.
fn prepare_publish_folder<L, R>(
    ctx: &HostContext<'_, L, R>,
    report: &mut DeployReport,
) -> DeployResult<()>
where
    R: RemoteExecutor,
{
    let publish = ctx.linux.publish_folder.as_str();
    if ctx.remote.dir_exists(publish).at("publish folder", publish)? {
        if let Err(e) = ctx.remote.clear_dir(publish) {
            report.warn(format!("could not clear {}: {}", publish, e));
        }
        Ok(())
    } else {
        ctx.remote
            .create_dir(publish, true)
            .at("publish folder", publish)
    }
}

fn deploy_content<L, R: RemoteExecutor>(ctx: &HostContext<'_, L, R>) -> DeployResult<()> {
    let linux = ctx.linux;
    let publish = linux.publish_folder.as_str();
    ctx.remote
        .move_contents(&linux.temp_project_folder, publish)
        .at("deploy content", &linux.temp_project_folder)?;
    ctx.remote
        .chown(&linux.service_user, publish, true)
        .at("deploy content", publish)
}

fn migrate<L, R: RemoteExecutor>(ctx: &HostContext<'_, L, R>) -> DeployResult<()> {
    let linux = ctx.linux;
    let publish = linux.publish_folder.as_str();
    if !ctx.remote.dir_exists(publish).at("migrate", publish)? {
        return Err(DeployError::remote(
            "migrate",
            publish,
            RemoteError::Other("publish folder does not exist".into()),
        ));
    }

    let config_path = linux.service_config_path();
    if !ctx.remote.file_exists(&config_path).at("migrate", &config_path)? {
        if !ctx
            .remote
            .dir_exists(SERVICE_CONFIG_ROOT)
            .at("migrate", SERVICE_CONFIG_ROOT)?
        {
            ctx.remote
                .create_dir(SERVICE_CONFIG_ROOT, true)
                .at("migrate", SERVICE_CONFIG_ROOT)?;
        }
        place_rendered(
            ctx,
            &render_service_config(linux),
            &linux.service_name,
            SERVICE_CONFIG_ROOT,
        )?;
    }

    let command = format!(
        "/usr/bin/dotnet {}/{}.dll --migrate",
        publish,
        ctx.spec.project_name()
    );
    let output = ctx
        .remote
        .run_privileged(publish, &command)
        .at("migrate", publish)?;
    debug!(output = %output.trim_end(), "migration finished");
    Ok(())
}

fn install_service<L, R: RemoteExecutor>(ctx: &HostContext<'_, L, R>) -> DeployResult<()> {
    let linux = ctx.linux;
    let unit = linux.unit_file_name();
    let unit_path = linux.unit_file_path();
    let unit_content = render_systemd_unit(ctx.spec.project_name(), linux);

    if !ctx.remote.file_exists(&unit_path).at("install service", &unit_path)? {
        place_rendered(ctx, &unit_content, &unit, SYSTEMD_UNIT_DIR)?;
        ctx.remote
            .service(ServiceAction::Enable, &unit)
            .at("install service", &unit)
    } else if ctx.spec.intent.update_service {
        place_rendered(ctx, &unit_content, &unit, SYSTEMD_UNIT_DIR)?;
        ctx.remote
            .service(ServiceAction::DaemonReload, &unit)
            .at("install service", &unit)
    } else {
        Ok(())
    }
}

/// Write `content` locally, upload it to the remote rendered-file staging
/// directory, then move it into `dest_dir` as `file_name`, replacing any
/// existing file.
pub(super) fn place_rendered<L, R: RemoteExecutor>(
    ctx: &HostContext<'_, L, R>,
    content: &str,
    file_name: &str,
    dest_dir: &str,
) -> DeployResult<()> {
    let work = &ctx.spec.work.temp_work_folder;
    let staging = tempfile::Builder::new()
        .prefix("dotship-")
        .tempdir_in(work)
        .map_err(|e| DeployError::local_io(work, e))?;
    let local_file = staging.path().join(file_name);
    fs::write(&local_file, content).map_err(|e| DeployError::local_io(&local_file, e))?;

    upload_and_move(ctx.remote, &local_file, ctx.linux, file_name, dest_dir)
}

fn upload_and_move<R: RemoteExecutor>(
    remote: &R,
    local_file: &Path,
    linux: &LinuxTargetConfig,
    file_name: &str,
    dest_dir: &str,
) -> DeployResult<()> {
    let staging = linux.rendered_staging_dir();
    if !remote.dir_exists(&staging).at("upload", &staging)? {
        remote.create_dir(&staging, false).at("upload", &staging)?;
    }
    let uploaded = format!("{}/{}", staging, file_name);
    let target = format!("{}/{}", dest_dir, file_name);
    remote.upload(local_file, &staging).at("upload", &uploaded)?;
    remote.move_path(&uploaded, &target, true).at("install", &target)?;
    debug!(file = %target, "placed");
    Ok(())
}
