//! nginx reconciliation
//!
//! A first publish writes the site, enables it and requests a certificate.
//! Later publishes relink a site that lost its `sites-enabled` entry or,
//! when asked and the link is intact, replace the site after backing it up.
//! Any change is checked
//! with `nginx -t`; a rejected update is rolled back to the backup.

use tracing::{info, warn};

use crate::domain::entities::{NGINX_MAIN_CONFIG, NGINX_SITES_AVAILABLE};
use crate::domain::ports::RemoteExecutor;
use crate::domain::services::render_nginx_site;
use crate::error::{DeployError, DeployResult};

use super::host::{place_rendered, HostContext, RemoteStep};

/// What reconciliation changed on the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NginxOutcome {
    /// nginx itself was installed
    pub installed: bool,
    /// The site did not exist and was created
    pub created: bool,
    /// The `sites-enabled` link was recreated
    pub relinked: bool,
    /// Backup of the replaced site
    pub backup: Option<String>,
    pub reloaded: bool,
}

impl NginxOutcome {
    pub fn changed(&self) -> bool {
        self.created || self.relinked || self.backup.is_some()
    }
}

pub(super) fn reconcile<L, R: RemoteExecutor>(
    ctx: &HostContext<'_, L, R>,
) -> DeployResult<NginxOutcome> {
    let remote = ctx.remote;
    let linux = ctx.linux;
    let project = ctx.spec.project_name();
    let site = linux.nginx_site_path();
    let link = linux.nginx_enabled_path();
    let mut outcome = NginxOutcome::default();

    if !remote
        .file_exists(NGINX_MAIN_CONFIG)
        .at("nginx", NGINX_MAIN_CONFIG)?
    {
        info!("nginx not found, installing");
        remote.install_package("nginx").at("install nginx", "nginx")?;
        outcome.installed = true;
    }

    if !remote.file_exists(&site).at("nginx", &site)? {
        place_rendered(
            ctx,
            &render_nginx_site(project, linux),
            &linux.service_name,
            NGINX_SITES_AVAILABLE,
        )?;
        remote.symlink(&site, &link, true).at("enable site", &link)?;
        remote
            .request_certificate(
                &linux.nginx.host_names,
                &linux.nginx.certificate_path(project),
                &linux.nginx.private_key_path(project),
            )
            .at("certificate", &linux.nginx.certificate_path(project))?;
        outcome.created = true;
    } else if !remote.file_exists(&link).at("nginx", &link)? {
        // relinking is this run's only change to an existing site
        remote.symlink(&site, &link, true).at("enable site", &link)?;
        outcome.relinked = true;
    } else if ctx.spec.intent.update_nginx {
        let backup = format!("{}-{}", site, ctx.timestamp);
        remote.copy(&site, &backup, true).at("backup site", &backup)?;
        outcome.backup = Some(backup);
        place_rendered(
            ctx,
            &render_nginx_site(project, linux),
            &linux.service_name,
            NGINX_SITES_AVAILABLE,
        )?;
    }

    if !outcome.changed() {
        return Ok(outcome);
    }

    if let Err(e) = remote.nginx_test() {
        let restored = match &outcome.backup {
            Some(backup) => match remote.move_path(backup, &site, true) {
                Ok(()) => true,
                Err(restore) => {
                    warn!(backup = %backup, error = %restore, "could not restore nginx site");
                    false
                }
            },
            None => false,
        };
        let output = match e.output() {
            "" => e.to_string(),
            text => text.to_string(),
        };
        return Err(DeployError::NginxConfigInvalid {
            site,
            restored,
            output,
        });
    }

    remote.nginx_reload().at("reload nginx", "nginx")?;
    outcome.reloaded = true;
    info!(site = %site, "nginx reloaded");
    Ok(outcome)
}
