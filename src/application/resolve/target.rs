//! Binding of the merged `Dotship` section onto deploy targets.

use std::path::Path;

use crate::domain::entities::{LinuxTargetConfig, NginxConfig, NuGetConfig};
use crate::error::ResolveError;
use crate::infrastructure::config::{
    GlobalConfigStore, LinuxSettings, NuGetSettings, KEY_LOCAL_DEBUG_STORAGE,
    KEY_NUGET_AUTH_TOKEN_PATH,
};
use crate::infrastructure::fs::expand_home;

const DEFAULT_SERVICE_USER: &str = "www-data";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_REMOTE_TEMP: &str = "/tmp/dotship";

/// NuGet target; values missing from settings come from the credential store.
pub(super) fn nuget_target(
    settings: Option<&NuGetSettings>,
    store: &GlobalConfigStore,
    home: Option<&Path>,
) -> NuGetConfig {
    let configured = |pick: fn(&NuGetSettings) -> Option<&String>| {
        settings
            .and_then(pick)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let auth_token_path = configured(|s| s.auth_token_path.as_ref())
        .or_else(|| store.get(KEY_NUGET_AUTH_TOKEN_PATH))
        .map(|p| expand_home(&p, home));
    let local_debug_storage = configured(|s| s.local_debug_storage.as_ref())
        .or_else(|| store.get(KEY_LOCAL_DEBUG_STORAGE))
        .map(|p| expand_home(&p, home));

    let mut nuget = NuGetConfig {
        auth_token_path,
        local_debug_storage,
        ..NuGetConfig::default()
    };
    if let Some(feed) = configured(|s| s.feed_url.as_ref()) {
        nuget.feed_url = feed;
    }
    nuget
}

/// Linux target with defaults applied. `Host` is always required; a service
/// also needs at least one nginx host name.
pub(super) fn linux_target(
    project_name: &str,
    settings: &LinuxSettings,
    is_front_end: bool,
    home: Option<&Path>,
) -> Result<LinuxTargetConfig, ResolveError> {
    let host = non_empty(settings.host.as_deref()).ok_or_else(|| ResolveError::InvalidSettings {
        message: "Dotship:Linux:Host is required for service and front-end projects".into(),
    })?;

    let service_name = non_empty(settings.service_name.as_deref())
        .unwrap_or_else(|| project_name.to_lowercase());
    let port = settings.port.unwrap_or(DEFAULT_PORT);
    let temp_folder = non_empty(settings.temp_folder.as_deref())
        .map(|t| trim_trailing_slash(&t))
        .unwrap_or_else(|| DEFAULT_REMOTE_TEMP.to_string());
    let publish_folder = non_empty(settings.publish_folder.as_deref())
        .map(|p| trim_trailing_slash(&p))
        .unwrap_or_else(|| format!("/var/www/{}", service_name));

    let nginx_settings = settings.nginx.clone().unwrap_or_default();
    if !is_front_end && nginx_settings.host_names.is_empty() {
        return Err(ResolveError::InvalidSettings {
            message: format!(
                "Dotship:Linux:Nginx:HostNames must list at least one host name for service '{}'",
                service_name
            ),
        });
    }

    Ok(LinuxTargetConfig {
        host,
        remote_access_token: non_empty(settings.remote_access_token.as_deref())
            .map(|p| expand_home(&p, home)),
        service_user: non_empty(settings.service_user.as_deref())
            .unwrap_or_else(|| DEFAULT_SERVICE_USER.to_string()),
        user_home_folder: non_empty(settings.user_home_folder.as_deref())
            .map(|h| trim_trailing_slash(&h)),
        port,
        publish_folder,
        temp_project_folder: format!("{}/{}", temp_folder, project_name),
        tar_file_name: format!("{}.tar.gz", service_name),
        temp_folder,
        is_front_end,
        service_config: settings
            .service_config
            .clone()
            .unwrap_or(serde_json::Value::Null),
        nginx: NginxConfig {
            host_names: nginx_settings.host_names,
            ssl_public_cert_path: non_empty(nginx_settings.ssl_public.as_deref()),
            ssl_private_key_path: non_empty(nginx_settings.ssl_private.as_deref()),
            app_port: nginx_settings.app_port.unwrap_or(port),
        },
        service_name,
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn trim_trailing_slash(path: &str) -> String {
    match path.trim_end_matches('/') {
        "" => "/".to_string(),
        trimmed => trimmed.to_string(),
    }
}
