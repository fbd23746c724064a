//! Linux host target: where a service or front-end lands and how it is served.

use std::path::PathBuf;

pub const SYSTEMD_UNIT_DIR: &str = "/etc/systemd/system";
pub const NGINX_MAIN_CONFIG: &str = "/etc/nginx/nginx.conf";
pub const NGINX_SITES_AVAILABLE: &str = "/etc/nginx/sites-available";
pub const NGINX_SITES_ENABLED: &str = "/etc/nginx/sites-enabled";
/// Root for per-service configuration files read by deployed apps
pub const SERVICE_CONFIG_ROOT: &str = "/etc/dotship";

#[derive(Debug, Clone, PartialEq)]
pub struct LinuxTargetConfig {
    /// ssh destination, e.g. `deploy@web1.example.com`
    pub host: String,
    /// ssh identity file
    pub remote_access_token: Option<PathBuf>,
    pub service_name: String,
    /// Account that owns deployed files and runs the unit
    pub service_user: String,
    pub user_home_folder: Option<String>,
    pub port: u16,
    pub publish_folder: String,
    pub temp_folder: String,
    pub temp_project_folder: String,
    pub tar_file_name: String,
    pub is_front_end: bool,
    /// Content of the per-service config file written before the first migration
    pub service_config: serde_json::Value,
    pub nginx: NginxConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NginxConfig {
    pub host_names: Vec<String>,
    pub ssl_public_cert_path: Option<String>,
    pub ssl_private_key_path: Option<String>,
    pub app_port: u16,
}

impl NginxConfig {
    /// Certificate path, defaulting to `/etc/ssl/certs/<project>.crt`.
    pub fn certificate_path(&self, project_name: &str) -> String {
        self.ssl_public_cert_path
            .clone()
            .unwrap_or_else(|| format!("/etc/ssl/certs/{}.crt", project_name))
    }

    /// Key path, defaulting to `/etc/ssl/private/<project>.key`.
    pub fn private_key_path(&self, project_name: &str) -> String {
        self.ssl_private_key_path
            .clone()
            .unwrap_or_else(|| format!("/etc/ssl/private/{}.key", project_name))
    }
}

impl LinuxTargetConfig {
    pub fn unit_file_name(&self) -> String {
        format!("{}.service", self.service_name)
    }

    pub fn unit_file_path(&self) -> String {
        format!("{}/{}", SYSTEMD_UNIT_DIR, self.unit_file_name())
    }

    pub fn nginx_site_path(&self) -> String {
        format!("{}/{}", NGINX_SITES_AVAILABLE, self.service_name)
    }

    pub fn nginx_enabled_path(&self) -> String {
        format!("{}/{}", NGINX_SITES_ENABLED, self.service_name)
    }

    pub fn service_config_path(&self) -> String {
        format!("{}/{}", SERVICE_CONFIG_ROOT, self.service_name)
    }

    /// Where the uploaded archive sits on the remote host.
    pub fn remote_archive_path(&self) -> String {
        format!("{}/{}", self.temp_folder, self.tar_file_name)
    }

    /// Remote directory that receives rendered files before they are moved
    /// into place. Never shares a path with the unpacked project folder.
    pub fn rendered_staging_dir(&self) -> String {
        format!("{}/.dotship-rendered", self.temp_folder)
    }

    /// Directory that receives the timestamped archive of the previous release.
    pub fn release_archive_dir(&self) -> &str {
        self.user_home_folder
            .as_deref()
            .unwrap_or(self.temp_folder.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nginx() -> NginxConfig {
        NginxConfig {
            host_names: vec!["shop.example.com".into()],
            ssl_public_cert_path: None,
            ssl_private_key_path: None,
            app_port: 5000,
        }
    }

    #[test]
    fn certificate_paths_fall_back_to_project_defaults() {
        let cfg = nginx();
        assert_eq!(cfg.certificate_path("Shop.Api"), "/etc/ssl/certs/Shop.Api.crt");
        assert_eq!(cfg.private_key_path("Shop.Api"), "/etc/ssl/private/Shop.Api.key");
    }

    #[test]
    fn explicit_certificate_paths_win() {
        let cfg = NginxConfig {
            ssl_public_cert_path: Some("/etc/letsencrypt/live/shop/fullchain.pem".into()),
            ssl_private_key_path: Some("/etc/letsencrypt/live/shop/privkey.pem".into()),
            ..nginx()
        };
        assert_eq!(
            cfg.certificate_path("Shop.Api"),
            "/etc/letsencrypt/live/shop/fullchain.pem"
        );
        assert_eq!(
            cfg.private_key_path("Shop.Api"),
            "/etc/letsencrypt/live/shop/privkey.pem"
        );
    }
}
