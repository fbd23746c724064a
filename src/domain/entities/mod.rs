//! Domain Entities

mod batch;
mod deployment_spec;
mod detection;
mod linux_target;
mod nuget;

pub use batch::{BatchConfig, ProjectRef, DEFAULT_BATCH_FILE};
pub use deployment_spec::{DeployIntent, DeployTarget, DeploymentSpec, ProjectInfo, WorkPaths};
pub use detection::{DetectionMode, DetectionResult};
pub use linux_target::{
    LinuxTargetConfig, NginxConfig, NGINX_MAIN_CONFIG, NGINX_SITES_AVAILABLE, NGINX_SITES_ENABLED,
    SERVICE_CONFIG_ROOT, SYSTEMD_UNIT_DIR,
};
pub use nuget::{NuGetConfig, NUGET_ORG_FEED};
