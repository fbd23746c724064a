//! Domain Services
//!
//! Stateless helpers shared by the use cases.

pub mod detection;
pub mod sdk;
pub mod templates;

pub use detection::classify_directory;
pub use sdk::{classify_sdk, SdkClass};
pub use templates::{render_nginx_site, render_service_config, render_systemd_unit};
