//! Settings loading
//!
//! - `layers` - reading and merging JSON settings files
//! - `settings` - the typed `Dotship` section
//! - `global` - the flat credential store written by `dotship set`

pub mod global;
pub mod layers;
pub mod settings;

pub use global::{GlobalConfigStore, StoreScope, KEY_LOCAL_DEBUG_STORAGE, KEY_NUGET_AUTH_TOKEN_PATH};
pub use layers::{load_layers, LayeredSettings, SettingsSources};
pub use settings::{bind_section, ConfigWarning, DotshipSettings, LinuxSettings, NginxSettings, NuGetSettings, SECTION};
