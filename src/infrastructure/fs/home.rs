//! Home directory resolution with test isolation support.
//!
//! `dotship_home_dir()` checks `DOTSHIP_HOME` first, then falls back to
//! `dirs::home_dir()`. When `DOTSHIP_HOME` is set, every other location in
//! this module is derived from it too, so tests never touch the real profile.

use std::path::{Path, PathBuf};

/// Environment variable overriding the home directory.
pub const DOTSHIP_HOME_VAR: &str = "DOTSHIP_HOME";

const SETTINGS_FILE: &str = "dotship.json";

fn overridden_home() -> Option<PathBuf> {
    std::env::var_os(DOTSHIP_HOME_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Get the home directory for dotship-internal paths.
pub fn dotship_home_dir() -> Option<PathBuf> {
    overridden_home().or_else(dirs::home_dir)
}

/// `~/.dotship/dotship.json`: user-profile settings layer and shared credential store.
pub fn global_settings_path() -> Option<PathBuf> {
    dotship_home_dir().map(|h| h.join(".dotship").join(SETTINGS_FILE))
}

/// Machine-local credential store under the platform config directory.
pub fn machine_settings_path() -> Option<PathBuf> {
    let base = match overridden_home() {
        Some(home) => Some(home.join(".config")),
        None => dirs::config_dir(),
    };
    base.map(|b| b.join("dotship").join(SETTINGS_FILE))
}

/// Root of the .NET user-secrets store.
pub fn user_secrets_root() -> Option<PathBuf> {
    match overridden_home() {
        Some(home) => Some(home.join(".microsoft").join("usersecrets")),
        None if cfg!(windows) => Some(dirs::config_dir()?.join("Microsoft").join("UserSecrets")),
        None => Some(dirs::home_dir()?.join(".microsoft").join("usersecrets")),
    }
}

/// `secrets.json` for the `UserSecretsId` `id` under `root`.
pub fn user_secrets_path(root: &Path, id: &str) -> PathBuf {
    root.join(id).join("secrets.json")
}

/// Expand a leading `~` against `home`. Other paths pass through.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') || rest.starts_with('\\') => {
            home.join(&rest[1..])
        }
        _ => PathBuf::from(path),
    }
}
