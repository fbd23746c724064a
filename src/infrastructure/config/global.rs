//! Global credential store
//!
//! A flat JSON object of string values living in either the shared profile
//! file (`~/.dotship/dotship.json`) or the machine-local one. Reads check the
//! shared file first. Other content of those files (such as the `Dotship`
//! settings section) is preserved on write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::warn;

use super::layers::read_json_file;
use crate::infrastructure::fs::{global_settings_path, machine_settings_path};

pub const KEY_NUGET_AUTH_TOKEN_PATH: &str = "NugetAuthTokenPath";
pub const KEY_LOCAL_DEBUG_STORAGE: &str = "LocalDebugStorage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    /// Profile-wide file, typically synced between machines
    Shared,
    /// This machine only
    Local,
}

#[derive(Debug, Clone, Default)]
pub struct GlobalConfigStore {
    shared: Option<PathBuf>,
    local: Option<PathBuf>,
}

impl GlobalConfigStore {
    pub fn new(shared: Option<PathBuf>, local: Option<PathBuf>) -> Self {
        Self { shared, local }
    }

    /// Store at the standard locations for the current user.
    pub fn from_env() -> Self {
        Self::new(global_settings_path(), machine_settings_path())
    }

    pub fn path(&self, scope: StoreScope) -> Option<&Path> {
        match scope {
            StoreScope::Shared => self.shared.as_deref(),
            StoreScope::Local => self.local.as_deref(),
        }
    }

    /// First non-empty string value for `key`, shared file first.
    pub fn get(&self, key: &str) -> Option<String> {
        [StoreScope::Shared, StoreScope::Local]
            .into_iter()
            .filter_map(|scope| self.path(scope))
            .find_map(|path| lookup(path, key))
    }

    /// Write `values` into the file for `scope`, keeping unrelated keys.
    pub fn set(&self, scope: StoreScope, values: &[(&str, String)]) -> io::Result<PathBuf> {
        let path = self
            .path(scope)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "home directory not found"))?
            .to_path_buf();

        let mut root = match read_json_file(&path) {
            Ok(Some(Value::Object(map))) => map,
            Ok(_) => Map::new(),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e.to_string())),
        };
        for (key, value) in values {
            root.retain(|k, _| !k.eq_ignore_ascii_case(key));
            root.insert((*key).to_string(), Value::String(value.clone()));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(root))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&path, json + "\n")?;
        Ok(path)
    }
}

fn lookup(path: &Path, key: &str) -> Option<String> {
    match read_json_file(path) {
        Ok(Some(Value::Object(map))) => map
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_str())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
        Ok(_) => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable global settings");
            None
        }
    }
}
