//! Layered JSON settings
//!
//! Layers are merged lowest priority first. Objects merge key by key,
//! anything else is replaced. Keys match case-insensitively, like the
//! .NET configuration system that owns these files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ResolveError;

/// Candidate files for one project, lowest priority first.
#[derive(Debug, Clone, Default)]
pub struct SettingsSources {
    /// `~/.dotship/dotship.json`
    pub global: Option<PathBuf>,
    /// `./dotship.json` in the working directory
    pub local_override: Option<PathBuf>,
    /// `<project>/appsettings.json`
    pub project: Option<PathBuf>,
    /// user-secrets `secrets.json`, flat colon-delimited keys
    pub user_secrets: Option<PathBuf>,
}

/// Merged settings plus the files that contributed.
#[derive(Debug, Clone)]
pub struct LayeredSettings {
    pub root: Value,
    pub loaded: Vec<PathBuf>,
}

impl LayeredSettings {
    /// Top-level section by name, ignoring case.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.root.as_object().and_then(|obj| get_ignore_case(obj, name))
    }
}

/// Read every existing layer and merge them.
pub fn load_layers(sources: &SettingsSources) -> Result<LayeredSettings, ResolveError> {
    let mut root = Value::Object(Map::new());
    let mut loaded = Vec::new();

    let layers = [
        (sources.global.as_deref(), false),
        (sources.local_override.as_deref(), false),
        (sources.project.as_deref(), false),
        (sources.user_secrets.as_deref(), true),
    ];

    for (path, flat_keys) in layers {
        let Some(path) = path else { continue };
        let Some(mut value) = read_json_file(path)? else {
            continue;
        };
        if flat_keys {
            value = expand_colon_keys(value);
        }
        debug!(path = %path.display(), "merging settings layer");
        merge(&mut root, value);
        loaded.push(path.to_path_buf());
    }

    Ok(LayeredSettings { root, loaded })
}

/// Parse a JSON settings file, tolerating comments. Missing files are `None`.
pub fn read_json_file(path: &Path) -> Result<Option<Value>, ResolveError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ResolveError::Io(e)),
    };
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&strip_comments(content))
        .map(Some)
        .map_err(|e| ResolveError::InvalidSettings {
            message: format!("{}: {}", path.display(), e),
        })
}

/// Merge `overlay` into `base`. Later values win; objects merge recursively.
pub fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                let existing = base_map
                    .keys()
                    .find(|k| k.eq_ignore_ascii_case(&key))
                    .cloned();
                match existing {
                    Some(existing) => {
                        if let Some(slot) = base_map.get_mut(&existing) {
                            merge(slot, value);
                        }
                    }
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Turn `{"A:B:C": 1}` into `{"A": {"B": {"C": 1}}}`.
///
/// Numeric segments `0..n` under one parent become an array, so
/// `{"Hosts:0": "a", "Hosts:1": "b"}` reads as `{"Hosts": ["a", "b"]}`.
pub fn expand_colon_keys(value: Value) -> Value {
    let Value::Object(flat) = value else {
        return value;
    };
    let mut out = Value::Object(Map::new());
    for (key, value) in flat {
        let nested = key
            .split(':')
            .rev()
            .fold(value, |acc, part| {
                let mut map = Map::new();
                map.insert(part.to_string(), acc);
                Value::Object(map)
            });
        merge(&mut out, nested);
    }
    indexed_to_arrays(out)
}

/// Replace objects keyed exactly `"0"`, `"1"`, ... `"n-1"` with arrays, bottom up.
fn indexed_to_arrays(value: Value) -> Value {
    let Value::Object(map) = value else {
        return value;
    };
    let mut indexed: Vec<(usize, Value)> = Vec::with_capacity(map.len());
    let mut named = Map::new();
    for (key, child) in map {
        let child = indexed_to_arrays(child);
        match key.parse::<usize>() {
            Ok(index) if index.to_string() == key => indexed.push((index, child)),
            _ => {
                named.insert(key, child);
            }
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    let contiguous = indexed.iter().enumerate().all(|(pos, (index, _))| pos == *index);
    if named.is_empty() && !indexed.is_empty() && contiguous {
        return Value::Array(indexed.into_iter().map(|(_, v)| v).collect());
    }
    for (index, child) in indexed {
        named.insert(index.to_string(), child);
    }
    Value::Object(named)
}

/// Lowercase object keys for binding, leaving subtrees under `opaque` keys untouched.
pub fn normalize_keys(value: Value, opaque: &[&str]) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let lower = k.to_ascii_lowercase();
                    let v = if opaque.contains(&lower.as_str()) {
                        v
                    } else {
                        normalize_keys(v, opaque)
                    };
                    (lower, v)
                })
                .collect(),
        ),
        other => other,
    }
}

pub(crate) fn get_ignore_case<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// Remove `//` and `/* */` comments outside of string literals.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn merge_overrides_key_by_key_ignoring_case() {
        let mut base = json!({"Dotship": {"Linux": {"Port": 5000, "ServiceName": "shop"}}});
        merge(&mut base, json!({"dotship": {"linux": {"port": 6000}}}));
        assert_eq!(base["Dotship"]["Linux"]["Port"], 6000);
        assert_eq!(base["Dotship"]["Linux"]["ServiceName"], "shop");
    }

    #[test]
    fn merge_replaces_arrays_and_scalars() {
        let mut base = json!({"HostNames": ["a", "b"]});
        merge(&mut base, json!({"HostNames": ["c"]}));
        assert_eq!(base, json!({"HostNames": ["c"]}));
    }

    #[test]
    fn colon_keys_expand_to_nested_objects() {
        let flat = json!({
            "Dotship:Linux:Port": "7000",
            "Dotship:Linux:Nginx:HostNames": "api.example.com",
            "ConnectionStrings:Default": "Host=db"
        });
        let nested = expand_colon_keys(flat);
        assert_eq!(nested["Dotship"]["Linux"]["Port"], "7000");
        assert_eq!(nested["Dotship"]["Linux"]["Nginx"]["HostNames"], "api.example.com");
        assert_eq!(nested["ConnectionStrings"]["Default"], "Host=db");
    }

    #[test]
    fn indexed_colon_keys_become_arrays() {
        let flat = json!({
            "Dotship:Linux:Nginx:HostNames:1": "www.shop.example.com",
            "Dotship:Linux:Nginx:HostNames:0": "shop.example.com",
            "Dotship:Linux:ServiceConfig:Ports:10": "x",
            "Dotship:Linux:ServiceConfig:Ports:0": "y",
            "Dotship:Linux:ServiceConfig:Tags:0:Name": "blue",
            "Dotship:Linux:ServiceConfig:Mixed:0": "a",
            "Dotship:Linux:ServiceConfig:Mixed:Name": "b"
        });
        let nested = expand_colon_keys(flat);
        let linux = &nested["Dotship"]["Linux"];
        assert_eq!(
            linux["Nginx"]["HostNames"],
            json!(["shop.example.com", "www.shop.example.com"])
        );
        assert_eq!(linux["ServiceConfig"]["Ports"], json!({"0": "y", "10": "x"}));
        assert_eq!(linux["ServiceConfig"]["Tags"], json!([{"Name": "blue"}]));
        assert_eq!(linux["ServiceConfig"]["Mixed"], json!({"0": "a", "Name": "b"}));
    }

    #[test]
    fn normalize_keeps_opaque_subtrees() {
        let value = json!({"Linux": {"ServiceConfig": {"ConnectionStrings": {"Main": "x"}}}});
        let normalized = normalize_keys(value, &["serviceconfig"]);
        assert_eq!(
            normalized,
            json!({"linux": {"serviceconfig": {"ConnectionStrings": {"Main": "x"}}}})
        );
    }

    #[test]
    fn comments_are_stripped_outside_strings() {
        let text = r#"{
            // line comment
            "Url": "https://example.com/a//b", /* block */
            "Path": "C:\\dir\\" // trailing
        }"#;
        let value: Value = serde_json::from_str(&strip_comments(text)).unwrap();
        assert_eq!(value["Url"], "https://example.com/a//b");
        assert_eq!(value["Path"], "C:\\dir\\");
    }

    #[test]
    fn load_layers_applies_priority_order() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.json");
        let local = dir.path().join("local.json");
        let project = dir.path().join("appsettings.json");
        let secrets = dir.path().join("secrets.json");

        fs::write(&global, r#"{"Dotship":{"TempFolder":"/g","Linux":{"Port":1}}}"#).unwrap();
        fs::write(&local, r#"{"Dotship":{"Linux":{"Port":2,"Host":"local"}}}"#).unwrap();
        fs::write(&project, r#"{"Dotship":{"Linux":{"Port":3}}}"#).unwrap();
        fs::write(&secrets, r#"{"Dotship:Linux:Port":4}"#).unwrap();

        let merged = load_layers(&SettingsSources {
            global: Some(global),
            local_override: Some(local),
            project: Some(project),
            user_secrets: Some(secrets),
        })
        .unwrap();

        let section = merged.section("dotship").unwrap();
        assert_eq!(section["TempFolder"], "/g");
        assert_eq!(section["Linux"]["Port"], 4);
        assert_eq!(section["Linux"]["Host"], "local");
        assert_eq!(merged.loaded.len(), 4);
    }

    #[test]
    fn missing_layers_are_skipped_and_bad_json_is_an_error() {
        let dir = tempdir().unwrap();
        let merged = load_layers(&SettingsSources {
            project: Some(dir.path().join("absent.json")),
            ..Default::default()
        })
        .unwrap();
        assert!(merged.loaded.is_empty());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let err = read_json_file(&broken).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSettings { .. }));
    }
}
