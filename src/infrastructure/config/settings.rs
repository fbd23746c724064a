//! The `Dotship` settings section
//!
//! ```json
//! {
//!   "Dotship": {
//!     "TempFolder": "/tmp/dotship-build",
//!     "NuGet": { "NugetAuthTokenPath": "~/keys/nuget.txt", "LocalDebugStorage": "/feeds/debug" },
//!     "Linux": {
//!       "Host": "deploy@web1.example.com",
//!       "RemoteAccessToken": "~/.ssh/id_ed25519",
//!       "Port": 5080,
//!       "Nginx": { "HostNames": ["shop.example.com"] }
//!     }
//!   }
//! }
//! ```
//!
//! Keys are normalized to lowercase before binding, so any casing works.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::layers::normalize_keys;
use crate::error::ResolveError;

/// Root section name in every settings layer.
pub const SECTION: &str = "Dotship";

/// Keys whose values are passed through verbatim
const OPAQUE_KEYS: &[&str] = &["serviceconfig"];

/// Non-fatal settings warning (unknown keys).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DotshipSettings {
    #[serde(rename = "tempfolder")]
    pub temp_folder: Option<String>,
    #[serde(rename = "nuget")]
    pub nuget: Option<NuGetSettings>,
    #[serde(rename = "linux")]
    pub linux: Option<LinuxSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NuGetSettings {
    #[serde(rename = "nugetauthtokenpath")]
    pub auth_token_path: Option<String>,
    #[serde(rename = "localdebugstorage")]
    pub local_debug_storage: Option<String>,
    #[serde(rename = "feedurl")]
    pub feed_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinuxSettings {
    #[serde(rename = "host")]
    pub host: Option<String>,
    #[serde(rename = "remoteaccesstoken")]
    pub remote_access_token: Option<String>,
    #[serde(rename = "servicename")]
    pub service_name: Option<String>,
    #[serde(rename = "serviceuser")]
    pub service_user: Option<String>,
    #[serde(rename = "userhomefolder")]
    pub user_home_folder: Option<String>,
    #[serde(rename = "port", default, deserialize_with = "lenient_port")]
    pub port: Option<u16>,
    #[serde(rename = "frontend", default, deserialize_with = "lenient_bool")]
    pub front_end: Option<bool>,
    #[serde(rename = "publishfolder")]
    pub publish_folder: Option<String>,
    #[serde(rename = "tempfolder")]
    pub temp_folder: Option<String>,
    #[serde(rename = "serviceconfig")]
    pub service_config: Option<Value>,
    #[serde(rename = "nginx")]
    pub nginx: Option<NginxSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NginxSettings {
    #[serde(rename = "hostnames", default, deserialize_with = "host_list")]
    pub host_names: Vec<String>,
    #[serde(rename = "sslpublic")]
    pub ssl_public: Option<String>,
    #[serde(rename = "sslprivate")]
    pub ssl_private: Option<String>,
    #[serde(rename = "appport", default, deserialize_with = "lenient_port")]
    pub app_port: Option<u16>,
}

/// Bind a merged `Dotship` section, collecting unknown keys as warnings.
pub fn bind_section(section: &Value) -> Result<(DotshipSettings, Vec<ConfigWarning>), ResolveError> {
    let normalized = normalize_keys(section.clone(), OPAQUE_KEYS);
    let mut unknown = Vec::new();
    let settings: DotshipSettings = serde_ignored::deserialize(normalized, |path| {
        unknown.push(ConfigWarning {
            key: format!("{}.{}", SECTION, path),
        });
    })
    .map_err(|e| ResolveError::InvalidSettings {
        message: format!("section '{}': {}", SECTION, e),
    })?;
    Ok((settings, unknown))
}

fn lenient_port<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u16>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid port {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid port '{}'", s))),
        Some(other) => Err(de::Error::custom(format!("invalid port {}", other))),
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" | "" => Ok(Some(false)),
            _ => Err(de::Error::custom(format!("invalid boolean '{}'", s))),
        },
        Some(other) => Err(de::Error::custom(format!("invalid boolean {}", other))),
    }
}

/// Host names as an array, or one string separated by spaces, commas or semicolons.
fn host_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let raw: Vec<String> = match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => vec![s],
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|v| -> Result<String, D::Error> {
                match v {
                    Value::String(s) => Ok(s),
                    other => Err(de::Error::custom(format!("invalid host name {}", other))),
                }
            })
            .collect::<Result<_, _>>()?,
        Some(other) => return Err(de::Error::custom(format!("invalid host names {}", other))),
    };

    let mut hosts: Vec<String> = Vec::new();
    for name in raw
        .iter()
        .flat_map(|s| s.split(|c: char| c.is_whitespace() || c == ',' || c == ';'))
        .filter(|s| !s.is_empty())
    {
        if !hosts.iter().any(|h| h.eq_ignore_ascii_case(name)) {
            hosts.push(name.to_string());
        }
    }
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn binds_any_key_casing() {
        let section = json!({
            "tempFolder": "/scratch",
            "NUGET": {"NugetAuthTokenPath": "/keys/nuget.txt"},
            "Linux": {
                "HOST": "deploy@web1",
                "Port": "5080",
                "FrontEnd": "false",
                "NGINX": {"HostNames": "a.example.com, b.example.com a.example.com"}
            }
        });
        let (settings, warnings) = bind_section(&section).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(settings.temp_folder.as_deref(), Some("/scratch"));
        assert_eq!(
            settings.nuget.unwrap().auth_token_path.as_deref(),
            Some("/keys/nuget.txt")
        );
        let linux = settings.linux.unwrap();
        assert_eq!(linux.host.as_deref(), Some("deploy@web1"));
        assert_eq!(linux.port, Some(5080));
        assert_eq!(linux.front_end, Some(false));
        assert_eq!(
            linux.nginx.unwrap().host_names,
            vec!["a.example.com", "b.example.com"]
        );
    }

    #[test]
    fn unknown_keys_become_warnings() {
        let section = json!({"Linux": {"Host": "h", "BitviseTlpFile": "x.tlp"}, "Extra": 1});
        let (_, warnings) = bind_section(&section).unwrap();
        let keys: Vec<_> = warnings.into_iter().map(|w| w.key).collect();
        assert!(keys.contains(&"Dotship.linux.bitvisetlpfile".to_string()));
        assert!(keys.contains(&"Dotship.extra".to_string()));
    }

    #[test]
    fn service_config_keeps_its_casing() {
        let section = json!({"Linux": {"ServiceConfig": {"ConnectionStrings": {"Main": "x"}}}});
        let (settings, _) = bind_section(&section).unwrap();
        let cfg = settings.linux.unwrap().service_config.unwrap();
        assert_eq!(cfg["ConnectionStrings"]["Main"], "x");
    }

    #[test]
    fn out_of_range_port_is_invalid() {
        let section = json!({"Linux": {"Port": 70000}});
        let err = bind_section(&section).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSettings { .. }));
    }
}
