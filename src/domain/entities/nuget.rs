//! NuGet publishing target

use std::path::PathBuf;

pub const NUGET_ORG_FEED: &str = "https://api.nuget.org/v3/index.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuGetConfig {
    /// File holding the API key on a single line
    pub auth_token_path: Option<PathBuf>,
    /// Folder feed that receives pre-release symbol packages
    pub local_debug_storage: Option<PathBuf>,
    pub feed_url: String,
}

impl Default for NuGetConfig {
    fn default() -> Self {
        Self {
            auth_token_path: None,
            local_debug_storage: None,
            feed_url: NUGET_ORG_FEED.to_string(),
        }
    }
}
