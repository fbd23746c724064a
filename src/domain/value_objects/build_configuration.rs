//! Build configuration passed to `dotnet pack` / `dotnet publish`

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildConfiguration {
    Debug,
    Release,
}

impl BuildConfiguration {
    /// Pre-release versions build with symbols in Debug.
    pub fn for_prerelease(is_prerelease: bool) -> Self {
        if is_prerelease {
            BuildConfiguration::Debug
        } else {
            BuildConfiguration::Release
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildConfiguration::Debug => "Debug",
            BuildConfiguration::Release => "Release",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
