//! Project version value object
//!
//! Versions come straight from the `<Version>` element of a project file:
//! a dotted numeric core (`1`, `1.2`, `1.2.3`, `1.2.3.4`), an optional
//! `-qualifier` and optional `+metadata`.

use std::fmt;

use thiserror::Error;

use super::BuildConfiguration;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("version is empty")]
    Empty,

    #[error("'{0}' does not start with a numeric version")]
    InvalidCore(String),

    #[error("'{0}' has an empty qualifier after '-'")]
    EmptyQualifier(String),
}

/// A parsed project version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVersion {
    raw: String,
    qualifier: Option<String>,
}

impl ProjectVersion {
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(VersionError::Empty);
        }

        let without_metadata = raw.split_once('+').map_or(raw, |(head, _)| head);
        let (core, qualifier) = match without_metadata.split_once('-') {
            Some((core, qualifier)) => {
                if qualifier.is_empty() {
                    return Err(VersionError::EmptyQualifier(raw.to_string()));
                }
                (core, Some(qualifier.to_string()))
            }
            None => (without_metadata, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        let numeric = parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
        if parts.len() > 4 || !numeric {
            return Err(VersionError::InvalidCore(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            qualifier,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The text after the first `-`, without build metadata.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// A pre-release carries a qualifier with at least one non-numeric character.
    pub fn is_prerelease(&self) -> bool {
        self.qualifier
            .as_deref()
            .is_some_and(|q| q.chars().any(|c| !c.is_ascii_digit() && c != '.'))
    }

    pub fn build_configuration(&self) -> BuildConfiguration {
        BuildConfiguration::for_prerelease(self.is_prerelease())
    }
}

impl fmt::Display for ProjectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_versions_are_not_prerelease() {
        for v in ["1", "1.2", "1.2.3", "10.0.1.4", "2.0.0+build.7"] {
            let version = ProjectVersion::parse(v).unwrap();
            assert!(!version.is_prerelease(), "{v}");
            assert_eq!(version.build_configuration(), BuildConfiguration::Release);
        }
    }

    #[test]
    fn qualified_versions_are_prerelease() {
        for v in ["1.0.0-beta", "3.1.0-rc.2", "0.9.0-preview1+sha.abc"] {
            let version = ProjectVersion::parse(v).unwrap();
            assert!(version.is_prerelease(), "{v}");
            assert_eq!(version.build_configuration(), BuildConfiguration::Debug);
        }
    }

    #[test]
    fn numeric_qualifier_is_not_prerelease() {
        let version = ProjectVersion::parse("1.0.0-20240101").unwrap();
        assert_eq!(version.qualifier(), Some("20240101"));
        assert!(!version.is_prerelease());
    }

    #[test]
    fn parse_trims_whitespace() {
        let version = ProjectVersion::parse("  1.4.0\n").unwrap();
        assert_eq!(version.as_str(), "1.4.0");
        assert_eq!(version.to_string(), "1.4.0");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(ProjectVersion::parse("   "), Err(VersionError::Empty));
        assert!(matches!(
            ProjectVersion::parse("v1.0"),
            Err(VersionError::InvalidCore(_))
        ));
        assert!(matches!(
            ProjectVersion::parse("1..2"),
            Err(VersionError::InvalidCore(_))
        ));
        assert!(matches!(
            ProjectVersion::parse("1.2.3.4.5"),
            Err(VersionError::InvalidCore(_))
        ));
        assert!(matches!(
            ProjectVersion::parse("1.0-"),
            Err(VersionError::EmptyQualifier(_))
        ));
    }
}
