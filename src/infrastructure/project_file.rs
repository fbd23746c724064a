//! `.csproj` descriptor parsing
//!
//! Only the handful of MSBuild properties dotship acts on are read:
//! `Sdk`, `Version`, `OutputType`, `UserSecretsId`, and the project
//! reference used by a `SetVersionFrom*` target.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use thiserror::Error;

/// Target-name prefix marking "take the version from the referenced project".
pub const VERSION_FROM_REFERENCE_PREFIX: &str = "SetVersionFrom";

#[derive(Debug, Error)]
pub enum ProjectFileError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid XML: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFile {
    pub path: PathBuf,
    pub sdk: Option<String>,
    pub version: Option<String>,
    pub output_type: Option<String>,
    pub user_secrets_id: Option<String>,
    /// Name of the `SetVersionFrom*` target, when present
    pub version_target: Option<String>,
    /// First `ProjectReference`, resolved against the project folder
    pub first_reference: Option<PathBuf>,
}

impl ProjectFile {
    pub fn load(path: &Path) -> Result<Self, ProjectFileError> {
        let content = fs::read_to_string(path).map_err(|source| ProjectFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self, ProjectFileError> {
        let doc = Document::parse(content.trim_start_matches('\u{feff}')).map_err(|source| {
            ProjectFileError::Xml {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let root = doc.root_element();
        let folder = path.parent().unwrap_or_else(|| Path::new(""));

        let sdk = root
            .attribute("Sdk")
            .map(str::to_string)
            .or_else(|| {
                root.children()
                    .find(|n| n.has_tag_name("Sdk"))
                    .and_then(|n| n.attribute("Name"))
                    .map(str::to_string)
            })
            .filter(|s| !s.trim().is_empty());

        let version_target = root
            .children()
            .filter(|n| n.has_tag_name("Target"))
            .filter_map(|n| n.attribute("Name"))
            .find(|name| name.starts_with(VERSION_FROM_REFERENCE_PREFIX))
            .map(str::to_string);

        let first_reference = doc
            .descendants()
            .find(|n| n.has_tag_name("ProjectReference"))
            .and_then(|n| n.attribute("Include"))
            .filter(|include| !include.trim().is_empty())
            .map(|include| folder.join(normalize_separators(include.trim())));

        Ok(Self {
            path: path.to_path_buf(),
            sdk,
            version: property(root, "Version"),
            output_type: property(root, "OutputType"),
            user_secrets_id: property(root, "UserSecretsId"),
            version_target,
            first_reference,
        })
    }

    /// Descriptor file stem, e.g. `Shop.Api` for `Shop.Api.csproj`.
    pub fn project_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// First non-empty `Project/PropertyGroup/<name>`.
fn property(root: Node<'_, '_>, name: &str) -> Option<String> {
    root.children()
        .filter(|n| n.has_tag_name("PropertyGroup"))
        .flat_map(|group| group.children())
        .filter(|n| n.has_tag_name(name))
        .filter_map(|n| n.text())
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

fn normalize_separators(include: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(include)
    } else {
        PathBuf::from(include.replace('\\', "/"))
    }
}
