//! The resolved, immutable description of one publish run.

use std::path::PathBuf;

use super::{LinuxTargetConfig, NuGetConfig};
use crate::domain::value_objects::{BuildConfiguration, OutputKind, ProjectVersion};

/// Where the project lives on the local machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Full path of the `.csproj` file
    pub path: PathBuf,
    /// File stem of the descriptor, e.g. `Shop.Api`
    pub name: String,
    /// Directory containing the descriptor
    pub folder: PathBuf,
}

/// Local scratch locations, all derived during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPaths {
    pub temp_work_folder: PathBuf,
    /// `<temp_work_folder>/<project name>`; the publish output for services
    pub temp_project_folder: PathBuf,
    /// Package output for libraries
    pub output_path: PathBuf,
}

/// Operator intent from the command line. These are requests, not facts about the remote host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeployIntent {
    pub migrate: bool,
    pub update_service: bool,
    pub update_nginx: bool,
}

/// Where the build output goes. Exactly one target config exists per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DeployTarget {
    Library(NuGetConfig),
    Service(LinuxTargetConfig),
    FrontEnd(LinuxTargetConfig),
}

impl DeployTarget {
    pub fn output_kind(&self) -> OutputKind {
        match self {
            DeployTarget::Library(_) => OutputKind::Library,
            DeployTarget::Service(_) => OutputKind::Service,
            DeployTarget::FrontEnd(_) => OutputKind::FrontEnd,
        }
    }

    pub fn linux(&self) -> Option<&LinuxTargetConfig> {
        match self {
            DeployTarget::Service(linux) | DeployTarget::FrontEnd(linux) => Some(linux),
            DeployTarget::Library(_) => None,
        }
    }

    pub fn nuget(&self) -> Option<&NuGetConfig> {
        match self {
            DeployTarget::Library(nuget) => Some(nuget),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentSpec {
    pub project: ProjectInfo,
    pub version: ProjectVersion,
    pub build_configuration: BuildConfiguration,
    pub work: WorkPaths,
    pub target: DeployTarget,
    pub intent: DeployIntent,
}

impl DeploymentSpec {
    pub fn output_kind(&self) -> OutputKind {
        self.target.output_kind()
    }

    pub fn is_prerelease(&self) -> bool {
        self.version.is_prerelease()
    }

    pub fn project_name(&self) -> &str {
        &self.project.name
    }
}
