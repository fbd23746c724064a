//! Resolve Use Case
//!
//! Builds the immutable `DeploymentSpec` for one project:
//! 1. Locate the descriptor (explicit path or the single `*.csproj` in the directory)
//! 2. Resolve the version, following a `SetVersionFrom*` reference one level
//! 3. Classify the SDK into library or executable
//! 4. Merge settings layers and bind the `Dotship` section
//! 5. Create the local work folders
//!
//! Creating the work folders is the only side effect.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::entities::{DeployTarget, DeploymentSpec, ProjectInfo, WorkPaths};
use crate::domain::services::sdk::SDK_BLAZOR_WASM;
use crate::domain::services::{classify_sdk, SdkClass};
use crate::domain::value_objects::ProjectVersion;
use crate::error::ResolveError;
use crate::infrastructure::config::{
    bind_section, load_layers, DotshipSettings, GlobalConfigStore, SettingsSources, SECTION,
};
use crate::infrastructure::fs::{expand_home, user_secrets_path};
use crate::infrastructure::ProjectFile;

use super::options::ResolveOptions;
use super::target::{linux_target, nuget_target};

const PROJECT_EXTENSION: &str = "csproj";
const LOCAL_OVERRIDE_FILE: &str = "dotship.json";
const PROJECT_SETTINGS_FILE: &str = "appsettings.json";

/// Resolve use case - project descriptor + settings into a deployment spec
pub struct ResolveUseCase {
    store: GlobalConfigStore,
}

impl ResolveUseCase {
    pub fn new(store: GlobalConfigStore) -> Self {
        Self { store }
    }

    pub fn resolve(&self, options: &ResolveOptions) -> Result<DeploymentSpec, ResolveError> {
        let path = locate_project(options.project.as_deref(), &options.working_dir)?;
        let descriptor = ProjectFile::load(&path).map_err(|e| ResolveError::ProjectFileUnreadable {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let name = descriptor.project_name();
        let folder = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| options.working_dir.clone());

        let version = resolve_version(&descriptor)?;
        let build_configuration = version.build_configuration();

        let sdk = descriptor
            .sdk
            .as_deref()
            .ok_or_else(|| ResolveError::MissingSdk {
                project: name.clone(),
            })?;
        let class = classify_sdk(sdk, descriptor.output_type.as_deref()).ok_or_else(|| {
            ResolveError::UnknownSdk {
                project: name.clone(),
                sdk: sdk.to_string(),
            }
        })?;
        debug!(project = %name, sdk = %sdk, version = %version, "descriptor resolved");

        let settings = self.load_settings(options, &descriptor, &folder, &name, class)?;
        let home = options.home.as_deref();

        let target = match class {
            SdkClass::Library => {
                DeployTarget::Library(nuget_target(settings.nuget.as_ref(), &self.store, home))
            }
            SdkClass::Executable => {
                let linux = settings
                    .linux
                    .as_ref()
                    .ok_or_else(|| ResolveError::MissingConfigSection {
                        project: name.clone(),
                        section: format!("{}:Linux", SECTION),
                    })?;
                let front_end = linux.front_end.unwrap_or(sdk.trim() == SDK_BLAZOR_WASM);
                let linux = linux_target(&name, linux, front_end, home)?;
                if front_end {
                    DeployTarget::FrontEnd(linux)
                } else {
                    DeployTarget::Service(linux)
                }
            }
        };

        let temp_work_folder = settings
            .temp_folder
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| expand_home(t, home))
            .unwrap_or_else(|| options.temp_root.join("dotship"));
        let temp_project_folder = temp_work_folder.join(&name);
        let work = WorkPaths {
            output_path: temp_project_folder
                .join("bin")
                .join(build_configuration.as_str()),
            temp_project_folder,
            temp_work_folder,
        };
        for dir in [&work.temp_work_folder, &work.temp_project_folder] {
            fs::create_dir_all(dir)?;
        }

        let spec = DeploymentSpec {
            project: ProjectInfo { path, name, folder },
            version,
            build_configuration,
            work,
            target,
            intent: options.intent,
        };
        info!(
            project = %spec.project_name(),
            version = %spec.version,
            kind = %spec.output_kind(),
            "resolved"
        );
        Ok(spec)
    }

    fn load_settings(
        &self,
        options: &ResolveOptions,
        descriptor: &ProjectFile,
        folder: &Path,
        name: &str,
        class: SdkClass,
    ) -> Result<DotshipSettings, ResolveError> {
        let sources = SettingsSources {
            global: options.global_settings.clone(),
            local_override: Some(options.working_dir.join(LOCAL_OVERRIDE_FILE)),
            project: Some(folder.join(PROJECT_SETTINGS_FILE)),
            user_secrets: descriptor
                .user_secrets_id
                .as_deref()
                .zip(options.user_secrets_root.as_deref())
                .map(|(id, root)| user_secrets_path(root, id)),
        };
        let layers = load_layers(&sources)?;

        let Some(section) = layers.section(SECTION) else {
            if class == SdkClass::Executable {
                return Err(ResolveError::MissingConfigSection {
                    project: name.to_string(),
                    section: SECTION.to_string(),
                });
            }
            return Ok(DotshipSettings::default());
        };

        let (settings, warnings) = bind_section(section)?;
        for warning in warnings {
            warn!(key = %warning.key, "unknown settings key ignored");
        }
        Ok(settings)
    }
}

/// Find the descriptor: the explicit path, or the only `*.csproj` in `working_dir`.
pub fn locate_project(project: Option<&Path>, working_dir: &Path) -> Result<PathBuf, ResolveError> {
    if let Some(project) = project {
        let path = if project.is_absolute() {
            project.to_path_buf()
        } else {
            working_dir.join(project)
        };
        if !path.is_file() {
            return Err(ResolveError::ProjectFileMissing { path });
        }
        if !has_project_extension(&path) {
            return Err(ResolveError::WrongExtension { path });
        }
        return Ok(path);
    }

    let mut found = list_projects(working_dir)?;
    match found.len() {
        0 => Err(ResolveError::NoProjectFound {
            dir: working_dir.to_path_buf(),
        }),
        1 => Ok(found.remove(0)),
        count => Err(ResolveError::AmbiguousProjects {
            dir: working_dir.to_path_buf(),
            count,
        }),
    }
}

/// `*.csproj` files directly inside `dir`, sorted.
pub(crate) fn list_projects(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_project_extension(&path) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

fn has_project_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(PROJECT_EXTENSION))
}

/// The descriptor's own `Version`, else the `Version` of the project its
/// `SetVersionFrom*` target points at. The reference is not followed further.
pub fn resolve_version(descriptor: &ProjectFile) -> Result<ProjectVersion, ResolveError> {
    let project = descriptor.project_name();
    let unresolvable = |reason: String| ResolveError::VersionUnresolvable {
        project: project.clone(),
        reason,
    };

    if let Some(version) = &descriptor.version {
        return ProjectVersion::parse(version)
            .map_err(|e| unresolvable(format!("'{}': {}", version, e)));
    }

    let Some(target) = &descriptor.version_target else {
        return Err(unresolvable(
            "no <Version> property and no SetVersionFrom target".into(),
        ));
    };
    let reference = descriptor.first_reference.as_ref().ok_or_else(|| {
        unresolvable(format!("target {} has no ProjectReference to follow", target))
    })?;
    let referenced = ProjectFile::load(reference).map_err(|e| unresolvable(e.to_string()))?;
    let version = referenced.version.as_deref().ok_or_else(|| {
        unresolvable(format!(
            "referenced project {} has no <Version>",
            reference.display()
        ))
    })?;
    debug!(reference = %reference.display(), version = %version, "version taken from reference");
    ProjectVersion::parse(version).map_err(|e| unresolvable(format!("'{}': {}", version, e)))
}
