//! Resolve Module
//!
//! Turns a project descriptor plus layered settings into a `DeploymentSpec`.
//!
//! ## Structure
//!
//! - `options` - `ResolveOptions` (project, locations, operator intent)
//! - `use_case` - `ResolveUseCase`
//! - `target` - Binding settings onto NuGet / Linux target configs

mod options;
mod target;
mod use_case;

pub use options::ResolveOptions;
pub use use_case::{locate_project, resolve_version, ResolveUseCase};
pub(crate) use use_case::list_projects;

#[cfg(test)]
mod tests;
