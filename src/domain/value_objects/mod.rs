//! Domain Value Objects
//!
//! Immutable value types derived while resolving a project.

mod build_configuration;
mod output_kind;
mod version;

pub use build_configuration::BuildConfiguration;
pub use output_kind::OutputKind;
pub use version::{ProjectVersion, VersionError};
