//! dotship - publish .NET projects from the command line
//!
//! A project descriptor (`*.csproj`) plus layered JSON settings resolve into
//! an immutable `DeploymentSpec`, which then runs through one of two
//! deployment paths: libraries are packed and pushed to a NuGet feed;
//! services and front-ends are built, shipped over ssh and installed on a
//! Linux host behind systemd and nginx. A batch config publishes several
//! projects one after another.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{BatchUseCase, DeployUseCase, ResolveOptions, ResolveUseCase};
pub use domain::entities::{DeploymentSpec, DetectionMode, DetectionResult};
pub use domain::value_objects::{BuildConfiguration, OutputKind, ProjectVersion};
pub use error::{BatchError, DeployError, DotshipError, DotshipResult, ResolveError};
pub use logging::{init_logging, LoggingConfig};
