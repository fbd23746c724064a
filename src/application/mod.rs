//! Application Layer
//!
//! Use cases that orchestrate the publish flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ResolveUseCase` - Project descriptor + layered settings into a `DeploymentSpec`
//! - `DeployUseCase` - Runs one spec through its deployment state machine
//! - `BatchUseCase` - Publishes every enabled project of a batch config in order
//! - `detect` - Decides between batch and single-project mode

pub mod batch;
pub mod deploy;
pub mod detect;
pub mod resolve;

pub use batch::{
    batch_config_path, load_batch_config, BatchOutcome, BatchReport, BatchUseCase, ProjectPublisher,
};
pub use deploy::{plan, DeployReport, DeployUseCase, HostStep, LibraryStep, Plan};
pub use detect::detect;
pub use resolve::{ResolveOptions, ResolveUseCase};
