//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{DeployUseCase, ResolveUseCase};
use crate::infrastructure::{GlobalConfigStore, ProcessExecutor, SshConnector};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<ProcessExecutor, SshConnector>;

/// Credential store at the default shared and machine-local locations
pub fn create_global_store() -> GlobalConfigStore {
    GlobalConfigStore::from_env()
}

pub fn create_resolve_use_case() -> ResolveUseCase {
    ResolveUseCase::new(create_global_store())
}

/// Create a deploy use case running local tools through `std::process`
/// and remote steps over ssh.
pub fn create_deploy_use_case() -> ConcreteDeployUseCase {
    DeployUseCase::new(ProcessExecutor::new(), SshConnector)
}
