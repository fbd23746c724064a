//! Deploy Module
//!
//! The per-project deployment state machine.
//!
//! ## Structure
//!
//! - `plan` - Transition table: which steps run for a spec, in order
//! - `use_case` - `DeployUseCase`, executing a plan fail-fast
//! - `library` - Pack and PublishPackage
//! - `host` - Build, transfer and the service/front-end steps
//! - `nginx` - Site reconciliation with backup and restore
//! - `result` - `DeployReport`
//!
//! ## Usage
//!
//! ```ignore
//! use dotship::application::deploy::DeployUseCase;
//! use dotship::infrastructure::{ProcessExecutor, SshConnector};
//!
//! let use_case = DeployUseCase::new(ProcessExecutor::new(), SshConnector);
//! let report = use_case.run(&spec)?;
//! ```

mod host;
mod library;
mod nginx;
mod plan;
mod result;
mod use_case;

pub use nginx::NginxOutcome;
pub use plan::{host_plan, library_plan, plan, HostStep, LibraryStep, Plan};
pub use result::DeployReport;
pub use use_case::DeployUseCase;
