//! Infrastructure Layer
//!
//! Concrete implementations of domain ports and the file formats dotship reads.
//!
//! ## Structure
//!
//! - `fs/` - Home and settings locations
//! - `config/` - Layered JSON settings, global credential store
//! - `project_file` - `.csproj` parsing
//! - `process` - Local executor (`std::process`, tar/gzip)
//! - `ssh` - Remote executor (ssh/scp)

pub mod config;
pub mod fs;
pub mod process;
pub mod project_file;
pub mod ssh;

pub use config::{GlobalConfigStore, StoreScope};
pub use process::ProcessExecutor;
pub use project_file::ProjectFile;
pub use ssh::{SshConnector, SshRemote};
