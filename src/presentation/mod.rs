//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Argument definitions shared by every command
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use dotship::presentation::factory;
//!
//! let resolver = factory::create_resolve_use_case();
//! let spec = resolver.resolve(&options)?;
//! let report = factory::create_deploy_use_case().run(&spec)?;
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, Commands};
pub use factory::{create_deploy_use_case, create_global_store, create_resolve_use_case};
