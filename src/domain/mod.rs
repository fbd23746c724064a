//! Domain Layer
//!
//! The publish model without I/O: what a project is, how it deploys,
//! and which steps a deployment takes.
//!
//! ## Structure
//!
//! - `entities/` - Deployment spec, target configs, batch config, detection result
//! - `value_objects/` - Version, build configuration, output kind
//! - `services/` - Pure helpers (SDK classification, detection, rendered files)
//! - `ports/` - Local and remote executor traits, publish events
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Immutable specs** - A `DeploymentSpec` is built once and only read afterwards
//! 3. **Ports & Adapters** - All process and remote work goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
