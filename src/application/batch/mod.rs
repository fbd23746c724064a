//! Batch Module
//!
//! Publishes every enabled project of a batch config, one after another.
//!
//! ## Structure
//!
//! - `loader` - Locating, reading and validating the batch config
//! - `use_case` - `BatchUseCase`, sequential runs with failure isolation
//! - `result` - `BatchReport`

mod loader;
mod result;
mod use_case;

pub use loader::{batch_config_path, load_batch_config};
pub use result::{BatchOutcome, BatchReport};
pub use use_case::{BatchUseCase, ProjectPublisher};

#[cfg(test)]
mod tests;
