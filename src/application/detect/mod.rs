//! Detect Module
//!
//! Probes a directory and decides between batch and single-project mode.

mod use_case;

pub use use_case::detect;
