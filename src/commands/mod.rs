//! Command handlers for the dotship binary.
//!
//! Each handler returns the process exit code, or an error that `main`
//! maps to one.

pub mod detect;
pub mod init_batch;
pub mod publish;
pub mod set;
