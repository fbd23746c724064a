//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod batch_events;
pub mod local_executor;
pub mod remote_executor;

pub use batch_events::{BatchEvent, BatchEventSink, NoopEventSink};
pub use local_executor::{CommandOutput, CommandSpec, LocalError, LocalExecutor, LocalResult};
pub use remote_executor::{
    RemoteConnector, RemoteError, RemoteExecutor, RemoteResult, ServiceAction,
};
