//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

#[cfg(test)]
pub mod mock_remote;
pub mod remote_fs;

pub use remote_fs::{Endpoint, RemoteError, RemoteFs, RemoteResult};
