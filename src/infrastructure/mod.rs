//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local directory snapshots and the SSH remote

pub mod fs;

pub use fs::SshRemote;
