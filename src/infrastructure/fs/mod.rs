//! File System Implementations
//!
//! The local side is read one directory level at a time; the remote side
//! implements the RemoteFs port over SSH.

pub mod local;
mod remote;

pub use local::{list_dir, EntryKind, LocalEntry};
pub use remote::SshRemote;
