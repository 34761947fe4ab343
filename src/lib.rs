//! upssh - directory deployment over SSH
//!
//! Uploads one or more local directory trees to a remote host. Before each
//! upload the current remote target is moved aside to a backup location, so
//! a run can always be rolled back by hand.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeployReport, DeployUseCase, DirectorySynchronizer, SyncReport};
pub use config::{ConfigWarning, ResolvedConfig};
pub use domain::entities::{DeploymentConfig, Task, TaskOrigin};
pub use domain::ports::{Endpoint, RemoteError, RemoteFs, RemoteResult};
pub use domain::value_objects::IgnoreRules;
pub use error::{ConfigError, ErrorKind, UpsshError, UpsshResult, ValidationError};
pub use infrastructure::SshRemote;
