//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Connect, plan backups, move targets, upload, disconnect
//! - `DirectorySynchronizer` - Mirror one local directory onto the remote host

pub mod deploy;
pub mod sync;

pub use deploy::{DeployReport, DeployUseCase, TaskReport};
pub use sync::{DirectorySynchronizer, SyncReport, Upload};
