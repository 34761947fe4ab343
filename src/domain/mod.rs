//! Domain Layer
//!
//! Pure deployment logic without network I/O.
//!
//! ## Structure
//!
//! - `entities/` - Task and DeploymentConfig
//! - `value_objects/` - Ignore rules and remote path helpers
//! - `services/` - Backup planning
//! - `ports/` - The `RemoteFs` interface implemented by infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
