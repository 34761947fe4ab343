//! Domain Entities
//!
//! - `Task` - one source directory synchronized onto one remote directory
//! - `DeploymentConfig` - the resolved, ordered task list plus run settings

mod task;

pub use task::{DeploymentConfig, Task, TaskOrigin};
