//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod backup_planner;

pub use backup_planner::{format_timestamp, BackupPlan, BackupPlanner};
