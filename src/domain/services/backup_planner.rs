//! Backup planning service
//!
//! Pure domain logic deciding where each task's current remote content is
//! moved before upload. No I/O: creating the Backup Home and checking that
//! targets exist is the deploy use case's job.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::entities::{DeploymentConfig, Task};
use crate::domain::value_objects::remote_path;

/// Backup destinations of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupPlan {
    /// Timestamped container, only for multi-task runs
    pub backup_home: Option<String>,
    /// Tasks in declaration order, each with its backup set
    pub tasks: Vec<Task>,
}

/// Format a run timestamp as an ISO-8601 instant (`2024-05-01T10:20:30.123Z`)
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Computes backup paths for a deployment
#[derive(Debug, Clone, Copy)]
pub struct BackupPlanner {
    separator: char,
}

impl BackupPlanner {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// `backup_root / name_timestamp`
    pub fn backup_home(&self, config: &DeploymentConfig, timestamp: &DateTime<Utc>) -> String {
        let dir_name = format!("{}_{}", config.name, format_timestamp(timestamp));
        remote_path::join(&config.backup_root, &dir_name, self.separator)
    }

    /// Assign a backup to every task.
    ///
    /// Several tasks share one Backup Home and get `home/<target base name>`.
    /// A single task gets `backup_root/<target base name>` with no container.
    pub fn plan(&self, config: &DeploymentConfig, timestamp: &DateTime<Utc>) -> BackupPlan {
        let backup_home = config
            .is_multi_task()
            .then(|| self.backup_home(config, timestamp));
        let parent = backup_home.as_deref().unwrap_or(&config.backup_root);

        let tasks = config
            .tasks
            .iter()
            .map(|task| {
                let base_name = remote_path::base_name(task.target(), self.separator);
                let backup = remote_path::join(parent, base_name, self.separator);
                task.clone().with_backup(backup)
            })
            .collect();

        BackupPlan { backup_home, tasks }
    }
}

impl Default for BackupPlanner {
    fn default() -> Self {
        Self::new('/')
    }
}
