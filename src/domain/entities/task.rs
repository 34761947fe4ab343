//! Task and DeploymentConfig entities
//!
//! A `Task` is one source-directory-to-remote-directory unit. Tasks are built
//! and validated once by the config resolver; only `backup` is filled in later,
//! by the backup planner, before any remote mutation.

use std::path::{Path, PathBuf};

/// Where the task list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrigin {
    /// Single target from `UPSSH_TARGET_PATH`
    Environment,
    /// `tasks` of the play file
    PlayFile,
}

/// One synchronization unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Existing local directory (absolute)
    source: PathBuf,
    /// Absolute remote directory
    target: String,
    /// Remote backup destination, set by the planner
    backup: Option<String>,
}

impl Task {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            backup: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn backup(&self) -> Option<&str> {
        self.backup.as_deref()
    }

    pub fn with_backup(mut self, backup: impl Into<String>) -> Self {
        self.backup = Some(backup.into());
        self
    }
}

/// Fully resolved deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    /// Used to name the Backup Home of multi-task runs
    pub name: String,
    /// Remote directory receiving the backups
    pub backup_root: String,
    /// Remote working directory relative targets were resolved against
    pub remote_working_dir: Option<String>,
    pub origin: TaskOrigin,
    /// Declaration order is execution order
    pub tasks: Vec<Task>,
}

impl DeploymentConfig {
    pub fn is_multi_task(&self) -> bool {
        self.tasks.len() > 1
    }
}
