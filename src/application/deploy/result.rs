//! Deploy Result
//!
//! Result types for deploy operations.

use std::path::PathBuf;

use crate::application::sync::SyncReport;

/// Outcome of one executed task
#[derive(Debug, Clone)]
pub struct TaskReport {
    /// Declaration index
    pub index: usize,
    pub source: PathBuf,
    pub target: String,
    /// Where the previous target content was moved, if it existed
    pub backup: Option<String>,
    pub sync: SyncReport,
}

/// Result of a deploy run
#[derive(Debug, Clone)]
pub struct DeployReport {
    /// Deployment name
    pub name: String,
    /// Timestamped container shared by all backups of a multi-task run
    pub backup_home: Option<String>,
    /// Executed tasks, in declaration order
    pub tasks: Vec<TaskReport>,
}

impl DeployReport {
    pub fn upload_count(&self) -> usize {
        self.tasks.iter().map(|t| t.sync.upload_count()).sum()
    }

    pub fn created_dir_count(&self) -> usize {
        self.tasks.iter().map(|t| t.sync.created_dirs.len()).sum()
    }

    pub fn ignored_count(&self) -> usize {
        self.tasks.iter().map(|t| t.sync.ignored.len()).sum()
    }

    pub fn unsupported_count(&self) -> usize {
        self.tasks.iter().map(|t| t.sync.unsupported.len()).sum()
    }
}
