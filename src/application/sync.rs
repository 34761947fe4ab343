//! Directory synchronization
//!
//! Mirrors a local directory onto a remote one, depth first. Every run is a
//! full re-push: remote files are overwritten without comparison and nothing
//! is ever deleted remotely. The first failing remote call aborts the walk.

use std::path::{Path, PathBuf};

use crate::domain::ports::RemoteFs;
use crate::domain::value_objects::{remote_path, IgnoreRules};
use crate::error::{UpsshError, UpsshResult};
use crate::infrastructure::fs::{list_dir, EntryKind};

/// One transferred file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub local: PathBuf,
    pub remote: String,
}

/// What one synchronization did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Remote directories created by this walk
    pub created_dirs: Vec<String>,
    /// Remote directories that already existed
    pub reused_dirs: Vec<String>,
    pub uploads: Vec<Upload>,
    /// Local entries skipped by the ignore rules
    pub ignored: Vec<PathBuf>,
    /// Local entries that are neither files nor directories
    pub unsupported: Vec<PathBuf>,
}

impl SyncReport {
    pub fn upload_count(&self) -> usize {
        self.uploads.len()
    }
}

/// Walks a local tree and replays it on a [`RemoteFs`]
pub struct DirectorySynchronizer<'a, R: RemoteFs> {
    remote: &'a R,
    rules: &'a IgnoreRules,
}

impl<'a, R: RemoteFs> DirectorySynchronizer<'a, R> {
    pub fn new(remote: &'a R, rules: &'a IgnoreRules) -> Self {
        Self { remote, rules }
    }

    /// Mirror `local_root` onto `remote_root`.
    pub fn synchronize(&self, local_root: &Path, remote_root: &str) -> UpsshResult<SyncReport> {
        let mut report = SyncReport::default();
        self.sync_dir(local_root, local_root, remote_root, &mut report)?;
        Ok(report)
    }

    fn sync_dir(
        &self,
        root: &Path,
        dir: &Path,
        remote_dir: &str,
        report: &mut SyncReport,
    ) -> UpsshResult<()> {
        if self.remote.exists(remote_dir)? {
            tracing::debug!("Target directory already exists: {}", remote_dir);
            report.reused_dirs.push(remote_dir.to_string());
        } else {
            self.remote.mkdir(remote_dir, false)?;
            tracing::info!("Created target directory: {}", remote_dir);
            report.created_dirs.push(remote_dir.to_string());
        }

        let entries = list_dir(dir).map_err(|source| UpsshError::LocalIo {
            path: dir.to_path_buf(),
            source,
        })?;
        let separator = self.remote.separator();

        for entry in entries {
            match entry.kind {
                EntryKind::Directory => {
                    let relative = entry.path.strip_prefix(root).unwrap_or(&entry.path);
                    if self.rules.is_dir_ignored(relative) {
                        tracing::info!("Ignored directory: {}", relative.display());
                        report.ignored.push(entry.path);
                        continue;
                    }
                    let remote_child = remote_path::join(remote_dir, &entry.name, separator);
                    self.sync_dir(root, &entry.path, &remote_child, report)?;
                }
                EntryKind::File => {
                    if self.rules.is_file_ignored(&entry.name) {
                        tracing::info!("Ignored file: {}", entry.name);
                        report.ignored.push(entry.path);
                        continue;
                    }
                    let remote_file = remote_path::join(remote_dir, &entry.name, separator);
                    self.remote.put(&entry.path, &remote_file)?;
                    tracing::info!("Uploaded {} to {}", entry.path.display(), remote_file);
                    report.uploads.push(Upload {
                        local: entry.path,
                        remote: remote_file,
                    });
                }
                EntryKind::Unsupported => {
                    tracing::warn!(
                        "Skipped {}: not a regular file or directory",
                        entry.path.display()
                    );
                    report.unsupported.push(entry.path);
                }
            }
        }

        Ok(())
    }
}
