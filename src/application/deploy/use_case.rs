//! Deploy Use Case
//!
//! Orchestrates the deployment flow:
//! 1. Connect to the remote host
//! 2. Plan backups, reject colliding backup paths, create the Backup Home and
//!    check that every target exists
//! 3. For each task, move the target to its backup and upload the source
//! 4. Disconnect, whatever happened before
//!
//! Nothing is mutated remotely until every target has been checked.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::application::sync::DirectorySynchronizer;
use crate::domain::entities::{DeploymentConfig, Task};
use crate::domain::ports::{Endpoint, RemoteFs};
use crate::domain::services::{BackupPlan, BackupPlanner};
use crate::domain::value_objects::IgnoreRules;
use crate::error::{UpsshResult, ValidationError};

use super::result::{DeployReport, TaskReport};

/// Deploy use case - orchestrates the deployment flow
///
/// Parameterized by the remote port so tests can run it against an
/// in-memory host.
pub struct DeployUseCase<R: RemoteFs> {
    remote: R,
    rules: IgnoreRules,
    planner: BackupPlanner,
}

impl<R: RemoteFs> DeployUseCase<R> {
    pub fn new(remote: R, rules: IgnoreRules) -> Self {
        let planner = BackupPlanner::new(remote.separator());
        Self {
            remote,
            rules,
            planner,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Run every task of `config`; `timestamp` names the Backup Home.
    ///
    /// The connection is released on every exit path once it was opened.
    pub fn execute(
        &mut self,
        endpoint: &Endpoint,
        config: &DeploymentConfig,
        timestamp: DateTime<Utc>,
    ) -> UpsshResult<DeployReport> {
        tracing::info!("Trying to connect to {}", endpoint);
        self.remote.connect(endpoint)?;
        tracing::info!("Connected");

        let outcome = self.run(config, &timestamp);
        let disconnected = self.remote.disconnect();

        match (outcome, disconnected) {
            (Ok(report), Ok(())) => {
                tracing::info!("Disconnected");
                Ok(report)
            }
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), Err(disconnect_error)) => {
                tracing::warn!("Disconnect failed: {}", disconnect_error);
                Err(e)
            }
            (Err(e), Ok(())) => {
                tracing::info!("Disconnected");
                Err(e)
            }
        }
    }

    fn run(&self, config: &DeploymentConfig, timestamp: &DateTime<Utc>) -> UpsshResult<DeployReport> {
        let plan = self.prepare(config, timestamp)?;
        let synchronizer = DirectorySynchronizer::new(&self.remote, &self.rules);

        let mut tasks = Vec::with_capacity(plan.tasks.len());
        for (index, task) in plan.tasks.iter().enumerate() {
            tracing::info!("Executing the task ({})", index);
            let backup = self.back_up(task)?;

            tracing::info!(
                "  * Upload: Upload the directory ({}) to ({})",
                task.source().display(),
                task.target()
            );
            let sync = synchronizer.synchronize(task.source(), task.target())?;

            tasks.push(TaskReport {
                index,
                source: task.source().to_path_buf(),
                target: task.target().to_string(),
                backup,
                sync,
            });
        }

        Ok(DeployReport {
            name: config.name.clone(),
            backup_home: plan.backup_home,
            tasks,
        })
    }

    /// Plan backups, create the Backup Home if needed and check every target.
    ///
    /// Colliding backup paths are rejected before anything is touched remotely.
    fn prepare(&self, config: &DeploymentConfig, timestamp: &DateTime<Utc>) -> UpsshResult<BackupPlan> {
        let plan = self.planner.plan(config, timestamp);
        check_backup_collisions(&plan)?;

        if let Some(home) = &plan.backup_home {
            if self.remote.exists(home)? {
                tracing::debug!("Backup home directory ({}) already exists", home);
            } else {
                self.remote.mkdir(home, true)?;
                tracing::info!("Backup home directory ({}) created", home);
            }
        }

        for (index, task) in plan.tasks.iter().enumerate() {
            tracing::info!("Validating the target ({}) of the task ({})", task.target(), index);
            if !self.remote.exists(task.target())? {
                return Err(ValidationError::TargetNotFound {
                    index,
                    target: task.target().to_string(),
                }
                .into());
            }
        }

        Ok(plan)
    }

    /// Move the current target to its backup path when it exists.
    fn back_up(&self, task: &Task) -> UpsshResult<Option<String>> {
        let Some(backup) = task.backup() else {
            return Ok(None);
        };

        if !self.remote.exists(task.target())? {
            tracing::info!(
                "  * Backup: The target directory ({}) does not exist and was not moved",
                task.target()
            );
            return Ok(None);
        }

        tracing::info!(
            "  * Backup: Move the directory ({}) to ({})",
            task.target(),
            backup
        );
        self.remote.rename(task.target(), backup)?;
        Ok(Some(backup.to_string()))
    }
}

/// Two tasks must never move their targets to the same backup path.
fn check_backup_collisions(plan: &BackupPlan) -> Result<(), ValidationError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, task) in plan.tasks.iter().enumerate() {
        let Some(backup) = task.backup() else {
            continue;
        };
        if let Some(&first) = seen.get(backup) {
            return Err(ValidationError::BackupCollision {
                index,
                first,
                backup: backup.to_string(),
            });
        }
        seen.insert(backup, index);
    }
    Ok(())
}
