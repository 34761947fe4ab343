//! Task resolution
//!
//! Builds the ordered task list from exactly one origin:
//! - `UPSSH_TARGET_PATH`: the local working directory goes to that target
//! - the play file: its `tasks`, with `name`, `backup` and `rwd` overrides
//!
//! Everything here runs before connecting. Sources are checked on the local
//! disk; target existence is checked later, by the deploy use case.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::play_file::{ConfigWarning, PlayFile, PlayTask};
use crate::config::settings::Settings;
use crate::domain::entities::{DeploymentConfig, Task, TaskOrigin};
use crate::domain::ports::Endpoint;
use crate::domain::value_objects::remote_path;
use crate::error::{ConfigError, UpsshResult, ValidationError};

/// Fallback when the working directory has no usable name
const DEFAULT_DEPLOYMENT_NAME: &str = "upssh";

/// Inputs of one resolution
#[derive(Debug, Clone)]
pub struct ResolveInputs<'a> {
    /// Local working directory (absolute)
    pub working_dir: &'a Path,
    pub settings: &'a Settings,
    /// Where the play file is looked up
    pub play_file: &'a Path,
    /// Remote separator
    pub separator: char,
}

/// Output of a successful resolution
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint: Endpoint,
    pub deployment: DeploymentConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Resolve settings and the optional play file into a deployment.
pub fn resolve(inputs: &ResolveInputs<'_>) -> UpsshResult<ResolvedConfig> {
    let settings = inputs.settings;
    let play_file_present = inputs.play_file.is_file();

    if let Some(target) = &settings.target_path {
        if play_file_present {
            return Err(ConfigError::ConflictingOrigins {
                target: target.clone(),
                play_file: inputs.play_file.to_path_buf(),
            }
            .into());
        }
    }

    let mut name = default_name(inputs.working_dir);
    let mut backup_root = settings.backup_path.clone();
    let mut remote_working_dir = None;
    let mut warnings = Vec::new();
    let mut declared: Vec<DeclaredTask> = Vec::new();
    let origin;

    if let Some(target) = &settings.target_path {
        origin = TaskOrigin::Environment;
        name = remote_path::base_name(target, inputs.separator).to_string();
        declared.push(DeclaredTask {
            source: Some(inputs.working_dir.to_path_buf()),
            target: Some(target.clone()),
        });
    } else if play_file_present {
        origin = TaskOrigin::PlayFile;
        tracing::info!("A play file was found ({})", inputs.play_file.display());
        let (play, play_warnings) = PlayFile::load(inputs.play_file)?;
        warnings = play_warnings;

        if let Some(play_name) = play.name {
            tracing::info!("A deployment name property (name) was found in the play file");
            name = play_name;
        }
        if let Some(backup) = play.backup {
            tracing::info!("A backup path was found in the play file: {}", backup);
            backup_root = Some(backup);
        }
        if let Some(rwd) = play.rwd {
            tracing::info!("A remote working directory was found in the play file: {}", rwd);
            remote_working_dir = Some(rwd);
        }
        if let Some(tasks) = play.tasks {
            tracing::info!(
                "A list of tasks was found in the play file with {} tasks",
                tasks.len()
            );
            declared = tasks.into_iter().map(DeclaredTask::from).collect();
        }
    } else {
        origin = TaskOrigin::PlayFile;
    }

    let tasks = declared
        .iter()
        .enumerate()
        .map(|(index, task)| {
            resolve_task(
                index,
                task,
                inputs.working_dir,
                remote_working_dir.as_deref(),
                inputs.separator,
            )
        })
        .collect::<UpsshResult<Vec<_>>>()?;

    let backup_root = backup_root.ok_or_else(|| ConfigError::MissingBackupRoot {
        play_file: inputs.play_file.to_path_buf(),
    })?;

    if tasks.is_empty() {
        return Err(ConfigError::NoTasks {
            play_file: inputs.play_file.to_path_buf(),
        }
        .into());
    }

    Ok(ResolvedConfig {
        endpoint: settings.endpoint.clone(),
        deployment: DeploymentConfig {
            name,
            backup_root,
            remote_working_dir,
            origin,
            tasks,
        },
        warnings,
    })
}

/// A task before validation, from either origin
struct DeclaredTask {
    source: Option<PathBuf>,
    target: Option<String>,
}

impl From<PlayTask> for DeclaredTask {
    fn from(task: PlayTask) -> Self {
        Self {
            source: task.source.map(PathBuf::from),
            target: task.target,
        }
    }
}

/// Validate one declared task: source first, then target.
fn resolve_task(
    index: usize,
    task: &DeclaredTask,
    working_dir: &Path,
    remote_working_dir: Option<&str>,
    separator: char,
) -> UpsshResult<Task> {
    tracing::debug!("Validating the source of the task ({})", index);
    let source = task
        .source
        .as_deref()
        .ok_or(ConfigError::MissingSource { index })?;
    let source = resolve_source(index, source, working_dir)?;

    let target = task
        .target
        .as_deref()
        .ok_or(ConfigError::MissingTarget { index })?;
    let target = if remote_path::is_absolute(target, separator) {
        target.to_string()
    } else {
        let rwd = remote_working_dir.ok_or_else(|| ConfigError::RelativeTargetWithoutRwd {
            index,
            target: target.to_string(),
        })?;
        remote_path::join(rwd, target, separator)
    };

    Ok(Task::new(source, target))
}

fn resolve_source(index: usize, source: &Path, working_dir: &Path) -> UpsshResult<PathBuf> {
    let path = if source.is_absolute() {
        source.to_path_buf()
    } else {
        let relative: PathBuf = source
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        working_dir.join(relative)
    };

    match fs::metadata(&path) {
        Ok(metadata) if metadata.is_dir() => Ok(path),
        Ok(_) => Err(ValidationError::SourceNotDirectory { index, path }.into()),
        Err(_) => Err(ValidationError::SourceNotFound { index, path }.into()),
    }
}

fn default_name(working_dir: &Path) -> String {
    working_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_DEPLOYMENT_NAME.to_string())
}
