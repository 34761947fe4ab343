//! Error types for upssh
//!
//! Uses `thiserror` for library errors. Every failure is fatal for the run.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::RemoteError;

/// Result type alias for upssh operations
pub type UpsshResult<T> = Result<T, UpsshError>;

/// Main error type for upssh operations
#[derive(Error, Debug)]
pub enum UpsshError {
    /// Settings or play file are missing, conflicting or malformed
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A declared source or target does not exist
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The remote host refused or failed an operation
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A local directory could not be listed during synchronization
    #[error("cannot list {}: {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Taxonomy bucket of an [`UpsshError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    RemoteOperation,
    LocalIo,
}

impl UpsshError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Remote(_) => ErrorKind::RemoteOperation,
            Self::LocalIo { .. } => ErrorKind::LocalIo,
        }
    }

    /// Process exit code for this error. Every fatal error exits with 1.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Configuration errors, always reported before connecting
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("the remote host is not set (UPSSH_SFTP_SERVER)")]
    MissingServer,

    #[error("invalid value '{value}' for {key}: {message}")]
    InvalidSetting {
        key: &'static str,
        value: String,
        message: String,
    },

    #[error(
        "a target path ({target}) was found in the environment (UPSSH_TARGET_PATH) and a play file was found ({}); move the target into the play file",
        play_file.display()
    )]
    ConflictingOrigins { target: String, play_file: PathBuf },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {message}", path.display())]
    InvalidEnvFile { path: PathBuf, message: String },

    #[error("invalid play file {}: {message}", path.display())]
    InvalidPlayFile { path: PathBuf, message: String },

    #[error("the task ({index}) does not have a 'source' property")]
    MissingSource { index: usize },

    #[error("the task ({index}) does not have a 'target' property")]
    MissingTarget { index: usize },

    #[error(
        "the target path ({target}) of the task ({index}) is relative, the remote working directory property (rwd) should then be set"
    )]
    RelativeTargetWithoutRwd { index: usize, target: String },

    #[error(
        "the remote backup path is not defined; set it in the environment (UPSSH_BACKUP_PATH) or in the `backup` property of the play file ({})",
        play_file.display()
    )]
    MissingBackupRoot { play_file: PathBuf },

    #[error("nothing to deploy: set UPSSH_TARGET_PATH or define tasks in the play file ({})", play_file.display())]
    NoTasks { play_file: PathBuf },

    #[error("{} exceeds the {limit} bytes limit ({size} bytes)", path.display())]
    IgnoreFileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{} has {count} patterns, exceeds the {limit} limit", path.display())]
    TooManyIgnorePatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    #[error("invalid ignore pattern at {}:{line}: '{pattern}' - {message}", path.display())]
    InvalidIgnorePattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    #[error("failed to build ignore matcher: {0}")]
    IgnoreBuild(String),
}

/// Validation errors, reported while checking tasks and before any mutation
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("the source ({}) of the task ({index}) does not exist", path.display())]
    SourceNotFound { index: usize, path: PathBuf },

    #[error("the source ({}) of the task ({index}) is not a directory", path.display())]
    SourceNotDirectory { index: usize, path: PathBuf },

    #[error("the target path ({target}) of the task ({index}) does not exist")]
    TargetNotFound { index: usize, target: String },

    #[error("the backup path ({backup}) of the task ({index}) is already used by the task ({first})")]
    BackupCollision {
        index: usize,
        first: usize,
        backup: String,
    },
}
