//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - There are no subcommands: one invocation is one deployment
//! - `.env`, the play file and the ignore files are looked up in `--dir`

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::{ENV_FILE, PLAY_FILE};

/// upssh - upload a local directory tree over SSH, backing up the previous
/// remote content first
#[derive(Parser, Debug)]
#[command(name = "upssh")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Settings come from the environment or a .env file: UPSSH_SFTP_SERVER, UPSSH_SFTP_USER, UPSSH_SFTP_PASSWORD, UPSSH_SFTP_PORT, UPSSH_SFTP_TIMEOUT, UPSSH_TARGET_PATH, UPSSH_BACKUP_PATH."
)]
pub struct Cli {
    /// Local working directory
    #[arg(short = 'd', long, default_value = ".")]
    pub dir: PathBuf,

    /// Settings file [default: <DIR>/.env]
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Play file [default: <DIR>/upssh.json]
    #[arg(long)]
    pub play_file: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Settings file, resolved against `working_dir` unless given explicitly
    pub fn env_file_in(&self, working_dir: &Path) -> PathBuf {
        self.env_file
            .clone()
            .unwrap_or_else(|| working_dir.join(ENV_FILE))
    }

    /// Play file, resolved against `working_dir` unless given explicitly
    pub fn play_file_in(&self, working_dir: &Path) -> PathBuf {
        self.play_file
            .clone()
            .unwrap_or_else(|| working_dir.join(PLAY_FILE))
    }

    /// Default log filter for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info,russh=warn",
            1 => "debug,russh=info,ignore=warn,globset=warn",
            _ => "trace",
        }
    }
}
