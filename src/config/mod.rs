//! Configuration module for upssh
//!
//! Resolution order:
//! 1. Process environment (`UPSSH_*` or bare keys)
//! 2. `.env` in the local working directory
//! 3. Play file (`upssh.json`) for tasks and run-level overrides
//!
//! `UPSSH_TARGET_PATH` and a play file are mutually exclusive.

pub mod play_file;
mod resolver;
pub mod settings;

use std::path::Path;

pub use play_file::{ConfigWarning, PlayFile, PlayTask, PLAY_FILE};
pub use resolver::{resolve, ResolveInputs, ResolvedConfig};
pub use settings::{Settings, SettingsSource, ENV_FILE};

use crate::error::UpsshResult;

/// Load settings from `env_file` and the environment, then resolve tasks.
pub fn load(
    working_dir: &Path,
    env_file: &Path,
    play_file: &Path,
    separator: char,
) -> UpsshResult<ResolvedConfig> {
    let source = SettingsSource::load(env_file)?;
    let settings = Settings::from_source(&source)?;
    resolve(&ResolveInputs {
        working_dir,
        settings: &settings,
        play_file,
        separator,
    })
}
