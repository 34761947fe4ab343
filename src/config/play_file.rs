//! Play file (`upssh.json`)
//!
//! Declares several tasks at once plus run-level overrides:
//!
//! ```json
//! {
//!   "name": "site",
//!   "backup": "/var/backups",
//!   "rwd": "/var/www",
//!   "tasks": [{ "source": "./public", "target": "app" }]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default play file name
pub const PLAY_FILE: &str = "upssh.json";

const KNOWN_KEYS: &[&str] = &["name", "backup", "rwd", "tasks", "source", "target"];

/// Parsed play file. Every field is optional at this stage; the resolver
/// decides what is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayFile {
    /// Deployment name override
    pub name: Option<String>,
    /// Backup root override
    pub backup: Option<String>,
    /// Remote working directory for relative targets
    pub rwd: Option<String>,
    pub tasks: Option<Vec<PlayTask>>,
}

/// A task as declared
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayTask {
    pub source: Option<String>,
    pub target: Option<String>,
}

/// Non-fatal play file warning (unknown key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Path of the key as reported by the deserializer
    pub key: String,
    pub file: PathBuf,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

impl PlayFile {
    /// Read and parse a play file.
    pub fn load(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse play file content, collecting unknown keys as warnings.
    pub fn parse(path: &Path, content: &str) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        let invalid = |e: serde_json::Error| ConfigError::InvalidPlayFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let mut unknown_paths: Vec<String> = Vec::new();
        let mut deserializer = serde_json::Deserializer::from_str(content);
        let play: PlayFile = serde_ignored::deserialize(&mut deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(invalid)?;
        deserializer.end().map_err(invalid)?;

        let warnings = unknown_paths
            .into_iter()
            .map(|key| {
                let leaf = key.rsplit('.').next().unwrap_or(key.as_str()).to_string();
                ConfigWarning {
                    suggestion: suggest_key(&leaf),
                    key,
                    file: path.to_path_buf(),
                }
            })
            .collect();

        Ok((play, warnings))
    }
}

fn suggest_key(unknown: &str) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in KNOWN_KEYS {
        let dist = levenshtein(unknown, candidate);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((candidate, dist)),
        }
    }

    match best {
        Some((key, dist)) if dist > 0 && dist <= 2 => Some(key.to_string()),
        _ => None,
    }
}

/// Simple Levenshtein distance for typo detection
fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    if a_bytes.is_empty() {
        return b_bytes.len();
    }
    if b_bytes.is_empty() {
        return a_bytes.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_bytes.len() + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_bytes.len()]
}
