//! Ignore rules value object
//!
//! Aggregates the exclusion patterns of a deployment: the built-in `.git`
//! rule, then `.gitignore`, then `.upssh-ignore`. A path is excluded when it
//! matches any of them (gitignore semantics, negation included).

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Version-control ignore file name
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Tool-specific ignore file name
pub const UPSSH_IGNORE_FILE: &str = ".upssh-ignore";

/// Rule that is always present
const BUILTIN_RULE: &str = ".git";

/// Maximum size of a single ignore file (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns in a single ignore file
const MAX_PATTERNS: usize = 1000;

/// One raw pattern source handed to [`IgnoreRules::compile`]
#[derive(Debug, Clone)]
pub struct PatternSource {
    /// File the patterns came from (used in error messages)
    pub origin: PathBuf,
    pub content: String,
}

/// Compiled exclusion rules.
///
/// Uses the `ignore` crate for gitignore-compatible pattern matching.
#[derive(Debug)]
pub struct IgnoreRules {
    matcher: Gitignore,
    sources: Vec<PathBuf>,
    pattern_count: usize,
}

impl IgnoreRules {
    /// Rules with only the built-in `.git` exclusion.
    pub fn builtin(root: &Path) -> Result<Self, ConfigError> {
        Self::compile(root, &[])
    }

    /// Load `.gitignore` and `.upssh-ignore` from `root` when present.
    ///
    /// A missing file is logged, never an error.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut sources = Vec::new();
        for name in [GITIGNORE_FILE, UPSSH_IGNORE_FILE] {
            let path = root.join(name);
            if !path.is_file() {
                tracing::info!("The {} file was not found", name);
                continue;
            }

            let metadata = fs::metadata(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            if metadata.len() > MAX_FILE_SIZE {
                return Err(ConfigError::IgnoreFileTooLarge {
                    path,
                    size: metadata.len(),
                    limit: MAX_FILE_SIZE,
                });
            }

            let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            tracing::info!("The {} file was added", name);
            sources.push(PatternSource {
                origin: path,
                content,
            });
        }
        Self::compile(root, &sources)
    }

    /// Compile the built-in rule followed by `sources`, in order.
    pub fn compile(root: &Path, sources: &[PatternSource]) -> Result<Self, ConfigError> {
        let mut builder = GitignoreBuilder::new(root);
        builder
            .add_line(None, BUILTIN_RULE)
            .map_err(|e| ConfigError::IgnoreBuild(e.to_string()))?;
        let mut pattern_count = 1;

        for source in sources {
            let mut file_patterns = 0;
            for (line_num, line) in source.content.lines().enumerate() {
                let trimmed = line.trim();

                // Skip empty lines and comments
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }

                file_patterns += 1;
                if file_patterns > MAX_PATTERNS {
                    return Err(ConfigError::TooManyIgnorePatterns {
                        path: source.origin.clone(),
                        count: file_patterns,
                        limit: MAX_PATTERNS,
                    });
                }

                if let Err(e) = builder.add_line(Some(source.origin.clone()), line) {
                    return Err(ConfigError::InvalidIgnorePattern {
                        path: source.origin.clone(),
                        line: line_num + 1,
                        pattern: line.to_string(),
                        message: e.to_string(),
                    });
                }
            }
            pattern_count += file_patterns;
        }

        let matcher = builder
            .build()
            .map_err(|e| ConfigError::IgnoreBuild(e.to_string()))?;

        Ok(Self {
            matcher,
            sources: sources.iter().map(|s| s.origin.clone()).collect(),
            pattern_count,
        })
    }

    /// Check a path relative to the rule root.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    /// Directories are matched by their path relative to the walk root.
    pub fn is_dir_ignored(&self, rel_path: &Path) -> bool {
        self.is_ignored(rel_path, true)
    }

    /// Files are matched by their bare name only.
    pub fn is_file_ignored(&self, name: &str) -> bool {
        self.matcher.matched(Path::new(name), false).is_ignore()
    }

    /// Files the patterns were loaded from, in load order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Number of patterns, the built-in rule included.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}
