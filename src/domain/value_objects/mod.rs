//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod ignore_rules;
pub mod remote_path;

pub use ignore_rules::{IgnoreRules, PatternSource, GITIGNORE_FILE, UPSSH_IGNORE_FILE};
