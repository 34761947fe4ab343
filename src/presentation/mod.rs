//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Rendering the end-of-run summary
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Summary, error and warning rendering

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::Cli;
pub use factory::create_deploy_use_case;
pub use output::TextRenderer;
