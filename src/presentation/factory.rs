//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;

use crate::application::DeployUseCase;
use crate::domain::value_objects::IgnoreRules;
use crate::error::UpsshResult;
use crate::infrastructure::SshRemote;

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<SshRemote>;

/// Create a deploy use case talking SSH, with the ignore files of
/// `working_dir` loaded.
pub fn create_deploy_use_case(working_dir: &Path) -> UpsshResult<ConcreteDeployUseCase> {
    let rules = IgnoreRules::load(working_dir)?;
    tracing::debug!(
        "{} ignore patterns loaded from {} files",
        rules.pattern_count(),
        rules.sources().len()
    );
    Ok(DeployUseCase::new(SshRemote::new(), rules))
}
