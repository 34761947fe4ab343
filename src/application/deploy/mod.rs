//! Deploy Module
//!
//! Orchestrates one deployment run against a remote host.
//!
//! ## Structure
//!
//! - `result` - Result types (`DeployReport`, `TaskReport`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use upssh::application::deploy::DeployUseCase;
//!
//! let mut use_case = DeployUseCase::new(SshRemote::new(), rules);
//! let report = use_case.execute(&endpoint, &deployment, Utc::now())?;
//! ```

mod result;
mod use_case;

pub use result::{DeployReport, TaskReport};
pub use use_case::DeployUseCase;
