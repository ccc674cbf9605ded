//! CLI command implementations.
//!
//! - **analyze**: conflict and regression report for a deployment export
//! - **developer**: per-story deployment plan for one developer or all of them
//! - **init**: write a starter `.conflictmap.toml`
//!
//! Commands share input preparation (config, files, evaluation instant)
//! through [`prepare`].

pub mod analyze;
pub mod developer;
pub mod init;
pub mod prepare;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use developer::{handle_developer, DeveloperConfig, DeveloperTarget};
pub use init::init_config;
