//! changelog-gen - A CLI tool that generates a changelog from task-tagged commits.
//!
//! # Overview
//!
//! changelog-gen reads the repository history, keeps commits tagged with a
//! task prefix (e.g. `[TASK-1234]`), sorts them into Added/Fixed/Changed by
//! keyword and prepends a new release block to the changelog, leaving earlier
//! releases as they were.

pub mod changelog;
pub mod config;
pub mod error;
pub mod git;
pub mod init;
pub mod release;

// Re-export commonly used types
pub use changelog::{ReleaseCategory, TemplateContext};
pub use config::{CompiledConfig, Config};
pub use error::{ChangelogError, ConfigError, GitError, ReleaseError};
pub use git::{Commit, GitHistory, HistoryProvider};
pub use release::{GenerateOutcome, GenerateRequest, ReleaseClassification};
