//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$GITSTATUS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitstatus/config.toml`
//! 3. `~/.gitstatus/config.toml`
//!
//! # Repo Config
//!
//! Located at `<git-dir>/gitstatus/config.toml`.
//!
//! # Validation
//!
//! Protected branch names are validated while parsing (they deserialize
//! into [`BranchName`]); the remote name is validated after parsing.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::BranchName;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// protected_branches = ["main", "master"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Branches that should not receive direct work
    pub protected_branches: Option<Vec<BranchName>>,
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// protected_branches = ["main", "release"]
/// remote = "upstream"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Branches that should not receive direct work; replaces the global list
    pub protected_branches: Option<Vec<BranchName>>,

    /// Remote used for the tracking ref, push and pull (default: "origin")
    pub remote: Option<String>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the remote name is empty or
    /// contains whitespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = &self.remote {
            if remote.is_empty() || remote.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid remote '{}', must be a non-empty name without whitespace",
                    remote
                )));
            }
        }
        Ok(())
    }
}
