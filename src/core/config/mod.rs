//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! gitstatus has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values (no protected branches, remote `origin`)
//! 2. Global config file
//! 3. Repo config file
//!
//! A repo-level `protected_branches` list replaces the global list rather
//! than extending it.
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GITSTATUS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitstatus/config.toml`
//! 3. `~/.gitstatus/config.toml`
//!
//! # Repo Config Location
//!
//! `<git-dir>/gitstatus/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gitstatus::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! println!("Remote: {}", config.remote());
//! for branch in config.protected_branches() {
//!     println!("Protected: {}", branch);
//! }
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules; repo config overrides global
/// config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo with a config file)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// If `git_dir` is provided, also loads the repository config stored
    /// inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. Missing config files are not an error.
    pub fn load(git_dir: Option<&Path>) -> Result<Config, ConfigError> {
        Self::load_from(Self::find_global().as_deref(), git_dir)
    }

    /// Load configuration from an explicit global config path.
    ///
    /// `global` is used only if it exists; this is what [`Config::load`]
    /// calls after searching the standard locations.
    pub fn load_from(global: Option<&Path>, git_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let (global, global_path) = match global.filter(|p| p.exists()) {
            Some(path) => (read_config::<GlobalConfig>(path)?, Some(path.to_path_buf())),
            None => (GlobalConfig::default(), None),
        };

        let repo_file = git_dir
            .map(Self::repo_config_path)
            .filter(|p| p.exists());
        let (repo, repo_path) = match repo_file {
            Some(path) => {
                let config = read_config::<RepoConfig>(&path)?;
                config.validate()?;
                (Some(config), Some(path))
            }
            None => (None, None),
        };

        debug!(?global_path, ?repo_path, "configuration loaded");

        Ok(Config {
            global,
            repo,
            global_path,
            repo_path,
        })
    }

    /// Find the first existing global config file.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("GITSTATUS_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitstatus/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".gitstatus/config.toml"))
            .filter(|path| path.exists())
    }

    /// Get the path of the repo config file inside a `.git` directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("gitstatus/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the set of protected branch names.
    ///
    /// Defaults to an empty set if not configured.
    pub fn protected_branches(&self) -> BTreeSet<String> {
        self.repo
            .as_ref()
            .and_then(|r| r.protected_branches.as_ref())
            .or(self.global.protected_branches.as_ref())
            .map(|names| names.iter().map(|n| n.as_str().to_string()).collect())
            .unwrap_or_default()
    }

    /// Get the remote name.
    ///
    /// Defaults to "origin" if not configured.
    pub fn remote(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.remote.as_deref())
            .unwrap_or("origin")
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_repo_config(git_dir: &Path, contents: &str) {
        let path = Config::repo_config_path(git_dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn defaults_without_files() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(None, Some(temp.path())).unwrap();

        assert!(config.protected_branches().is_empty());
        assert_eq!(config.remote(), "origin");
        assert!(config.global_config_loaded_from().is_none());
        assert!(config.repo_config_loaded_from().is_none());
    }

    #[test]
    fn missing_global_path_is_ignored() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        let config = Config::load_from(Some(&missing), None).unwrap();
        assert!(config.global_config_loaded_from().is_none());
    }

    #[test]
    fn load_global() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, r#"protected_branches = ["main", "master"]"#).unwrap();

        let config = Config::load_from(Some(&path), None).unwrap();

        let expected: BTreeSet<String> = ["main", "master"].iter().map(|s| s.to_string()).collect();
        assert_eq!(config.protected_branches(), expected);
        assert_eq!(config.global_config_loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn load_repo_config() {
        let temp = TempDir::new().unwrap();
        write_repo_config(
            temp.path(),
            r#"
            protected_branches = ["develop"]
            remote = "upstream"
            "#,
        );

        let config = Config::load_from(None, Some(temp.path())).unwrap();

        assert!(config.protected_branches().contains("develop"));
        assert_eq!(config.remote(), "upstream");
    }

    #[test]
    fn repo_list_replaces_global_list() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        fs::write(&global, r#"protected_branches = ["main"]"#).unwrap();
        write_repo_config(temp.path(), r#"protected_branches = ["trunk"]"#);

        let config = Config::load_from(Some(&global), Some(temp.path())).unwrap();

        let protected = config.protected_branches();
        assert!(protected.contains("trunk"));
        assert!(!protected.contains("main"));
    }

    #[test]
    fn repo_without_list_keeps_global_list() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        fs::write(&global, r#"protected_branches = ["main"]"#).unwrap();
        write_repo_config(temp.path(), r#"remote = "fork""#);

        let config = Config::load_from(Some(&global), Some(temp.path())).unwrap();

        assert!(config.protected_branches().contains("main"));
        assert_eq!(config.remote(), "fork");
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        write_repo_config(temp.path(), "unknown_field = true");

        let result = Config::load_from(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_remote_rejected() {
        let temp = TempDir::new().unwrap();
        write_repo_config(temp.path(), r#"remote = "two words""#);

        let result = Config::load_from(None, Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }
}
