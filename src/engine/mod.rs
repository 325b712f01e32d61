//! engine
//!
//! Takes repository status snapshots.
//!
//! # Architecture
//!
//! ```text
//! Context -> open -> Git -> check_with -> Status
//! ```
//!
//! The engine reads; it never repairs. Remediation is the Doctor's job,
//! and it always works from a [`Status`] the engine produced.
//!
//! # Example
//!
//! ```ignore
//! use gitstatus::engine::{self, Context};
//!
//! let status = engine::check(&Context::default())?;
//! if status.error().is_err() {
//!     let issue = status.blocking_issue();
//! }
//! ```

pub mod check;
pub mod status;

pub use check::{check, check_with, git_dir, open};
pub use status::{Issue, Status, StatusError};

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::config::Config;

/// Execution context for a run.
///
/// Contains settings derived from CLI flags and configuration files.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive remediation enabled.
    pub interactive: bool,
    /// Branch names treated as protected.
    pub protected_branches: BTreeSet<String>,
    /// Remote used for the tracking ref, push and pull.
    pub remote: String,
}

impl Context {
    /// Apply configured values on top of this context.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.protected_branches = config.protected_branches();
        self.remote = config.remote().to_string();
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: false,
            protected_branches: BTreeSet::new(),
            remote: "origin".to_string(),
        }
    }
}
