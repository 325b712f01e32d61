//! git
//!
//! Repository access for gitstatus.
//!
//! # Architecture
//!
//! Everything above this module talks to a working copy through the
//! [`Repository`] trait. No other module imports `git2`.
//!
//! - [`Git`] - libgit2-backed implementation; push and pull run the `git`
//!   executable
//! - [`mock::MockRepository`] - in-memory implementation for tests
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Current branch, working tree status, tracking-ref comparison
//! - Commit, push, pull and branch creation
//!
//! # Example
//!
//! ```ignore
//! use gitstatus::git::{Git, Repository};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! println!("on {}", git.current_branch()?);
//! println!("dirty: {}", git.has_uncommitted_changes()?);
//! ```

mod interface;
pub mod mock;
mod traits;

pub use interface::{
    tracking_ref, Git, GitError, WorktreeStatus, COMMIT_AUTHOR_EMAIL, COMMIT_AUTHOR_NAME,
};
pub use traits::Repository;
