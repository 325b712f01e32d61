//! git::traits
//!
//! The repository capability interface.
//!
//! # Design
//!
//! The status aggregator and the remediator only see this trait. The
//! libgit2-backed [`Git`](super::Git) is the production implementation and
//! [`MockRepository`](super::mock::MockRepository) drives unit tests.
//!
//! # Example
//!
//! ```ignore
//! use gitstatus::git::{GitError, Repository};
//!
//! fn describe(repo: &dyn Repository) -> Result<String, GitError> {
//!     let branch = repo.current_branch()?;
//!     let dirty = repo.has_uncommitted_changes()?;
//!     Ok(format!("{branch} dirty={dirty}"))
//! }
//! ```

use super::GitError;
use crate::core::types::{BranchName, Oid};

/// Operations gitstatus needs from a working copy.
pub trait Repository {
    /// Name of the checked-out branch.
    ///
    /// # Errors
    ///
    /// Fails if HEAD is unborn, detached, or cannot be read.
    fn current_branch(&self) -> Result<BranchName, GitError>;

    /// Whether the index or working tree differs from HEAD.
    ///
    /// Untracked files that are not ignored count as changes.
    fn has_uncommitted_changes(&self) -> Result<bool, GitError>;

    /// Whether the current branch differs from its tracking ref.
    ///
    /// A branch without a tracking ref (never pushed) always has unpushed
    /// commits. Any difference in tips counts, even if the local branch is
    /// only behind.
    fn has_unpushed_commits(&self) -> Result<bool, GitError>;

    /// Whether `name` is in the configured protected set (exact match).
    fn is_protected_branch(&self, name: &str) -> bool;

    /// Name of the remote used for the tracking ref, push and pull.
    fn remote(&self) -> &str;

    /// Push the current branch to the remote.
    fn push(&self) -> Result<(), GitError>;

    /// Pull the current branch from the remote.
    fn pull(&self) -> Result<(), GitError>;

    /// Stage every working-tree change and commit it on HEAD.
    ///
    /// Returns the id of the new commit.
    fn commit_all(&self, message: &str) -> Result<Oid, GitError>;

    /// Create a branch at HEAD and switch to it without forcing.
    ///
    /// # Errors
    ///
    /// Fails with [`GitError::BranchExists`] if the branch already exists.
    fn create_and_checkout_branch(&self, name: &BranchName) -> Result<(), GitError>;
}
