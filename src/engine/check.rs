//! engine::check
//!
//! Status aggregation.
//!
//! # Invariants
//!
//! - Checking is read-only; it never mutates the repository
//! - The predicates are queried in a fixed order and the first error wins
//! - `needs_pull` is never set; nothing is fetched

use std::path::PathBuf;

use tracing::debug;

use super::status::Status;
use super::Context;
use crate::git::{Git, GitError, Repository};

/// Directory the context points at.
fn start_dir(ctx: &Context) -> Result<PathBuf, GitError> {
    match &ctx.cwd {
        Some(cwd) => Ok(cwd.clone()),
        None => std::env::current_dir().map_err(|e| GitError::Internal {
            message: format!("failed to get working directory: {}", e),
        }),
    }
}

/// Open the repository for `ctx`, applying its remote and protected set.
///
/// # Errors
///
/// Fails if no non-bare repository contains the working directory.
pub fn open(ctx: &Context) -> Result<Git, GitError> {
    let dir = start_dir(ctx)?;
    Ok(Git::open(&dir)?
        .with_remote(ctx.remote.clone())
        .with_protected_branches(ctx.protected_branches.clone()))
}

/// Locate the git directory for `ctx`, if there is a repository.
///
/// Used to find the repository config file before a [`Context`] is
/// complete. Failures are left for [`check`] to report.
pub fn git_dir(ctx: &Context) -> Option<PathBuf> {
    let dir = start_dir(ctx).ok()?;
    Git::open(&dir).ok().map(|git| git.git_dir().to_path_buf())
}

/// Open the repository and take a [`Status`] snapshot.
///
/// The handle is dropped before returning.
pub fn check(ctx: &Context) -> Result<Status, GitError> {
    let git = open(ctx)?;
    check_with(&git)
}

/// Take a [`Status`] snapshot through any [`Repository`].
pub fn check_with(repo: &dyn Repository) -> Result<Status, GitError> {
    let branch = repo.current_branch()?;
    let is_protected = repo.is_protected_branch(branch.as_str());
    let has_uncommitted = repo.has_uncommitted_changes()?;
    let has_unpushed = repo.has_unpushed_commits()?;

    debug!(
        branch = %branch,
        is_protected,
        has_uncommitted,
        has_unpushed,
        "checked repository status"
    );

    Ok(Status {
        has_uncommitted,
        has_unpushed,
        is_protected,
        ..Status::clean(branch)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::MockRepository;

    #[test]
    fn clean_repository() {
        let repo = MockRepository::new("feature");
        let status = check_with(&repo).unwrap();
        assert_eq!(status.branch.as_str(), "feature");
        assert!(!status.has_issues());
    }

    #[test]
    fn reports_every_condition() {
        let repo = MockRepository::new("main")
            .with_protected("main")
            .with_uncommitted(true)
            .with_unpushed(true);
        let status = check_with(&repo).unwrap();
        assert!(status.is_protected);
        assert!(status.has_uncommitted);
        assert!(status.has_unpushed);
        assert!(!status.needs_pull);
    }

    #[test]
    fn protection_is_exact_match() {
        let repo = MockRepository::new("main-fix").with_protected("main");
        assert!(!check_with(&repo).unwrap().is_protected);
    }

    #[test]
    fn does_not_mutate() {
        let repo = MockRepository::new("main").with_uncommitted(true);
        check_with(&repo).unwrap();
        assert!(repo.operations().is_empty());
    }

    #[test]
    fn open_outside_repository_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let ctx = Context {
            cwd: Some(dir.path().to_path_buf()),
            ..Context::default()
        };
        assert!(matches!(check(&ctx), Err(GitError::NotARepo { .. })));
        assert_eq!(git_dir(&ctx), None);
    }
}
