//! git::interface
//!
//! Git interface implementation using git2.
//!
//! Reads (HEAD, status, refs) and local writes (commit, branch creation) go
//! through libgit2. Push and pull shell out to the `git` executable so that
//! the user's credential helpers, SSH agent and merge configuration apply.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::UnbornHead`] / [`GitError::DetachedHead`]: HEAD does not name a branch
//! - [`GitError::BranchExists`]: Branch creation target already exists
//! - [`GitError::CommandFailed`]: A `git` subprocess failed
//!
//! # Example
//!
//! ```ignore
//! use gitstatus::git::{Git, Repository};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?.with_remote("origin");
//! if git.has_unpushed_commits()? {
//!     git.push()?;
//! }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use super::Repository;
use crate::core::types::{BranchName, Oid, TypeError};

/// Author and committer name used by [`Git::commit_all`].
pub const COMMIT_AUTHOR_NAME: &str = "Git Status Checker";

/// Author and committer email used by [`Git::commit_all`].
pub const COMMIT_AUTHOR_EMAIL: &str = "gitstatus@local";

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("failed to open repository: not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("failed to open repository: bare repository not supported")]
    BareRepo,

    /// HEAD points at a branch with no commits yet.
    #[error("failed to get HEAD: current branch has no commits yet")]
    UnbornHead,

    /// HEAD is not on a branch.
    #[error("failed to get HEAD: HEAD is detached")]
    DetachedHead,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Branch to create already exists.
    #[error("failed to create branch {name}: branch already exists")]
    BranchExists {
        /// The branch name
        name: String,
    },

    /// Invalid branch name.
    #[error("{message}")]
    InvalidBranchName {
        /// Description of the problem
        message: String,
    },

    /// A `git` subprocess could not be started or exited unsuccessfully.
    #[error("git command failed: {command}: {output}")]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Combined stdout and stderr, or the spawn error
        output: String,
    },

    /// Internal git2 error.
    #[error("{message}")]
    Internal {
        /// The error message, prefixed with the failing step
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with context naming the failing step.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound if context.starts_with("refs/") => GitError::RefNotFound {
                refname: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::Internal {
                message: format!("{}: repository is locked: {}", context, err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        GitError::InvalidBranchName {
            message: err.to_string(),
        }
    }
}

impl From<git2::Oid> for Oid {
    fn from(oid: git2::Oid) -> Self {
        // Display renders the full-length lowercase hex id.
        Oid::from_hex_unchecked(oid.to_string())
    }
}

/// Summary of working tree status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeStatus {
    /// Number of staged changes
    pub staged: usize,
    /// Number of unstaged changes to tracked files
    pub unstaged: usize,
    /// Number of untracked files (if requested)
    pub untracked: usize,
    /// Whether there are unresolved conflicts
    pub has_conflicts: bool,
}

impl WorktreeStatus {
    /// Check if the worktree has no changes at all.
    ///
    /// Untracked files only count when they were requested.
    pub fn is_clean(&self) -> bool {
        self.staged == 0 && self.unstaged == 0 && self.untracked == 0 && !self.has_conflicts
    }
}

/// Full name of the tracking ref for `branch` on `remote`.
///
/// ```
/// use gitstatus::core::types::BranchName;
/// use gitstatus::git::tracking_ref;
///
/// let main = BranchName::new("main").unwrap();
/// assert_eq!(tracking_ref("origin", &main), "refs/remotes/origin/main");
/// ```
pub fn tracking_ref(remote: &str, branch: &BranchName) -> String {
    format!("refs/remotes/{}/{}", remote, branch)
}

/// The libgit2-backed repository.
///
/// Holds the remote name and protected-branch set it was configured with;
/// both are fixed for the lifetime of the handle.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
    /// Remote used for tracking refs, push and pull
    remote: String,
    /// Exact branch names that count as protected
    protected_branches: BTreeSet<String>,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .field("remote", &self.remote)
            .field("protected_branches", &self.protected_branches)
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the working tree. The remote defaults to `origin` and the
    /// protected set starts empty.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        debug!(git_dir = %repo.path().display(), "opened repository");

        Ok(Self {
            repo,
            remote: "origin".to_string(),
            protected_branches: BTreeSet::new(),
        })
    }

    /// Use `remote` instead of `origin`.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Treat the given branch names as protected.
    pub fn with_protected_branches(mut self, branches: BTreeSet<String>) -> Self {
        self.protected_branches = branches;
        self
    }

    /// Get the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    // =========================================================================
    // Working Tree Status
    // =========================================================================

    /// Get working tree status summary.
    ///
    /// If `include_untracked` is false, untracked files are not counted.
    /// Ignored files are never counted.
    pub fn worktree_status(&self, include_untracked: bool) -> Result<WorktreeStatus, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(include_untracked)
            .recurse_untracked_dirs(include_untracked)
            .include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, "failed to get status"))?;

        let mut result = WorktreeStatus::default();

        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_conflicted() {
                result.has_conflicts = true;
            }

            if status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange()
            {
                result.staged += 1;
            }

            if status.is_wt_modified()
                || status.is_wt_deleted()
                || status.is_wt_renamed()
                || status.is_wt_typechange()
            {
                result.unstaged += 1;
            }

            if status.is_wt_new() {
                result.untracked += 1;
            }
        }

        Ok(result)
    }

    // =========================================================================
    // Ref Resolution
    // =========================================================================

    /// Resolve a ref to the commit it points at, returning None if it
    /// doesn't exist.
    pub fn try_resolve_ref(&self, refname: &str) -> Result<Option<Oid>, GitError> {
        let reference = match self.repo.find_reference(refname) {
            Ok(r) => r,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(GitError::from_git2(e, refname)),
        };

        let commit = reference
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, refname))?;

        Ok(Some(commit.id().into()))
    }

    /// Get HEAD commit OID.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnbornHead`] if the current branch has no commits
    pub fn head_oid(&self) -> Result<Oid, GitError> {
        let commit = self.head_commit()?.ok_or(GitError::UnbornHead)?;
        Ok(commit.id().into())
    }

    /// The commit HEAD points at, or None on an unborn branch.
    fn head_commit(&self) -> Result<Option<git2::Commit<'_>>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(GitError::from_git2(e, "failed to get HEAD")),
        };

        head.peel_to_commit()
            .map(Some)
            .map_err(|e| GitError::from_git2(e, "failed to get HEAD"))
    }

    // =========================================================================
    // Subprocess
    // =========================================================================

    /// Run `git` with `args` in the working directory, capturing output.
    fn run_git(&self, args: &[&str]) -> Result<(), GitError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(self.work_dir()?)
            .output()
            .map_err(|e| GitError::CommandFailed {
                command: command.clone(),
                output: e.to_string(),
            })?;

        if !output.status.success() {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(GitError::CommandFailed {
                command,
                output: text.trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Repository for Git {
    fn current_branch(&self) -> Result<BranchName, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                return Err(GitError::UnbornHead)
            }
            Err(e) => return Err(GitError::from_git2(e, "failed to get HEAD")),
        };

        if !head.is_branch() {
            return Err(GitError::DetachedHead);
        }

        let name = head.shorthand().ok_or_else(|| GitError::Internal {
            message: "failed to get HEAD: branch name is not valid UTF-8".to_string(),
        })?;

        Ok(BranchName::new(name)?)
    }

    fn has_uncommitted_changes(&self) -> Result<bool, GitError> {
        let status = self.worktree_status(true)?;
        debug!(?status, "worktree status");
        Ok(!status.is_clean())
    }

    fn has_unpushed_commits(&self) -> Result<bool, GitError> {
        let branch = self.current_branch()?;
        let local = self.head_oid()?;
        let tracking = tracking_ref(&self.remote, &branch);

        match self.try_resolve_ref(&tracking)? {
            None => {
                debug!(%tracking, "no tracking ref; branch was never pushed");
                Ok(true)
            }
            Some(remote_tip) => {
                debug!(%tracking, local = %local.short(7), remote = %remote_tip.short(7), "compared tips");
                Ok(remote_tip != local)
            }
        }
    }

    fn is_protected_branch(&self, name: &str) -> bool {
        self.protected_branches.contains(name)
    }

    fn remote(&self) -> &str {
        &self.remote
    }

    fn push(&self) -> Result<(), GitError> {
        let branch = self.current_branch()?;
        self.run_git(&["push", self.remote.as_str(), branch.as_str()])
    }

    fn pull(&self) -> Result<(), GitError> {
        let branch = self.current_branch()?;
        self.run_git(&["pull", self.remote.as_str(), branch.as_str()])
    }

    fn commit_all(&self, message: &str) -> Result<Oid, GitError> {
        let stage = |e| GitError::from_git2(e, "failed to stage changes");

        let mut index = self.repo.index().map_err(stage)?;
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .map_err(stage)?;
        // add_all does not record deletions of tracked files
        index.update_all(["*"].iter(), None).map_err(stage)?;
        index.write().map_err(stage)?;

        let commit_err = |e| GitError::from_git2(e, "failed to commit changes");

        let tree_id = index.write_tree().map_err(commit_err)?;
        let tree = self.repo.find_tree(tree_id).map_err(commit_err)?;
        let signature =
            git2::Signature::now(COMMIT_AUTHOR_NAME, COMMIT_AUTHOR_EMAIL).map_err(commit_err)?;

        let parent = self.head_commit()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(commit_err)?;

        debug!(oid = %oid, "created commit");
        Ok(oid.into())
    }

    fn create_and_checkout_branch(&self, name: &BranchName) -> Result<(), GitError> {
        let commit = self.head_commit()?.ok_or(GitError::UnbornHead)?;
        let refname = format!("refs/heads/{}", name);

        let mut branch = self
            .repo
            .branch(name.as_str(), &commit, false)
            .map_err(|e| match e.code() {
                git2::ErrorCode::Exists => GitError::BranchExists {
                    name: name.to_string(),
                },
                _ => GitError::from_git2(e, &format!("failed to create branch {}", name)),
            })?;

        let switched = (|| -> Result<(), git2::Error> {
            let mut checkout = git2::build::CheckoutBuilder::new();
            checkout.safe();
            self.repo
                .checkout_tree(commit.as_object(), Some(&mut checkout))?;
            self.repo.set_head(&refname)
        })();

        if let Err(e) = switched {
            // Leave no half-created branch behind.
            if let Err(delete_err) = branch.delete() {
                debug!(branch = %name, error = %delete_err, "failed to remove branch after checkout error");
            }
            return Err(GitError::from_git2(
                e,
                &format!("failed to checkout branch {}", name),
            ));
        }

        debug!(branch = %name, "created and checked out branch");
        Ok(())
    }
}
