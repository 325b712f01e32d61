//! git::mock
//!
//! Mock repository for deterministic testing.
//!
//! # Design
//!
//! The mock answers the status predicates from scripted values, records
//! every mutating call, and can be told to fail a specific operation. It
//! never touches the filesystem.
//!
//! # Example
//!
//! ```
//! use gitstatus::git::mock::{MockOperation, MockRepository};
//! use gitstatus::git::Repository;
//!
//! let repo = MockRepository::new("main").with_uncommitted(true);
//! assert!(repo.has_uncommitted_changes().unwrap());
//!
//! repo.commit_all("fix").unwrap();
//! assert!(!repo.has_uncommitted_changes().unwrap());
//! assert_eq!(repo.operations(), vec![MockOperation::CommitAll { message: "fix".into() }]);
//! ```

use std::cell::RefCell;
use std::collections::BTreeSet;

use super::{GitError, Repository};
use crate::core::types::{BranchName, Oid};

/// Which operation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    CommitAll,
    Push,
    Pull,
    CreateBranch,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CommitAll { message: String },
    Push { remote: String, branch: String },
    Pull { remote: String, branch: String },
    CreateBranch { name: String },
}

/// In-memory [`Repository`].
///
/// Successful mutations update the scripted state the way the real
/// operation would: a commit clears uncommitted changes and creates an
/// unpushed commit, a push clears unpushed commits, a branch switch moves
/// `current_branch`.
#[derive(Debug)]
pub struct MockRepository {
    inner: RefCell<MockRepositoryInner>,
    remote: String,
    protected_branches: BTreeSet<String>,
    fail_on: Option<FailOn>,
}

#[derive(Debug)]
struct MockRepositoryInner {
    branch: String,
    uncommitted: bool,
    unpushed: bool,
    commits: u32,
    operations: Vec<MockOperation>,
}

impl MockRepository {
    /// A clean repository on `branch` with remote `origin`.
    pub fn new(branch: &str) -> Self {
        Self {
            inner: RefCell::new(MockRepositoryInner {
                branch: branch.to_string(),
                uncommitted: false,
                unpushed: false,
                commits: 0,
                operations: Vec::new(),
            }),
            remote: "origin".to_string(),
            protected_branches: BTreeSet::new(),
            fail_on: None,
        }
    }

    pub fn with_uncommitted(self, uncommitted: bool) -> Self {
        self.inner.borrow_mut().uncommitted = uncommitted;
        self
    }

    pub fn with_unpushed(self, unpushed: bool) -> Self {
        self.inner.borrow_mut().unpushed = unpushed;
        self
    }

    pub fn with_remote(mut self, remote: &str) -> Self {
        self.remote = remote.to_string();
        self
    }

    pub fn with_protected(mut self, branch: &str) -> Self {
        self.protected_branches.insert(branch.to_string());
        self
    }

    pub fn failing(mut self, op: FailOn) -> Self {
        self.fail_on = Some(op);
        self
    }

    /// Operations recorded so far, in call order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.borrow().operations.clone()
    }

    fn check_failure(&self, op: FailOn, what: &str) -> Result<(), GitError> {
        if self.fail_on == Some(op) {
            return Err(GitError::CommandFailed {
                command: what.to_string(),
                output: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<BranchName, GitError> {
        Ok(BranchName::new(self.inner.borrow().branch.as_str())?)
    }

    fn has_uncommitted_changes(&self) -> Result<bool, GitError> {
        Ok(self.inner.borrow().uncommitted)
    }

    fn has_unpushed_commits(&self) -> Result<bool, GitError> {
        Ok(self.inner.borrow().unpushed)
    }

    fn is_protected_branch(&self, name: &str) -> bool {
        self.protected_branches.contains(name)
    }

    fn remote(&self) -> &str {
        &self.remote
    }

    fn push(&self) -> Result<(), GitError> {
        let mut inner = self.inner.borrow_mut();
        let branch = inner.branch.clone();
        inner.operations.push(MockOperation::Push {
            remote: self.remote.clone(),
            branch,
        });
        self.check_failure(FailOn::Push, "git push")?;
        inner.unpushed = false;
        Ok(())
    }

    fn pull(&self) -> Result<(), GitError> {
        let mut inner = self.inner.borrow_mut();
        let branch = inner.branch.clone();
        inner.operations.push(MockOperation::Pull {
            remote: self.remote.clone(),
            branch,
        });
        self.check_failure(FailOn::Pull, "git pull")?;
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<Oid, GitError> {
        let mut inner = self.inner.borrow_mut();
        inner.operations.push(MockOperation::CommitAll {
            message: message.to_string(),
        });
        self.check_failure(FailOn::CommitAll, "commit")?;
        inner.uncommitted = false;
        inner.unpushed = true;
        inner.commits += 1;
        Ok(Oid::from_hex_unchecked(format!("{:040x}", inner.commits)))
    }

    fn create_and_checkout_branch(&self, name: &BranchName) -> Result<(), GitError> {
        let mut inner = self.inner.borrow_mut();
        inner.operations.push(MockOperation::CreateBranch {
            name: name.to_string(),
        });
        self.check_failure(FailOn::CreateBranch, "create branch")?;
        if inner.branch == name.as_str() {
            return Err(GitError::BranchExists {
                name: name.to_string(),
            });
        }
        inner.branch = name.to_string();
        inner.unpushed = true;
        Ok(())
    }
}
