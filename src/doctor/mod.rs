//! doctor
//!
//! Interactive remediation of a reported status.
//!
//! # Flow
//!
//! The Doctor walks a fixed sequence over a [`Status`] snapshot:
//!
//! 1. Protected branch: warn, nothing else
//! 2. Uncommitted changes: offer to commit everything
//! 3. Unpushed commits: offer to push
//! 4. Needs pull: offer to pull
//!
//! Every step is offered on its own; declining one does not skip the
//! next. A failed git operation stops the walk.
//!
//! # Design Principles
//!
//! - Never act without an explicit yes
//! - Show the equivalent git commands before asking
//! - Work from the snapshot; nothing is re-read mid-walk
//!
//! # Example
//!
//! ```
//! use gitstatus::doctor::Doctor;
//! use gitstatus::engine::check_with;
//! use gitstatus::git::mock::MockRepository;
//! use gitstatus::ui::prompts::Prompter;
//!
//! let repo = MockRepository::new("main").with_uncommitted(true);
//! let status = check_with(&repo).unwrap();
//!
//! let prompter = Prompter::new("y\nfix typo\n".as_bytes(), Vec::new());
//! let mut doctor = Doctor::new(&repo, false, prompter);
//! doctor.process(&status).unwrap();
//! ```

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::engine::Status;
use crate::git::{GitError, Repository};
use crate::ui::output::Tone;
use crate::ui::prompts::{PromptError, Prompter};

/// Errors from remediation.
#[derive(Debug, Error)]
pub enum DoctorError {
    /// Committing failed.
    #[error("failed to commit changes: {0}")]
    Uncommitted(#[source] GitError),

    /// Pushing failed.
    #[error("failed to push commits: {0}")]
    Unpushed(#[source] GitError),

    /// Pulling failed.
    #[error("failed to pull changes: {0}")]
    NeedsPull(#[source] GitError),

    /// The console could not be read or written.
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Walks a [`Status`] and offers fixes.
pub struct Doctor<'a, R, W> {
    repo: &'a dyn Repository,
    quiet: bool,
    prompter: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Doctor<'a, R, W> {
    /// Create a Doctor over `repo`.
    ///
    /// In quiet mode only the protected-branch warning is shown and no
    /// fix is offered.
    pub fn new(repo: &'a dyn Repository, quiet: bool, prompter: Prompter<R, W>) -> Self {
        Self {
            repo,
            quiet,
            prompter,
        }
    }

    /// Run the remediation sequence for `status`.
    ///
    /// # Errors
    ///
    /// Returns the first failing git operation, tagged with the step it
    /// belongs to, or a console error.
    pub fn process(&mut self, status: &Status) -> Result<(), DoctorError> {
        if status.is_protected {
            self.prompter.say(
                format!(
                    "⚠ Warning: You are on protected branch '{}'",
                    status.branch
                ),
                Tone::Warning,
            )?;
        }

        if self.quiet {
            return Ok(());
        }

        if status.has_uncommitted || status.has_unpushed || status.needs_pull {
            self.prompter.line("")?;
            self.prompter.say("=== Recommended Actions ===", Tone::Info)?;
        }

        if status.has_uncommitted {
            self.commit_step()?;
        }
        if status.has_unpushed {
            self.push_step(status)?;
        }
        if status.needs_pull {
            self.pull_step(status)?;
        }

        Ok(())
    }

    fn commit_step(&mut self) -> Result<(), DoctorError> {
        self.prompter.line("1. Commit your changes:")?;
        self.prompter.line("   git add .")?;
        self.prompter
            .line("   git commit -m \"your commit message\"")?;

        if !self.prompter.confirm("Would you like to commit all changes?")? {
            return Ok(());
        }

        let message = match self.prompter.input("Enter commit message") {
            Ok(message) => message,
            Err(PromptError::Cancelled) => {
                debug!("commit message prompt cancelled");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let oid = self
            .repo
            .commit_all(&message)
            .map_err(DoctorError::Uncommitted)?;
        debug!(oid = %oid, "committed changes");
        self.prompter
            .say("✓ Changes committed successfully", Tone::Success)?;
        Ok(())
    }

    fn push_step(&mut self, status: &Status) -> Result<(), DoctorError> {
        self.prompter.line("2. Push your commits:")?;
        self.prompter.line(format!(
            "   git push {} {}",
            self.repo.remote(),
            status.branch
        ))?;

        if !self.prompter.confirm("Would you like to push your commits?")? {
            return Ok(());
        }

        self.repo.push().map_err(DoctorError::Unpushed)?;
        self.prompter
            .say("✓ Commits pushed successfully", Tone::Success)?;
        Ok(())
    }

    fn pull_step(&mut self, status: &Status) -> Result<(), DoctorError> {
        self.prompter.line("3. Pull latest changes:")?;
        self.prompter.line(format!(
            "   git pull {} {}",
            self.repo.remote(),
            status.branch
        ))?;

        if !self
            .prompter
            .confirm("Would you like to pull the latest changes?")?
        {
            return Ok(());
        }

        self.repo.pull().map_err(DoctorError::NeedsPull)?;
        self.prompter
            .say("✓ Changes pulled successfully", Tone::Success)?;
        Ok(())
    }
}
