//! engine::status
//!
//! The composite repository status.
//!
//! A [`Status`] is a point-in-time snapshot taken by
//! [`check`](super::check). It is never updated in place; after any fix the
//! caller takes a new one.

use thiserror::Error;

use crate::core::exit::ExitCode;
use crate::core::types::BranchName;
use crate::ui::output::{self, Tone, Verbosity};

/// Signal that the repository has pending work.
///
/// Carries no detail; the entry point asks the [`Status`] which issue to
/// report.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("repository has pending changes")]
pub struct StatusError;

/// One condition a status can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Issue {
    Protected,
    Uncommitted,
    Unpushed,
    NeedsPull,
}

impl Issue {
    /// Exit code used when this issue is the one reported.
    pub fn exit_code(self) -> ExitCode {
        match self {
            Issue::Protected => ExitCode::Protected,
            Issue::Uncommitted => ExitCode::Uncommitted,
            Issue::Unpushed => ExitCode::Unpushed,
            Issue::NeedsPull => ExitCode::NeedsPull,
        }
    }

    /// Error message for this issue.
    pub fn message(self, branch: &BranchName) -> String {
        match self {
            Issue::Protected => format!("branch '{}' is protected", branch),
            Issue::Uncommitted => "repository has uncommitted changes".to_string(),
            Issue::Unpushed => "repository has unpushed commits".to_string(),
            Issue::NeedsPull => "repository needs to be pulled".to_string(),
        }
    }
}

/// Snapshot of the repository's health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// The checked-out branch
    pub branch: BranchName,
    /// Index or working tree differs from HEAD
    pub has_uncommitted: bool,
    /// Branch differs from its tracking ref, or has none
    pub has_unpushed: bool,
    /// Branch is in the protected set
    pub is_protected: bool,
    /// Branch is behind its remote. Always false: no fetch is performed
    pub needs_pull: bool,
}

impl Status {
    /// A status with no issues on `branch`.
    pub fn clean(branch: BranchName) -> Self {
        Self {
            branch,
            has_uncommitted: false,
            has_unpushed: false,
            is_protected: false,
            needs_pull: false,
        }
    }

    /// True if any condition is set, including a protected branch.
    pub fn has_issues(&self) -> bool {
        self.has_uncommitted || self.has_unpushed || self.needs_pull || self.is_protected
    }

    /// Fails if there is pending work.
    ///
    /// Being on a protected branch alone is not pending work.
    pub fn error(&self) -> Result<(), StatusError> {
        if self.has_uncommitted || self.has_unpushed || self.needs_pull {
            return Err(StatusError);
        }
        Ok(())
    }

    /// Every set condition, in report order.
    pub fn issues(&self) -> Vec<Issue> {
        [
            (self.is_protected, Issue::Protected),
            (self.has_uncommitted, Issue::Uncommitted),
            (self.has_unpushed, Issue::Unpushed),
            (self.needs_pull, Issue::NeedsPull),
        ]
        .into_iter()
        .filter_map(|(set, issue)| set.then_some(issue))
        .collect()
    }

    /// The issue that decides the exit code: uncommitted, then unpushed,
    /// then needs-pull. None when [`Status::error`] is Ok.
    pub fn blocking_issue(&self) -> Option<Issue> {
        self.issues()
            .into_iter()
            .find(|issue| *issue != Issue::Protected)
    }

    /// Lines describing this status: the branch, then one per condition.
    pub fn report(&self) -> Vec<(Tone, String)> {
        let mut lines = vec![(Tone::Info, format!("Current branch: {}", self.branch))];

        for issue in self.issues() {
            let text = match issue {
                Issue::Protected => {
                    format!("⚠ Warning: You are on protected branch '{}'", self.branch)
                }
                Issue::Uncommitted => "⚠ You have uncommitted changes".to_string(),
                Issue::Unpushed => "⚠ You have unpushed commits".to_string(),
                Issue::NeedsPull => "⚠ Branch needs to be pulled".to_string(),
            };
            lines.push((Tone::Warning, text));
        }

        lines
    }

    /// Print [`Status::report`] to stdout.
    pub fn print(&self, verbosity: Verbosity) {
        for (tone, line) in self.report() {
            output::say(line, tone, verbosity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Status {
        Status::clean(BranchName::new("main").unwrap())
    }

    #[test]
    fn clean_status() {
        let s = status();
        assert!(!s.has_issues());
        assert!(s.error().is_ok());
        assert!(s.issues().is_empty());
        assert_eq!(s.blocking_issue(), None);
    }

    #[test]
    fn protected_alone_is_an_issue_but_not_an_error() {
        let s = Status {
            is_protected: true,
            ..status()
        };
        assert!(s.has_issues());
        assert!(s.error().is_ok());
        assert_eq!(s.issues(), vec![Issue::Protected]);
        assert_eq!(s.blocking_issue(), None);
    }

    #[test]
    fn blocking_issue_priority() {
        let s = Status {
            is_protected: true,
            has_unpushed: true,
            needs_pull: true,
            ..status()
        };
        assert_eq!(s.blocking_issue(), Some(Issue::Unpushed));

        let s = Status {
            has_uncommitted: true,
            ..s
        };
        assert_eq!(s.blocking_issue(), Some(Issue::Uncommitted));

        let s = Status {
            needs_pull: true,
            ..status()
        };
        assert_eq!(s.blocking_issue(), Some(Issue::NeedsPull));
        assert_eq!(s.error(), Err(StatusError));
    }

    #[test]
    fn issue_exit_codes_and_messages() {
        let branch = BranchName::new("main").unwrap();
        assert_eq!(Issue::Uncommitted.exit_code(), ExitCode::Uncommitted);
        assert_eq!(Issue::Unpushed.exit_code(), ExitCode::Unpushed);
        assert_eq!(Issue::NeedsPull.exit_code(), ExitCode::NeedsPull);
        assert_eq!(Issue::Protected.exit_code(), ExitCode::Protected);
        assert_eq!(
            Issue::Protected.message(&branch),
            "branch 'main' is protected"
        );
        assert_eq!(StatusError.to_string(), "repository has pending changes");
    }

    #[test]
    fn report_lists_conditions_in_order() {
        let s = Status {
            has_uncommitted: true,
            has_unpushed: true,
            is_protected: true,
            ..status()
        };
        let text: Vec<String> = s.report().into_iter().map(|(_, line)| line).collect();

        insta::assert_snapshot!(text.join("\n"), @r"
        Current branch: main
        ⚠ Warning: You are on protected branch 'main'
        ⚠ You have uncommitted changes
        ⚠ You have unpushed commits
        ");
    }

    #[test]
    fn report_tones() {
        let s = Status {
            has_unpushed: true,
            ..status()
        };
        let tones: Vec<Tone> = s.report().into_iter().map(|(tone, _)| tone).collect();
        assert_eq!(tones, vec![Tone::Info, Tone::Warning]);
    }
}
