//! Property-based tests for status invariants and answer parsing.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use gitstatus::core::exit::ExitCode;
use gitstatus::core::types::BranchName;
use gitstatus::engine::{Issue, Status};
use gitstatus::ui::prompts::parse_confirmation;

/// Strategy for generating statuses with arbitrary flags.
fn any_status() -> impl Strategy<Value = Status> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(has_uncommitted, has_unpushed, is_protected, needs_pull)| Status {
            branch: BranchName::new("main").unwrap(),
            has_uncommitted,
            has_unpushed,
            is_protected,
            needs_pull,
        },
    )
}

proptest! {
    #[test]
    fn has_issues_is_any_flag(status in any_status()) {
        prop_assert_eq!(
            status.has_issues(),
            status.has_uncommitted || status.has_unpushed || status.needs_pull || status.is_protected
        );
        prop_assert_eq!(status.has_issues(), !status.issues().is_empty());
    }

    #[test]
    fn protected_never_causes_error(status in any_status()) {
        let pending = status.has_uncommitted || status.has_unpushed || status.needs_pull;
        prop_assert_eq!(status.error().is_err(), pending);
        prop_assert_eq!(status.blocking_issue().is_some(), pending);
    }

    #[test]
    fn blocking_issue_follows_priority(status in any_status()) {
        let expected = if status.has_uncommitted {
            Some(Issue::Uncommitted)
        } else if status.has_unpushed {
            Some(Issue::Unpushed)
        } else if status.needs_pull {
            Some(Issue::NeedsPull)
        } else {
            None
        };
        prop_assert_eq!(status.blocking_issue(), expected);
    }

    #[test]
    fn blocking_exit_code_is_never_success(status in any_status()) {
        if let Some(issue) = status.blocking_issue() {
            prop_assert!(!issue.exit_code().is_success());
            prop_assert_ne!(issue.exit_code(), ExitCode::Error);
        }
    }

    #[test]
    fn report_has_one_line_per_issue(status in any_status()) {
        prop_assert_eq!(status.report().len(), 1 + status.issues().len());
    }

    #[test]
    fn confirmation_ignores_case_and_padding(
        word in prop_oneof![Just("y"), Just("yes"), Just("n"), Just("no")],
        upper in any::<bool>(),
        pad in "[ \t]{0,3}",
    ) {
        let word = if upper { word.to_uppercase() } else { word.to_string() };
        let answer = format!("{pad}{word}{pad}\n");
        prop_assert_eq!(parse_confirmation(&answer), Some(word.to_lowercase().starts_with('y')));
    }

    #[test]
    fn confirmation_rejects_other_words(word in "[a-z]{1,8}") {
        prop_assume!(!["y", "yes", "n", "no"].contains(&word.as_str()));
        prop_assert_eq!(parse_confirmation(&word), None);
    }
}
