//! core::exit
//!
//! Process exit codes.
//!
//! One table is used for every outcome of a run. A clean repository, a
//! repository whose issues were resolved interactively, and a repository
//! whose only issue is being on a protected branch all exit with
//! [`ExitCode::Ok`].

/// Exit code reported by the `gitstatus` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExitCode {
    /// Clean, or every blocking issue was resolved.
    Ok = 0,
    /// Generic or internal error (repository could not be read, a fix failed).
    Error = 1,
    /// Uncommitted changes remain.
    Uncommitted = 2,
    /// Unpushed commits remain.
    Unpushed = 3,
    /// The branch needs to be pulled.
    NeedsPull = 4,
    /// The current branch is protected. Reserved: a protected branch on its
    /// own does not fail a run.
    Protected = 5,
}

impl ExitCode {
    /// Numeric value passed to the operating system.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this code reports success.
    pub fn is_success(self) -> bool {
        self == ExitCode::Ok
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}
