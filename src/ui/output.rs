//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output respects the quiet flag. Each line carries a [`Tone`] that picks
//! its color; colors are only emitted when the destination stream is a
//! terminal, so piped output and test captures stay plain.

use std::fmt::Display;
use std::io::IsTerminal;

use owo_colors::OwoColorize;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - standard output plus diagnostic logging
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags. Quiet wins over debug.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    pub fn is_quiet(self) -> bool {
        self == Verbosity::Quiet
    }
}

/// Semantic color of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Neutral information (blue)
    Info,
    /// Something needs attention (yellow)
    Warning,
    /// An action succeeded (green)
    Success,
    /// An error (red)
    Failure,
}

/// Render `message` in the color of `tone`, or unchanged if `color` is false.
pub fn paint(message: impl Display, tone: Tone, color: bool) -> String {
    if !color {
        return message.to_string();
    }
    match tone {
        Tone::Info => message.blue().to_string(),
        Tone::Warning => message.yellow().to_string(),
        Tone::Success => message.green().to_string(),
        Tone::Failure => message.red().to_string(),
    }
}

/// Whether stdout should receive colors.
pub fn stdout_color() -> bool {
    std::io::stdout().is_terminal()
}

/// Print a plain message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        println!("{}", message);
    }
}

/// Print a colored message to stdout (respects quiet mode).
pub fn say(message: impl Display, tone: Tone, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        println!("{}", paint(message, tone, stdout_color()));
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    say(message, Tone::Success, verbosity);
}

/// Print a red failure line to stderr (respects quiet mode).
pub fn failure(message: impl Display, verbosity: Verbosity) {
    if !verbosity.is_quiet() {
        eprintln!("{}", paint(message, Tone::Failure, std::io::stderr().is_terminal()));
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}
