//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! A [`Prompter`] owns an input and an output stream. Production code uses
//! [`Prompter::stdio`]; tests feed a byte slice and capture a `Vec<u8>`.
//!
//! Confirmation keeps asking until it reads a yes or no answer. End of
//! input is the only other way out and counts as "no", so a closed stdin
//! can never hang a run.

use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, Write};

use thiserror::Error;

use super::output::{paint, Tone};

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled: end of input")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Parse a confirmation answer.
///
/// Accepts `y`/`yes` and `n`/`no` in any case, ignoring surrounding
/// whitespace. Anything else is `None`.
///
/// ```
/// use gitstatus::ui::prompts::parse_confirmation;
///
/// assert_eq!(parse_confirmation("YES"), Some(true));
/// assert_eq!(parse_confirmation(" n\n"), Some(false));
/// assert_eq!(parse_confirmation("maybe"), None);
/// ```
pub fn parse_confirmation(response: &str) -> Option<bool> {
    match response.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Line-oriented console for questions and progress lines.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter over the process's stdin and stdout.
    pub fn stdio() -> Self {
        let output = io::stdout();
        let color = output.is_terminal();
        Self {
            input: io::stdin().lock(),
            output,
            color,
        }
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompter over arbitrary streams, without colors.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            color: false,
        }
    }

    /// Write one line in the given tone.
    pub fn say(&mut self, message: impl Display, tone: Tone) -> Result<(), PromptError> {
        writeln!(self.output, "{}", paint(message, tone, self.color))?;
        Ok(())
    }

    /// Write one uncolored line.
    pub fn line(&mut self, message: impl Display) -> Result<(), PromptError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Ask a yes/no question.
    ///
    /// Returns `Ok(true)` for yes and `Ok(false)` for no or end of input.
    /// Unrecognized answers repeat the question.
    pub fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        loop {
            write!(self.output, "{} (y/n): ", message)?;
            self.output.flush()?;

            let Some(response) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(false);
            };

            if let Some(answer) = parse_confirmation(&response) {
                return Ok(answer);
            }
        }
    }

    /// Ask for a line of text.
    ///
    /// Returns the trimmed answer. Blank answers repeat the question.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Cancelled`] at end of input.
    pub fn input(&mut self, message: &str) -> Result<String, PromptError> {
        loop {
            write!(self.output, "{}: ", message)?;
            self.output.flush()?;

            let Some(response) = self.read_line()? else {
                writeln!(self.output)?;
                return Err(PromptError::Cancelled);
            };

            let response = response.trim();
            if !response.is_empty() {
                return Ok(response.to_string());
            }
        }
    }

    /// Take back the underlying streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Read one line; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
