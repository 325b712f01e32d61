//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--interactive` / `-i`: Offer to fix what was found
//! - `--quiet` / `-q`: Minimal output

use clap::Parser;
use std::path::PathBuf;

/// gitstatus - Check a git repository for uncommitted and unpushed work
#[derive(Parser, Debug)]
#[command(name = "gitstatus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gitstatus was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Suppress all output except errors; the exit code reports the result
    #[arg(short, long)]
    pub quiet: bool,

    /// Offer to commit, push or pull when issues are found
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
