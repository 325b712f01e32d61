//! cli
//!
//! Command-line interface layer for gitstatus.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Load configuration and build the [`engine::Context`]
//! - Report the status, run the Doctor when asked, pick the exit code
//!
//! # Architecture
//!
//! The CLI layer is thin. Status comes from [`crate::engine`]; every fix
//! goes through [`crate::doctor`]. Errors from those layers are wrapped
//! with `anyhow` context here and nowhere else.

pub mod args;

pub use args::Cli;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::core::config::Config;
use crate::core::exit::ExitCode;
use crate::doctor::Doctor;
use crate::engine::{self, Context};
use crate::ui::output::{self, Tone, Verbosity};
use crate::ui::prompts::Prompter;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the exit
/// code for a completed check; `Err` means the check itself could not
/// run.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter("gitstatus=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive,
        ..Context::default()
    };

    let config = Config::load(engine::git_dir(&ctx).as_deref())
        .context("failed to load configuration")?;
    debug!(
        global = ?config.global_config_loaded_from(),
        repo = ?config.repo_config_loaded_from(),
        "config files"
    );

    let ctx = ctx.with_config(&config);
    debug!(remote = %ctx.remote, protected = ?ctx.protected_branches, "context ready");

    execute(&ctx)
}

/// Check, optionally remediate, and map the outcome to an exit code.
pub fn execute(ctx: &Context) -> Result<ExitCode> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);

    let mut status = engine::check(ctx).context("failed to check status")?;

    if !verbosity.is_quiet() {
        status.print(verbosity);
        if !status.has_issues() {
            output::print("", verbosity);
            output::success("✓ Repository is clean", verbosity);
            return Ok(ExitCode::Ok);
        }
    }

    if ctx.interactive && status.has_issues() {
        {
            let git = engine::open(ctx).context("failed to check status")?;
            let mut doctor = Doctor::new(&git, ctx.quiet, Prompter::stdio());
            doctor
                .process(&status)
                .context("failed to process interactive actions")?;
        }

        status = engine::check(ctx).context("failed to recheck status")?;

        output::print("", verbosity);
        if status.has_issues() {
            output::say("! Some issues remain unresolved", Tone::Warning, verbosity);
        } else {
            output::success("✓ All issues were resolved successfully", verbosity);
            return Ok(ExitCode::Ok);
        }
    }

    if status.error().is_err() {
        if let Some(issue) = status.blocking_issue() {
            output::failure(
                format!("Error: {}", issue.message(&status.branch)),
                verbosity,
            );
            return Ok(issue.exit_code());
        }
    }

    Ok(ExitCode::Ok)
}
