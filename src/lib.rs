//! gitstatus - repository hygiene checker
//!
//! gitstatus inspects a Git working copy and reports uncommitted changes,
//! unpushed commits and protected-branch violations. With `--interactive`
//! it walks the user through fixing each issue, then checks again.
//!
//! # Architecture
//!
//! - [`cli`] - Argument parsing and the check / fix / re-check flow
//! - [`engine`] - Execution context and the status aggregator
//! - [`doctor`] - Interactive remediation of reported issues
//! - [`core`] - Domain types, exit codes and configuration files
//! - [`git`] - The repository capability trait and its implementations
//! - [`ui`] - Console output and prompts
//!
//! # Invariants
//!
//! 1. A [`engine::Status`] is a snapshot; it is never mutated after a check
//! 2. The remediator only acts through the [`git::Repository`] trait
//! 3. Exit codes come from a single table, [`core::exit::ExitCode`]

pub mod cli;
pub mod core;
pub mod doctor;
pub mod engine;
pub mod git;
pub mod ui;
