//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Colored, verbosity-aware printing
//! - [`prompts`] - Yes/no confirmations and text input
//!
//! # Design
//!
//! All user-facing output goes through this module so colors and quiet
//! mode are handled in one place. Diagnostics go through `tracing`
//! instead and only appear with `--debug`.

pub mod output;
pub mod prompts;
