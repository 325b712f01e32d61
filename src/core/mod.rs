//! core
//!
//! Core domain types and configuration for gitstatus.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, Oid
//! - [`exit`] - The canonical exit-code table
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Config schemas are strict; unknown keys are rejected

pub mod config;
pub mod exit;
pub mod types;
