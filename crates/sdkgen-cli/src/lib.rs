//! sdkgen CLI library.
//!
//! Exposes the command implementations, the configuration file model, and
//! the output formatters so they can be tested without spawning the binary.

#![allow(clippy::format_push_string)]
#![allow(clippy::unnecessary_wraps)] // Commands share a `Result<ExitCode>` signature

pub mod commands;
pub mod config;
pub mod formatters;
