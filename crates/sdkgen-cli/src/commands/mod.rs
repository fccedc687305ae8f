//! Command implementations for the sdkgen CLI.
//!
//! Each command module loads its inputs, runs the operation, and formats
//! output according to the requested format.

pub mod common;
pub mod completions;
pub mod generate;
pub mod inspect;
