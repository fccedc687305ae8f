//! Core types, settings, and errors for REST client SDK generation.
//!
//! This crate provides the foundational types shared by the code generator
//! and the command-line front end.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`HttpMethod`, `MediaType`, `VersionId`, `Target`)
//! - Error hierarchy with contextual information
//! - Generator settings with an explicit capability set
//! - CLI helper types (`cli` module)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
mod config;
mod error;
mod types;

pub use config::{Capability, CapabilitySet, GeneratorSettings, GeneratorSettingsBuilder};
pub use error::{Error, Result};
pub use types::{HttpMethod, MediaType, Target, VersionId};
