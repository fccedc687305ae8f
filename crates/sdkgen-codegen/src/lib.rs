//! Client SDK generation from REST API descriptions.
//!
//! Resolves description-level schemas and operations into target-language
//! types, models and method signatures, then renders C# or Python client
//! sources through Handlebars templates.
//!
//! The pipeline for one document:
//!
//! 1. [`grouper`] partitions paths into sub-client groups
//! 2. [`signature`] builds method signatures, resolving types with [`resolver`]
//! 3. [`models`] emits component and hoisted anonymous models
//! 4. [`subclient`] renders each group through the target [`backend`]
//! 5. [`versioning`] composes documents into version modules
//! 6. [`generator`] lays the versions out into files

#![deny(unsafe_code)]
#![allow(clippy::format_push_string)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod backend;
pub mod description;
pub mod generator;
pub mod grouper;
pub mod models;
pub mod naming;
pub mod resolver;
pub mod session;
pub mod signature;
pub mod subclient;
pub mod template_engine;
pub mod types;
pub mod versioning;

pub use generator::ClientGenerator;
pub use types::{GeneratedCode, GeneratedFile};
