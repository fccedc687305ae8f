//! Inspect command implementation.
//!
//! Shows how a description will be split into sub-clients without
//! generating any code.

use super::common::load_description;
use crate::formatters::format_output;
use anyhow::{Context, Result};
use sdkgen_codegen::description::Document;
use sdkgen_codegen::grouper;
use sdkgen_core::VersionId;
use sdkgen_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Structure of one description.
#[derive(Debug, Serialize)]
pub struct DescriptionReport {
    /// API title
    pub title: String,
    /// Version accessor the description maps to
    pub version: String,
    /// Sub-client groups in document order
    pub groups: Vec<GroupReport>,
    /// Number of component schemas
    pub component_count: usize,
}

/// One sub-client group.
#[derive(Debug, Serialize)]
pub struct GroupReport {
    /// Group name
    pub name: String,
    /// Operations in document order
    pub operations: Vec<OperationReport>,
}

/// One operation of a group.
#[derive(Debug, Serialize)]
pub struct OperationReport {
    /// HTTP verb as written in the description
    pub verb: String,
    /// Path template
    pub path: String,
    /// Declared `operationId`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

/// Runs the inspect command.
///
/// # Errors
///
/// Returns an error if the description cannot be loaded or grouped.
pub fn run(description: &Path, output_format: OutputFormat) -> Result<ExitCode> {
    let document = load_description(description)?;
    let report = inspect(&document)
        .with_context(|| format!("failed to inspect {}", description.display()))?;

    info!(
        "Found {} groups in {}",
        report.groups.len(),
        description.display()
    );

    println!("{}", format_output(&report, output_format)?);
    Ok(ExitCode::SUCCESS)
}

/// Builds the report for one description.
///
/// # Errors
///
/// Returns an error if a path cannot be grouped.
pub fn inspect(document: &Document) -> Result<DescriptionReport> {
    let groups = grouper::group(&document.paths)?
        .into_iter()
        .map(|group| GroupReport {
            operations: group
                .paths
                .iter()
                .flat_map(|(path, item)| {
                    item.operations.iter().map(move |(verb, operation)| OperationReport {
                        verb: verb.to_uppercase(),
                        path: (*path).to_string(),
                        operation_id: operation.operation_id.clone(),
                    })
                })
                .collect(),
            name: group.name,
        })
        .collect();

    Ok(DescriptionReport {
        title: document.info.title.clone(),
        version: VersionId::normalize(&document.info.version).to_string(),
        groups,
        component_count: document.components.schemas.len(),
    })
}
