//! Generate command implementation.
//!
//! Generates client SDKs from description documents. This command:
//! 1. Loads the configuration file and applies command-line overrides
//! 2. Loads every description, one per API version
//! 3. Generates the client for each requested target
//! 4. Writes the files below `<output>/<target>/`

use super::common::load_descriptions;
use crate::config::{Config, SettingsOverrides};
use crate::formatters::format_output;
use anyhow::{Context, Result, bail};
use sdkgen_codegen::GeneratedCode;
use sdkgen_core::cli::{ExitCode, OutputFormat};
use sdkgen_core::{Target, VersionId};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Inputs of the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Description files, one per API version
    pub descriptions: Vec<PathBuf>,
    /// Targets to generate
    pub targets: Vec<Target>,
    /// Output directory
    pub output: PathBuf,
    /// Optional TOML configuration file
    pub config: Option<PathBuf>,
    /// Settings overriding the configuration file
    pub overrides: SettingsOverrides,
}

/// Result of a generation run.
#[derive(Debug, Serialize)]
pub struct GenerationSummary {
    /// Root client name
    pub client_name: String,
    /// Version accessors, in description order
    pub versions: Vec<String>,
    /// One entry per target
    pub targets: Vec<TargetSummary>,
}

/// Files written for one target.
#[derive(Debug, Serialize)]
pub struct TargetSummary {
    /// Target language
    pub target: Target,
    /// Directory the files were written to
    pub output_dir: String,
    /// Written files, relative to `output_dir`
    pub files: Vec<String>,
    /// Total size in bytes
    pub total_bytes: usize,
}

/// Runs the generate command.
///
/// Nothing is written unless every target generates successfully.
///
/// # Errors
///
/// Returns an error if:
/// - No description or no target is given
/// - The configuration file or a description cannot be loaded
/// - The settings are invalid
/// - The description contains a construct the generator cannot express
/// - The output cannot be written
///
/// # Examples
///
/// ```no_run
/// use sdkgen_cli::commands::generate::{self, GenerateOptions};
/// use sdkgen_core::Target;
/// use sdkgen_core::cli::{ExitCode, OutputFormat};
/// use std::path::PathBuf;
///
/// let options = GenerateOptions {
///     descriptions: vec![PathBuf::from("openapi.json")],
///     targets: vec![Target::CSharp],
///     output: PathBuf::from("generated"),
///     ..Default::default()
/// };
///
/// let code = generate::run(options, OutputFormat::Pretty)?;
/// assert_eq!(code, ExitCode::SUCCESS);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn run(options: GenerateOptions, output_format: OutputFormat) -> Result<ExitCode> {
    let summary = generate(options)?;
    println!("{}", format_output(&summary, output_format)?);
    Ok(ExitCode::SUCCESS)
}

/// Generates and writes all targets, returning the summary.
///
/// # Errors
///
/// Same as [`run`].
pub fn generate(options: GenerateOptions) -> Result<GenerationSummary> {
    if options.descriptions.is_empty() {
        bail!("at least one description file is required");
    }
    if options.targets.is_empty() {
        bail!("at least one target is required");
    }

    let mut config = Config::load_or_default(options.config.as_deref())?;
    config.apply(options.overrides);
    let client_name = config.generator.client_name.clone();

    let documents = load_descriptions(&options.descriptions)?;
    let versions = documents
        .iter()
        .map(|document| VersionId::normalize(&document.info.version).to_string())
        .collect();

    let generator = config.into_generator()?;

    let mut generated = Vec::with_capacity(options.targets.len());
    for &target in &options.targets {
        let code = generator
            .generate(target, &documents)
            .with_context(|| format!("failed to generate {target} client"))?;
        generated.push((target, code));
    }

    let mut targets = Vec::with_capacity(generated.len());
    for (target, code) in generated {
        let output_dir = options.output.join(target.as_str());
        write_files(&output_dir, &code)?;

        info!(
            "Wrote {} {} files to {}",
            code.file_count(),
            target,
            output_dir.display()
        );

        targets.push(TargetSummary {
            target,
            output_dir: output_dir.display().to_string(),
            files: code.files().map(|file| file.path.clone()).collect(),
            total_bytes: code.total_bytes(),
        });
    }

    Ok(GenerationSummary {
        client_name,
        versions,
        targets,
    })
}

fn write_files(output_dir: &Path, code: &GeneratedCode) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    for file in code.files() {
        let path = output_dir.join(&file.path);
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdkgen_core::Capability;
    use tempfile::TempDir;

    const DESCRIPTION: &str = r#"{
        "info": {"title": "Widgets", "version": "1.0"},
        "paths": {"/widgets": {"get": {
            "tags": ["Widgets"],
            "operationId": "Widgets_GetAll",
            "responses": {"200": {"content": {"application/json": {
                "schema": {"type": "array", "items": {"type": "string"}}
            }}}}
        }}}
    }"#;

    fn options(dir: &TempDir) -> GenerateOptions {
        let description = dir.path().join("openapi.json");
        fs::write(&description, DESCRIPTION).unwrap();

        GenerateOptions {
            descriptions: vec![description],
            targets: vec![Target::CSharp, Target::Python],
            output: dir.path().join("out"),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_writes_all_targets() {
        let dir = TempDir::new().unwrap();
        let summary = generate(options(&dir)).unwrap();

        assert_eq!(summary.client_name, "Api");
        assert_eq!(summary.versions, vec!["v1_0"]);
        assert_eq!(summary.targets.len(), 2);
        assert_eq!(summary.targets[0].files, vec!["ApiClient.g.cs", "ApiClient.V1_0.g.cs"]);

        assert!(dir.path().join("out/csharp/ApiClient.V1_0.g.cs").exists());
        assert!(dir.path().join("out/python/v1_0.py").exists());
    }

    #[test]
    fn test_overrides_reach_the_output() {
        let dir = TempDir::new().unwrap();
        let mut options = options(&dir);
        options.targets = vec![Target::CSharp];
        options.overrides = SettingsOverrides {
            client_name: Some("Nexus".to_string()),
            capabilities: vec![Capability::AccessToken],
            ..Default::default()
        };

        generate(options).unwrap();

        let client = fs::read_to_string(dir.path().join("out/csharp/NexusClient.g.cs")).unwrap();
        assert!(client.contains("public void SignIn(string accessToken)"));
    }

    #[test]
    fn test_missing_inputs_are_rejected() {
        let dir = TempDir::new().unwrap();

        let mut no_targets = options(&dir);
        no_targets.targets.clear();
        assert!(generate(no_targets).is_err());

        let mut no_descriptions = options(&dir);
        no_descriptions.descriptions.clear();
        assert!(generate(no_descriptions).is_err());
    }

    #[test]
    fn test_failed_generation_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let description = dir.path().join("openapi.json");
        fs::write(
            &description,
            r#"{"info": {"version": "v1"}, "paths": {"/a": {"patch": {"tags": ["A"], "responses": {}}}}}"#,
        )
        .unwrap();

        let options = GenerateOptions {
            descriptions: vec![description],
            targets: vec![Target::CSharp],
            output: dir.path().join("out"),
            ..Default::default()
        };

        let err = generate(options).unwrap_err();
        assert!(err.to_string().contains("failed to generate csharp client"));
        assert!(!dir.path().join("out").exists());
    }
}
