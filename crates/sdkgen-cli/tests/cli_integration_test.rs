//! Integration tests for the CLI generation workflow.

use sdkgen_cli::commands::generate::{self, GenerateOptions};
use sdkgen_cli::commands::inspect;
use sdkgen_cli::config::SettingsOverrides;
use sdkgen_core::Target;
use sdkgen_core::cli::{ExitCode, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const V1_JSON: &str = r##"{
    "openapi": "3.0.1",
    "info": {"title": "Nexus REST API", "version": "v1"},
    "paths": {
        "/api/v1/jobs/{jobId}": {
            "get": {
                "tags": ["Jobs"],
                "parameters": [{"name": "jobId", "in": "path", "required": true, "schema": {"type": "string", "format": "guid"}}],
                "responses": {"200": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/Job"}}}}}
            },
            "delete": {
                "tags": ["Jobs"],
                "parameters": [{"name": "jobId", "in": "path", "required": true, "schema": {"type": "string", "format": "guid"}}],
                "responses": {"200": {}}
            }
        }
    },
    "components": {"schemas": {
        "Job": {"type": "object", "properties": {"id": {"type": "string", "format": "guid"}, "owner": {"type": "string"}}}
    }}
}"##;

const V2_YAML: &str = r#"
openapi: 3.0.1
info:
  title: Nexus REST API
  version: "2.0"
paths:
  /api/v2/jobs/{jobId}:
    get:
      tags: [Jobs]
      parameters:
        - name: jobId
          in: path
          required: true
          schema:
            type: string
      responses:
        "200":
          content:
            application/octet-stream: {}
"#;

const CONFIG: &str = r#"
[generator]
namespace = "Nexus.Api"
client_name = "Nexus"
exception_type = "NexusException"
exception_code_prefix = "N"

[naming]
strategy = "path-table"

[naming.table]
"/api/v1/jobs/{jobId}" = "Job"
"DELETE:/api/v1/jobs/{jobId}" = "Job"
"/api/v2/jobs/{jobId}" = "JobStream"
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn options(dir: &TempDir) -> GenerateOptions {
    GenerateOptions {
        descriptions: vec![
            write(dir.path(), "v1.json", V1_JSON),
            write(dir.path(), "v2.yaml", V2_YAML),
        ],
        targets: vec![Target::CSharp, Target::Python],
        output: dir.path().join("generated"),
        config: Some(write(dir.path(), "sdkgen.toml", CONFIG)),
        overrides: SettingsOverrides::default(),
    }
}

/// Tests the full run with a config file, path-table naming and two versions.
#[test]
fn test_generate_from_config() {
    let dir = TempDir::new().unwrap();
    let summary = generate::generate(options(&dir)).unwrap();

    assert_eq!(summary.client_name, "Nexus");
    assert_eq!(summary.versions, vec!["v1", "v2_0"]);

    let csharp = dir.path().join("generated/csharp");
    let v1 = fs::read_to_string(csharp.join("NexusClient.V1.g.cs")).unwrap();
    assert!(v1.contains("namespace Nexus.Api.V1;"));
    assert!(v1.contains("Job GetJob(Guid jobId);"));
    assert!(v1.contains("void DeleteJob(Guid jobId);"));

    let v2 = fs::read_to_string(csharp.join("NexusClient.V2_0.g.cs")).unwrap();
    assert!(v2.contains("HttpResponseMessage GetJobStream(string jobId);"));

    let python = dir.path().join("generated/python");
    for file in ["_shared.py", "_client.py", "v1.py", "v2_0.py", "__init__.py"] {
        assert!(python.join(file).exists(), "missing {file}");
    }
}

/// Tests that command-line flags override the config file.
#[test]
fn test_flags_override_config() {
    let dir = TempDir::new().unwrap();
    let mut options = options(&dir);
    options.targets = vec![Target::Python];
    options.overrides.exception_type = Some("JobsError".to_string());

    generate::generate(options).unwrap();

    let shared = fs::read_to_string(dir.path().join("generated/python/_shared.py")).unwrap();
    assert!(shared.contains("class JobsError(Exception):"));
}

/// Tests that a naming table without an entry for a path aborts the run.
#[test]
fn test_incomplete_naming_table_fails() {
    let dir = TempDir::new().unwrap();
    let mut options = options(&dir);
    options.config = Some(write(
        dir.path(),
        "sdkgen.toml",
        "[naming]\nstrategy = \"path-table\"\n",
    ));

    let err = generate::generate(options).unwrap_err();
    assert!(format!("{err:#}").contains("naming table"));
    assert!(!dir.path().join("generated").exists());
}

/// Tests the exit code of a successful run with each output format.
#[test]
fn test_run_exit_codes() {
    for format in [OutputFormat::Json, OutputFormat::Text, OutputFormat::Pretty] {
        let dir = TempDir::new().unwrap();
        let code = generate::run(options(&dir), format).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
}

/// Tests the inspect command on a YAML description.
#[test]
fn test_inspect_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "v2.yml", V2_YAML);

    let code = inspect::run(&path, OutputFormat::Json).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}
