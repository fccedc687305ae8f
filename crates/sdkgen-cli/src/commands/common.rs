//! Shared helpers for command implementations.

use anyhow::{Context, Result};
use sdkgen_codegen::description::Document;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads one description document.
///
/// Files ending in `.yaml` or `.yml` are decoded as YAML, everything else
/// as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
///
/// # Examples
///
/// ```no_run
/// use sdkgen_cli::commands::common::load_description;
/// use std::path::Path;
///
/// let document = load_description(Path::new("openapi.json"))?;
/// println!("{}", document.info.title);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn load_description(path: &Path) -> Result<Document> {
    debug!("Loading description from {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read description {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml")
        });

    let document = if is_yaml {
        Document::from_yaml_str(&content)
    } else {
        Document::from_json_str(&content)
    };

    document.with_context(|| format!("failed to decode description {}", path.display()))
}

/// Loads every description in order.
///
/// # Errors
///
/// Returns the first loading error.
pub fn load_descriptions<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Document>> {
    paths.iter().map(|path| load_description(path.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JSON: &str = r#"{"info": {"title": "Widgets", "version": "v1"}, "paths": {}}"#;
    const YAML: &str = "info:\n  title: Widgets\n  version: v2\npaths: {}\n";

    #[test]
    fn test_load_json_and_yaml() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("v1.json");
        let yaml = dir.path().join("v2.YML");
        fs::write(&json, JSON).unwrap();
        fs::write(&yaml, YAML).unwrap();

        let documents = load_descriptions(&[json, yaml]).unwrap();
        assert_eq!(documents[0].info.version, "v1");
        assert_eq!(documents[1].info.version, "v2");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_description(Path::new("/nonexistent/openapi.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read description"));
    }

    #[test]
    fn test_load_invalid_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"paths\": {}}").unwrap();

        let err = load_description(&path).unwrap_err();
        assert!(err.to_string().contains("failed to decode description"));
    }
}
