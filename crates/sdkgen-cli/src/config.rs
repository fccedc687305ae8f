//! Generator configuration file.
//!
//! A TOML file holds the generator settings and the operation-naming
//! strategy. Command-line flags override values loaded from the file.
//!
//! # Examples
//!
//! ```toml
//! [generator]
//! namespace = "Nexus.Api"
//! client_name = "Nexus"
//! exception_type = "NexusException"
//! exception_code_prefix = "N"
//! configuration_header_key = "Nexus-Configuration"
//! capabilities = ["access-token", "extended-features"]
//!
//! [naming]
//! strategy = "path-table"
//!
//! [naming.table]
//! "/api/v1/catalogs" = "Catalogs"
//! "POST:/api/v1/jobs/export" = "ExportJob"
//! ```

use anyhow::{Context, Result};
use indexmap::IndexMap;
use sdkgen_codegen::ClientGenerator;
use sdkgen_codegen::naming::PathTableNaming;
use sdkgen_core::{Capability, GeneratorSettings};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generator settings
    pub generator: GeneratorSettings,

    /// Operation-naming strategy
    pub naming: NamingConfig,
}

/// Operation-naming strategy selected in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum NamingConfig {
    /// Name operations by their `operationId`
    #[default]
    OperationId,
    /// Look names up in a path table
    PathTable {
        /// `"<VERB>:<path>"` or `"<path>"` keys mapped to base names
        #[serde(default)]
        table: IndexMap<String, String>,
    },
}

/// Settings given on the command line.
///
/// `None` and empty fields keep the value loaded from the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Namespace of the generated client
    pub namespace: Option<String>,
    /// Root client name
    pub client_name: Option<String>,
    /// Exception type name
    pub exception_type: Option<String>,
    /// Exception code prefix
    pub exception_code_prefix: Option<String>,
    /// Configuration header key
    pub configuration_header_key: Option<String>,
    /// Additional capabilities
    pub capabilities: Vec<Capability>,
    /// Turn on strict body naming
    pub require_body_name: bool,
}

impl Config {
    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `path` when given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Applies command-line overrides on top of the file values.
    pub fn apply(&mut self, overrides: SettingsOverrides) {
        let settings = &mut self.generator;

        if let Some(namespace) = overrides.namespace {
            settings.namespace = namespace;
        }
        if let Some(client_name) = overrides.client_name {
            settings.client_name = client_name;
        }
        if let Some(exception_type) = overrides.exception_type {
            settings.exception_type = exception_type;
        }
        if let Some(prefix) = overrides.exception_code_prefix {
            settings.exception_code_prefix = prefix;
        }
        if let Some(key) = overrides.configuration_header_key {
            settings.configuration_header_key = key;
        }

        settings.capabilities.extend(overrides.capabilities);
        settings.require_body_name |= overrides.require_body_name;
    }

    /// Creates a generator for these settings and naming strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn into_generator(self) -> Result<ClientGenerator<'static>> {
        let generator = match self.naming {
            NamingConfig::OperationId => ClientGenerator::new(self.generator),
            NamingConfig::PathTable { table } => {
                ClientGenerator::with_naming(self.generator, PathTableNaming::from(table))
            }
        };

        generator.context("invalid generator settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.generator.client_name, "Api");
        assert_eq!(config.naming, NamingConfig::OperationId);
    }

    #[test]
    fn test_parse_generator_section() {
        let config = Config::parse(
            r#"
            [generator]
            client_name = "Nexus"
            exception_code_prefix = "N"
            configuration_header_key = "Nexus-Configuration"
            capabilities = ["access-token", "extended-features"]
            "#,
        )
        .unwrap();

        let settings = &config.generator;
        assert_eq!(settings.client_name, "Nexus");
        assert_eq!(settings.exception_code_prefix, "N");
        assert_eq!(settings.namespace, "Api.Client");
        assert!(settings.has(Capability::AccessToken));
        assert!(settings.has(Capability::ExtendedFeatures));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_path_table() {
        let config = Config::parse(
            r#"
            [naming]
            strategy = "path-table"

            [naming.table]
            "/widgets" = "Widgets"
            "POST:/widgets" = "Widget"
            "#,
        )
        .unwrap();

        let NamingConfig::PathTable { table } = config.naming else {
            panic!("expected path table");
        };
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_index(0).map(|(k, _)| k.as_str()), Some("/widgets"));
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        assert!(Config::parse("[naming]\nstrategy = \"guess\"\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::parse("[generator]\nclient_name = \"Nexus\"\nnamespace = \"Nexus.Api\"\n").unwrap();

        config.apply(SettingsOverrides {
            client_name: Some("Acme".to_string()),
            capabilities: vec![Capability::AccessToken],
            require_body_name: true,
            ..Default::default()
        });

        assert_eq!(config.generator.client_name, "Acme");
        assert_eq!(config.generator.namespace, "Nexus.Api");
        assert!(config.generator.has(Capability::AccessToken));
        assert!(config.generator.require_body_name);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[generator]\nexception_type = \"NexusException\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.generator.exception_type, "NexusException");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/sdkgen.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_invalid_settings_fail_generator_creation() {
        let mut config = Config::default();
        config.apply(SettingsOverrides {
            capabilities: vec![Capability::RefreshToken],
            ..Default::default()
        });

        assert!(config.into_generator().is_err());
    }
}
