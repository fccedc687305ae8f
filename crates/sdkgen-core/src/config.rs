//! Generator settings.
//!
//! Settings name the generated client, its exception type, and the optional
//! contract sections a backend emits. Optional sections are selected through
//! an explicit [`CapabilitySet`] instead of loose boolean flags.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::{Capability, GeneratorSettings};
//!
//! let settings = GeneratorSettings::builder()
//!     .namespace("Acme.Api")
//!     .client_name("Acme")
//!     .capability(Capability::AccessToken)
//!     .build();
//!
//! assert!(settings.validate().is_ok());
//! assert!(settings.capabilities.contains(Capability::AccessToken));
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Optional contract section of a generated client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Retry once with a refreshed access token after a 401 response.
    ///
    /// Requires [`Capability::AccessToken`].
    RefreshToken,
    /// Bearer token sign-in on the root client.
    AccessToken,
    /// Request streaming responses when running on WebAssembly.
    WebAssemblyStreaming,
    /// Attach and clear base64-encoded configuration headers.
    ///
    /// Requires a configuration header key.
    ExtendedFeatures,
}

impl Capability {
    /// Returns the kebab-case name used in configuration files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RefreshToken => "refresh-token",
            Self::AccessToken => "access-token",
            Self::WebAssemblyStreaming => "web-assembly-streaming",
            Self::ExtendedFeatures => "extended-features",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "refresh-token" => Ok(Self::RefreshToken),
            "access-token" => Ok(Self::AccessToken),
            "web-assembly-streaming" | "webassembly-streaming" => Ok(Self::WebAssemblyStreaming),
            "extended-features" => Ok(Self::ExtendedFeatures),
            _ => Err(Error::InvalidArgument(format!(
                "invalid capability: '{s}' (expected: refresh-token, access-token, \
                 web-assembly-streaming, or extended-features)"
            ))),
        }
    }
}

/// Ordered set of enabled capabilities.
///
/// # Examples
///
/// ```
/// use sdkgen_core::{Capability, CapabilitySet};
///
/// let set: CapabilitySet = [Capability::ExtendedFeatures, Capability::AccessToken]
///     .into_iter()
///     .collect();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.iter().next(), Some(Capability::AccessToken));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Enables a capability. Returns `false` if it was already enabled.
    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    /// Returns `true` if the capability is enabled.
    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Returns the number of enabled capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no capability is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates enabled capabilities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Capability> for CapabilitySet {
    fn extend<I: IntoIterator<Item = Capability>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Settings consumed by every backend during one generation pass.
///
/// The operation naming strategy is not part of the settings; it is
/// injected separately because it is caller policy rather than data.
///
/// # Examples
///
/// ```
/// use sdkgen_core::GeneratorSettings;
///
/// let settings = GeneratorSettings {
///     client_name: "Nexus".to_string(),
///     exception_type: "NexusException".to_string(),
///     ..Default::default()
/// };
///
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Namespace (C#) of the generated client.
    ///
    /// Default: `"Api.Client"`
    pub namespace: String,

    /// Root client type name without the `Client` suffix.
    ///
    /// Default: `"Api"`
    pub client_name: String,

    /// Name of the exception type raised by generated clients.
    ///
    /// Default: `"ApiException"`
    pub exception_type: String,

    /// Prefix of the status codes carried by the exception type.
    ///
    /// Default: `"E"`
    pub exception_code_prefix: String,

    /// Header used to attach configuration data.
    ///
    /// Only consulted when [`Capability::ExtendedFeatures`] is enabled.
    /// Default: empty
    pub configuration_header_key: String,

    /// Enabled optional contract sections.
    pub capabilities: CapabilitySet,

    /// Reject request bodies without an `x-name` extension.
    ///
    /// When disabled, such bodies become a generic, untyped `body`
    /// parameter.
    /// Default: false
    pub require_body_name: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            namespace: "Api.Client".to_string(),
            client_name: "Api".to_string(),
            exception_type: "ApiException".to_string(),
            exception_code_prefix: "E".to_string(),
            configuration_header_key: String::new(),
            capabilities: CapabilitySet::new(),
            require_body_name: false,
        }
    }
}

impl GeneratorSettings {
    /// Creates a new settings builder.
    #[must_use]
    pub fn builder() -> GeneratorSettingsBuilder {
        GeneratorSettingsBuilder::new()
    }

    /// Returns `true` if the capability is enabled.
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - Namespace, client name or exception type is not a valid identifier path
    /// - Exception code prefix is empty
    /// - Extended features are enabled without a configuration header key
    /// - Refresh token support is enabled without access token support
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::{Capability, GeneratorSettings};
    ///
    /// let mut settings = GeneratorSettings::default();
    /// assert!(settings.validate().is_ok());
    ///
    /// settings.capabilities.insert(Capability::ExtendedFeatures);
    /// assert!(settings.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !self.namespace.split('.').all(is_identifier) {
            return Err(config_error(format!(
                "namespace '{}' must be a dot-separated list of identifiers",
                self.namespace
            )));
        }

        if !is_identifier(&self.client_name) {
            return Err(config_error(format!(
                "client name '{}' must be an identifier",
                self.client_name
            )));
        }

        if !is_identifier(&self.exception_type) {
            return Err(config_error(format!(
                "exception type '{}' must be an identifier",
                self.exception_type
            )));
        }

        if self.exception_code_prefix.is_empty() {
            return Err(config_error("exception code prefix cannot be empty"));
        }

        if self.has(Capability::ExtendedFeatures) && self.configuration_header_key.trim().is_empty()
        {
            return Err(config_error(
                "extended features require a configuration header key",
            ));
        }

        if self.has(Capability::RefreshToken) && !self.has(Capability::AccessToken) {
            return Err(config_error(
                "refresh token support requires access token support",
            ));
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> Error {
    Error::ConfigError {
        message: message.into(),
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builder for `GeneratorSettings`.
///
/// # Examples
///
/// ```
/// use sdkgen_core::{Capability, GeneratorSettings};
///
/// let settings = GeneratorSettings::builder()
///     .client_name("Nexus")
///     .exception_type("NexusException")
///     .exception_code_prefix("N")
///     .configuration_header_key("Nexus-Configuration")
///     .capability(Capability::ExtendedFeatures)
///     .build();
///
/// assert_eq!(settings.client_name, "Nexus");
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug)]
pub struct GeneratorSettingsBuilder {
    settings: GeneratorSettings,
}

impl GeneratorSettingsBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: GeneratorSettings::default(),
        }
    }

    /// Sets the namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.settings.namespace = namespace.into();
        self
    }

    /// Sets the root client name.
    #[must_use]
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.settings.client_name = name.into();
        self
    }

    /// Sets the exception type name.
    #[must_use]
    pub fn exception_type(mut self, name: impl Into<String>) -> Self {
        self.settings.exception_type = name.into();
        self
    }

    /// Sets the exception code prefix.
    #[must_use]
    pub fn exception_code_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.exception_code_prefix = prefix.into();
        self
    }

    /// Sets the configuration header key.
    #[must_use]
    pub fn configuration_header_key(mut self, key: impl Into<String>) -> Self {
        self.settings.configuration_header_key = key.into();
        self
    }

    /// Enables one capability.
    #[must_use]
    pub fn capability(mut self, capability: Capability) -> Self {
        self.settings.capabilities.insert(capability);
        self
    }

    /// Replaces the whole capability set.
    #[must_use]
    pub fn capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.settings.capabilities = capabilities;
        self
    }

    /// Enables or disables strict body naming.
    #[must_use]
    pub const fn require_body_name(mut self, require: bool) -> Self {
        self.settings.require_body_name = require;
        self
    }

    /// Builds the settings.
    #[must_use]
    pub fn build(self) -> GeneratorSettings {
        self.settings
    }
}

impl Default for GeneratorSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
