//! Error types for SDK generation.
//!
//! Every unsupported construct in a description document aborts the whole
//! generation pass. There is no partial output and no recovery inside a run;
//! the caller fixes the description or the settings and runs again.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::{Error, Result};
//!
//! fn check_client_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "Client name cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_client_name("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for SDK generation.
///
/// All errors in the system use this type, providing consistent error handling
/// across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP verb outside of GET, PUT, POST and DELETE.
    #[error("Unsupported operation kind '{verb}' on path '{path}'")]
    UnsupportedOperationKind {
        /// Path template the operation belongs to
        path: String,
        /// Verb as written in the description
        verb: String,
    },

    /// The first declared response is not a `200` or `201` response.
    #[error("Unsupported response status '{status}' for {verb} '{path}' (only 200 or 201 are supported)")]
    UnsupportedResponseStatus {
        /// Path template the operation belongs to
        path: String,
        /// HTTP verb of the operation
        verb: String,
        /// Status key of the first response
        status: String,
    },

    /// A request body declares zero or several content entries.
    #[error("Unsupported request body content count {count} for {verb} '{path}' (exactly one is supported)")]
    UnsupportedContentCount {
        /// Path template the operation belongs to
        path: String,
        /// HTTP verb of the operation
        verb: String,
        /// Number of declared content entries
        count: usize,
    },

    /// Media type other than `application/json` or `application/octet-stream`.
    #[error("Unsupported media type '{media_type}' for {verb} '{path}'")]
    UnsupportedMediaType {
        /// Path template the operation belongs to
        path: String,
        /// HTTP verb of the operation
        verb: String,
        /// Offending media type
        media_type: String,
    },

    /// Schema shape that cannot be mapped to a target type.
    ///
    /// Raised for unknown type/format pairs, unions with more than one
    /// branch, and inline objects that appear where no type name can be
    /// synthesized.
    #[error("Unsupported schema shape (type: {schema_type}, format: {format}): {reason}")]
    UnsupportedSchemaShape {
        /// Declared schema type, or `<none>`
        schema_type: String,
        /// Declared schema format, or `<none>`
        format: String,
        /// What made the shape unsupported
        reason: String,
    },

    /// Enum declared on a schema whose type is not `string`.
    #[error("Unsupported enum type '{schema_type}' on model '{model}' (only string enums are supported)")]
    UnsupportedEnumType {
        /// Model being emitted
        model: String,
        /// Declared schema type, or `<none>`
        schema_type: String,
    },

    /// Parameters declared on a path item instead of its operations.
    #[error("Path-level parameters are not supported (path '{path}' in group '{group}')")]
    PathLevelParametersUnsupported {
        /// Path template carrying shared parameters
        path: String,
        /// Sub-client group containing the path
        group: String,
    },

    /// A vendor extension is missing or has the wrong value type.
    #[error("Missing required extension '{extension}' on {location}: {reason}")]
    MissingRequiredExtension {
        /// Extension key, for example `x-name`
        extension: String,
        /// Where the extension was expected
        location: String,
        /// Why the extension could not be used
        reason: String,
    },

    /// The first operation of a path carries no tag to group by.
    #[error("Path '{path}' cannot be grouped: its first operation has no tag")]
    UntaggedPath {
        /// Path template without a tag
        path: String,
    },

    /// The operation naming strategy could not name an operation.
    #[error("Cannot name {verb} '{path}': {reason}")]
    OperationNameUnavailable {
        /// Path template of the operation
        path: String,
        /// HTTP verb of the operation
        verb: String,
        /// Why no name could be derived
        reason: String,
    },

    /// Configuration error.
    ///
    /// Raised when settings are invalid, missing required fields,
    /// or contain contradictory options.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Serialization/deserialization error.
    ///
    /// Raised when a description document cannot be decoded.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Template registration or rendering failed.
    #[error("Template error in '{template}': {message}")]
    TemplateError {
        /// Template name
        template: String,
        /// Description of the failure
        message: String,
    },
}

impl Error {
    /// Builds an [`Error::UnsupportedSchemaShape`] from optional type and format.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::Error;
    ///
    /// let err = Error::unsupported_schema(Some("integer"), Some("int64"), "no matching target type");
    /// assert!(err.to_string().contains("int64"));
    /// assert!(err.is_unsupported_construct());
    /// ```
    #[must_use]
    pub fn unsupported_schema(
        schema_type: Option<&str>,
        format: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedSchemaShape {
            schema_type: schema_type.unwrap_or("<none>").to_string(),
            format: format.unwrap_or("<none>").to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error reports a construct the generator cannot express.
    ///
    /// These errors are fixed by changing the description document, not
    /// the generator settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::Error;
    ///
    /// let err = Error::UnsupportedOperationKind {
    ///     path: "/items".to_string(),
    ///     verb: "patch".to_string(),
    /// };
    /// assert!(err.is_unsupported_construct());
    /// ```
    #[must_use]
    pub const fn is_unsupported_construct(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedOperationKind { .. }
                | Self::UnsupportedResponseStatus { .. }
                | Self::UnsupportedContentCount { .. }
                | Self::UnsupportedMediaType { .. }
                | Self::UnsupportedSchemaShape { .. }
                | Self::UnsupportedEnumType { .. }
                | Self::PathLevelParametersUnsupported { .. }
                | Self::MissingRequiredExtension { .. }
                | Self::UntaggedPath { .. }
        )
    }

    /// Returns `true` if this is a schema shape error.
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedSchemaShape { .. } | Self::UnsupportedEnumType { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "Empty namespace".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. } | Self::InvalidArgument(_))
    }

    /// Returns `true` if this is a template registration or rendering error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if this is a serialization error.
    #[must_use]
    pub const fn is_serialization_error(&self) -> bool {
        matches!(self, Self::SerializationError { .. })
    }
}

/// Result type alias for generation operations.
///
/// This is a convenience alias for `Result<T, Error>` used throughout
/// the codebase.
///
/// # Examples
///
/// ```
/// use sdkgen_core::{Result, Error};
///
/// fn validate_prefix(value: &str) -> Result<&str> {
///     if value.is_empty() {
///         return Err(Error::ConfigError {
///             message: "Prefix must not be empty".to_string(),
///         });
///     }
///     Ok(value)
/// }
///
/// assert!(validate_prefix("N").is_ok());
/// assert!(validate_prefix("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
