//! Strong domain types for SDK generation.
//!
//! Verbs, media types, version identifiers, and output targets are parsed
//! once at the boundary so the generator never compares raw strings.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::{HttpMethod, MediaType, VersionId};
//!
//! let method = HttpMethod::parse("/items", "get").unwrap();
//! assert_eq!(method.as_str(), "GET");
//!
//! assert_eq!(MediaType::parse("application/json"), Some(MediaType::Json));
//! assert_eq!(VersionId::normalize("1.0").as_str(), "v1_0");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP verb of a supported operation.
///
/// Only the four verbs a generated client can express are representable.
/// Any other verb is rejected by [`HttpMethod::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Parses a verb key as written in a path item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperationKind`] for verbs other than
    /// get, put, post and delete.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::HttpMethod;
    ///
    /// assert_eq!(HttpMethod::parse("/a", "POST").unwrap(), HttpMethod::Post);
    /// assert!(HttpMethod::parse("/a", "patch").is_err());
    /// ```
    pub fn parse(path: &str, verb: &str) -> Result<Self> {
        match verb.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "put" => Ok(Self::Put),
            "post" => Ok(Self::Post),
            "delete" => Ok(Self::Delete),
            _ => Err(Error::UnsupportedOperationKind {
                path: path.to_string(),
                verb: verb.to_string(),
            }),
        }
    }

    /// Returns the upper-case wire form of the verb.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Returns the verb in Pascal case (`Get`, `Post`, ...).
    ///
    /// Used by naming strategies that prefix method names with the verb.
    #[must_use]
    pub const fn pascal_name(&self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Put => "Put",
            Self::Post => "Post",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media type of a request or response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    /// `application/json`, decoded into typed values
    Json,
    /// `application/octet-stream`, passed through as raw bytes
    OctetStream,
}

impl MediaType {
    /// Recognizes one of the supported media types.
    ///
    /// Returns `None` for anything else; callers turn that into
    /// [`Error::UnsupportedMediaType`] with their own context.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "application/json" => Some(Self::Json),
            "application/octet-stream" => Some(Self::OctetStream),
            _ => None,
        }
    }

    /// Returns the wire form of the media type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::OctetStream => "application/octet-stream",
        }
    }

    /// Method name suffix used when one response offers several media types.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::MediaType;
    ///
    /// assert_eq!(MediaType::Json.method_suffix(), "AsJson");
    /// assert_eq!(MediaType::OctetStream.method_suffix(), "AsStream");
    /// ```
    #[must_use]
    pub const fn method_suffix(&self) -> &'static str {
        match self {
            Self::Json => "AsJson",
            Self::OctetStream => "AsStream",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of one API version inside a composed client.
///
/// Derived from the description's `info.version`: lower-cased, runs of
/// characters that are not ASCII alphanumerics collapse into `_`, and a
/// leading digit gets a `v` prefix so the result is a valid identifier in
/// every target language.
///
/// # Examples
///
/// ```
/// use sdkgen_core::VersionId;
///
/// let id = VersionId::normalize("2.1-beta");
/// assert_eq!(id.as_str(), "v2_1_beta");
/// assert_eq!(id.type_name(), "V2_1_beta");
///
/// assert_eq!(VersionId::normalize("V1").as_str(), "v1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionId(String);

impl VersionId {
    /// Normalizes a raw version string into an identifier.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let mut id = String::with_capacity(raw.len() + 1);
        let mut pending_separator = false;

        for ch in raw.trim().chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_separator && !id.is_empty() {
                    id.push('_');
                }
                pending_separator = false;
                id.push(ch.to_ascii_lowercase());
            } else {
                pending_separator = true;
            }
        }

        if id.is_empty() {
            return Self("v0".to_string());
        }

        if id.starts_with(|c: char| c.is_ascii_digit()) {
            id.insert(0, 'v');
        }

        Self(id)
    }

    /// Returns the identifier, suitable for accessors and module names.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identifier with an upper-case first letter, for type names.
    #[must_use]
    pub fn type_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        }
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output language of a generated SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Statically-typed, interface-based C# client
    CSharp,
    /// Dynamically-typed, annotation-based Python client
    Python,
}

impl Target {
    /// Returns the string representation of the target.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CSharp => "csharp",
            Self::Python => "python",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csharp" | "c#" | "cs" => Ok(Self::CSharp),
            "python" | "py" => Ok(Self::Python),
            _ => Err(Error::InvalidArgument(format!(
                "invalid target: '{s}' (expected: csharp or python)"
            ))),
        }
    }
}
