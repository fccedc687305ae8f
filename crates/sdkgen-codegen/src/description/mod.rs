//! In-memory description document.
//!
//! A serde model of the subset of an OpenAPI 3.0 document the generator
//! consumes. Every map keeps document order so that generated output is
//! stable across runs.
//!
//! # Examples
//!
//! ```
//! use sdkgen_codegen::description::Document;
//!
//! let document = Document::from_json_str(r#"{
//!     "openapi": "3.0.3",
//!     "info": { "title": "Widgets", "version": "v1" },
//!     "paths": {
//!         "/widgets": {
//!             "get": {
//!                 "tags": ["Widgets"],
//!                 "operationId": "Widgets_GetAll",
//!                 "responses": { "200": { "description": "OK" } }
//!             }
//!         }
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(document.paths.len(), 1);
//! assert_eq!(document.paths["/widgets"].operations.len(), 1);
//! ```

mod schema;

pub use schema::{AdditionalProperties, Schema};

use indexmap::IndexMap;
use sdkgen_core::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Verb keys recognized inside a path item.
///
/// Verbs the generator cannot express are still decoded so that they can
/// be rejected with a precise error instead of disappearing.
const VERB_KEYS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Root of a description document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    /// Declared OpenAPI version.
    #[serde(default)]
    pub openapi: String,

    /// Document metadata.
    pub info: Info,

    /// Path templates in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components.
    #[serde(default)]
    pub components: Components,
}

impl Document {
    /// Decodes a JSON description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the text is not a valid
    /// description document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::SerializationError {
            message: format!("Failed to decode JSON description: {e}"),
            source: Some(e),
        })
    }

    /// Decodes a YAML description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the text is not a valid
    /// description document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::SerializationError {
            message: format!("Failed to decode YAML description: {e}"),
            source: None,
        })
    }

    /// Decodes a description from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the value does not have the
    /// shape of a description document.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::SerializationError {
            message: format!("Failed to decode description: {e}"),
            source: Some(e),
        })
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default)]
    pub title: String,

    /// API version, used to derive the version accessor name.
    #[serde(default)]
    pub version: String,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Components {
    /// Named schemas in document order.
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

/// All operations declared on one path template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct PathItem {
    /// Parameters shared by every verb on the path.
    ///
    /// Decoded so they can be rejected; the generator does not support them.
    pub parameters: Vec<Parameter>,

    /// Operations keyed by lower-case verb, in document order.
    pub operations: IndexMap<String, Operation>,
}

impl TryFrom<IndexMap<String, Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(entries: IndexMap<String, Value>) -> std::result::Result<Self, Self::Error> {
        let mut item = Self::default();

        for (key, value) in entries {
            let lowered = key.to_ascii_lowercase();

            if lowered == "parameters" {
                item.parameters = serde_json::from_value(value)?;
            } else if VERB_KEYS.contains(&lowered.as_str()) {
                item.operations
                    .insert(lowered, serde_json::from_value(value)?);
            }
        }

        Ok(item)
    }
}

/// One operation on a path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation identifier.
    #[serde(default)]
    pub operation_id: Option<String>,

    /// Short summary, used as method documentation.
    #[serde(default)]
    pub summary: Option<String>,

    /// Long description.
    #[serde(default)]
    pub description: Option<String>,

    /// Tags; the first one names the sub-client.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Operation parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Optional request body.
    #[serde(default)]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code, in document order.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Substituted into the path template
    Path,
    /// Appended to the query string
    Query,
    /// Request header
    Header,
    /// Cookie
    Cookie,
}

impl ParameterLocation {
    /// Returns the location as written in the description.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

/// One operation parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    /// Wire name.
    pub name: String,

    /// Location of the parameter.
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Required flag.
    #[serde(default)]
    pub required: bool,

    /// Value schema; a missing schema is an untyped value.
    #[serde(default)]
    pub schema: Schema,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body of an operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Required flag.
    #[serde(default)]
    pub required: bool,

    /// Content entries keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaTypeObject>,

    /// Vendor extensions and other unrecognized keys.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl RequestBody {
    /// Returns the value of a vendor extension such as `x-name`.
    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }
}

/// One response of an operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Content entries keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaTypeObject>,
}

/// Content entry for one media type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaTypeObject {
    /// Payload schema; absent for raw streams.
    #[serde(default)]
    pub schema: Option<Schema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "openapi": "3.0.3",
            "info": {"title": "Nexus", "version": "v1"},
            "paths": {
                "/api/v1/catalogs/{catalogId}": {
                    "summary": "ignored",
                    "x-internal": true,
                    "parameters": [
                        {"name": "catalogId", "in": "path", "required": true, "schema": {"type": "string"}}
                    ],
                    "put": {"tags": ["Catalogs"], "responses": {"200": {}}},
                    "get": {"tags": ["Catalogs"], "responses": {"200": {}}},
                    "patch": {"tags": ["Catalogs"], "responses": {"200": {}}}
                }
            },
            "components": {
                "schemas": {
                    "Zeta": {"type": "string"},
                    "Alpha": {"type": "string"}
                }
            }
        })
    }

    #[test]
    fn test_path_item_splits_parameters_and_verbs() {
        let document = Document::from_value(sample()).unwrap();
        let item = &document.paths["/api/v1/catalogs/{catalogId}"];

        assert_eq!(item.parameters.len(), 1);
        assert_eq!(item.parameters[0].location, ParameterLocation::Path);

        let verbs: Vec<_> = item.operations.keys().cloned().collect();
        assert_eq!(verbs, vec!["put", "get", "patch"]);
    }

    #[test]
    fn test_components_keep_document_order() {
        let document = Document::from_value(sample()).unwrap();
        let names: Vec<_> = document.components.schemas.keys().cloned().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_request_body_extensions() {
        let body: RequestBody = serde_json::from_value(json!({
            "required": true,
            "x-name": "payload",
            "content": {"application/json": {"schema": {"type": "string"}}}
        }))
        .unwrap();

        assert!(body.required);
        assert_eq!(body.extension("x-name"), Some(&json!("payload")));
        assert!(body.extension("x-other").is_none());
        assert_eq!(body.content.len(), 1);
    }

    #[test]
    fn test_yaml_description() {
        let document = Document::from_yaml_str(
            r"
openapi: 3.0.3
info:
  title: Widgets
  version: '2.0'
paths:
  /widgets:
    get:
      tags: [Widgets]
      responses:
        '200':
          description: OK
",
        )
        .unwrap();

        assert_eq!(document.info.version, "2.0");
        assert!(document.paths["/widgets"].operations.contains_key("get"));
    }

    #[test]
    fn test_invalid_description() {
        let err = Document::from_json_str("{\"paths\": []}").unwrap_err();
        assert!(err.is_serialization_error());
    }
}
