//! Schema nodes of a description document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

/// One type definition: primitive, array, object, reference, or union.
///
/// Only the keywords that influence generated types are kept. The object
/// `required` list is decoded but never consulted for field optionality;
/// a property is optional only when its own schema is `nullable`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// `$ref` pointer to a component, e.g. `#/components/schemas/Widget`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Declared type (`string`, `integer`, `object`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    /// Format hint (`date-time`, `uri`, `int32`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// OpenAPI 3.0 nullable flag.
    #[serde(default)]
    pub nullable: bool,

    /// Item schema for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    /// Properties of closed objects, in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    /// Value schema of open objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    /// Enum values in declaration order.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    /// Union branches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,

    /// Required property names (decoded, never consulted).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    /// Returns the component name a `$ref` points to.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_codegen::description::Schema;
    ///
    /// let schema = Schema {
    ///     reference: Some("#/components/schemas/Widget".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(schema.reference_id(), Some("Widget"));
    /// ```
    #[must_use]
    pub fn reference_id(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .map(|pointer| pointer.rsplit('/').next().unwrap_or(pointer))
    }

    /// Returns the value schema of an open object, if any.
    ///
    /// `additionalProperties: false` counts as absent, `true` yields an
    /// untyped value schema.
    #[must_use]
    pub fn open_value_schema(&self) -> Option<&Self> {
        match &self.additional_properties {
            Some(AdditionalProperties::Schema(schema)) => Some(schema),
            Some(AdditionalProperties::Allowed(true)) => Some(untyped()),
            Some(AdditionalProperties::Allowed(false)) | None => None,
        }
    }

    /// Returns `true` for enum schemas.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }
}

/// `additionalProperties` is either a flag or a value schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` or `false`
    Allowed(bool),
    /// Schema of every additional value
    Schema(Box<Schema>),
}

fn untyped() -> &'static Schema {
    static UNTYPED: OnceLock<Schema> = OnceLock::new();
    UNTYPED.get_or_init(Schema::default)
}
