//! Model declaration emission.
//!
//! A named schema becomes either an enum or a record. [`describe`] resolves
//! the member types into a backend-neutral [`GeneratedType`]; [`emit`] then
//! renders it through the session's backend.

use crate::description::Schema;
use crate::naming::{first_line, to_pascal_case};
use crate::resolver::{self, TypeRef};
use crate::session::GenerationSession;
use sdkgen_core::{Error, Result};

/// A model ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedType {
    /// Type name
    pub name: String,
    /// Schema description
    pub description: Option<String>,
    /// Enum members or record fields
    pub body: ModelBody,
}

/// Shape of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelBody {
    /// String enum, members in declaration order
    Enum(Vec<EnumMember>),
    /// Record, fields in document order
    Record(Vec<RecordField>),
}

/// One enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// Declared value
    pub value: String,
    /// First line of the value, used as member documentation
    pub documentation: Option<String>,
}

/// One record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    /// Property name as written in the description
    pub name: String,
    /// Resolved field type
    pub type_ref: TypeRef,
    /// Property description
    pub description: Option<String>,
}

/// Resolves a named schema into a [`GeneratedType`].
///
/// Record fields are resolved with `is_required = true`; only a property's
/// own `nullable` flag makes it optional. Inline object properties are
/// hoisted as `<name><Property>Type`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedEnumType`] for enums whose type is not
/// `string`, and any resolver error raised by a field.
pub fn describe(
    session: &mut GenerationSession<'_>,
    name: &str,
    schema: &Schema,
) -> Result<GeneratedType> {
    let body = if schema.is_enum() {
        if schema.schema_type.as_deref() != Some("string") {
            return Err(Error::UnsupportedEnumType {
                model: name.to_string(),
                schema_type: schema
                    .schema_type
                    .clone()
                    .unwrap_or_else(|| "<none>".to_string()),
            });
        }

        let members = schema
            .enum_values
            .iter()
            .map(|value| {
                let value = value
                    .as_str()
                    .map_or_else(|| value.to_string(), ToString::to_string);
                let documentation = first_line(&value).map(ToString::to_string);
                EnumMember {
                    value,
                    documentation,
                }
            })
            .collect();

        ModelBody::Enum(members)
    } else {
        let mut fields = Vec::with_capacity(schema.properties.len());

        for (property, property_schema) in &schema.properties {
            let anonymous_name = format!("{name}{}Type", to_pascal_case(property));
            let type_ref = resolver::resolve(session, property_schema, Some(&anonymous_name), true)?;

            fields.push(RecordField {
                name: property.clone(),
                type_ref,
                description: property_schema.description.clone(),
            });
        }

        ModelBody::Record(fields)
    };

    Ok(GeneratedType {
        name: name.to_string(),
        description: schema.description.clone(),
        body,
    })
}

/// Renders the declaration text of a named schema.
///
/// # Errors
///
/// Propagates errors from [`describe`].
pub fn emit(session: &mut GenerationSession<'_>, name: &str, schema: &Schema) -> Result<String> {
    let model = describe(session, name, schema)?;
    tracing::debug!("Emitting model {}", name);
    Ok(session.backend().render_model(&model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::backend_for;
    use crate::description::Document;
    use sdkgen_core::{GeneratorSettings, Target};
    use serde_json::json;

    fn document() -> Document {
        Document::from_value(json!({
            "info": {"title": "T", "version": "v1"},
            "components": {"schemas": {
                "TaskStatus": {
                    "type": "string",
                    "description": "Status of a job.",
                    "enum": ["Created", "Running", "Faulted"]
                },
                "Level": {"type": "integer", "enum": [1, 2]},
                "Job": {
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": {"type": "string", "format": "guid"},
                        "owner": {"type": "string"},
                        "result": {"type": "string", "nullable": true},
                        "progress": {
                            "type": "object",
                            "properties": {"value": {"type": "number"}}
                        }
                    }
                }
            }}
        }))
        .unwrap()
    }

    #[test]
    fn test_enum_members_keep_order() {
        let document = document();
        let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
        let mut session = GenerationSession::new(backend.as_ref(), &document);

        let model = describe(&mut session, "TaskStatus", &document.components.schemas["TaskStatus"]).unwrap();
        let ModelBody::Enum(members) = model.body else {
            panic!("expected enum");
        };

        let values: Vec<_> = members.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["Created", "Running", "Faulted"]);
        assert_eq!(model.description.as_deref(), Some("Status of a job."));
    }

    #[test]
    fn test_non_string_enum_is_rejected() {
        let document = document();
        let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
        let mut session = GenerationSession::new(backend.as_ref(), &document);

        let err = describe(&mut session, "Level", &document.components.schemas["Level"]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedEnumType { ref model, .. } if model == "Level"));
    }

    #[test]
    fn test_record_ignores_required_list() {
        let document = document();
        let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
        let mut session = GenerationSession::new(backend.as_ref(), &document);

        let model = describe(&mut session, "Job", &document.components.schemas["Job"]).unwrap();
        let ModelBody::Record(fields) = model.body else {
            panic!("expected record");
        };

        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "owner", "result", "progress"]);

        // "owner" is not in the required list but stays non-optional.
        assert_eq!(fields[1].type_ref, TypeRef::Text);
        assert_eq!(fields[2].type_ref, TypeRef::Optional(Box::new(TypeRef::Text)));
        assert_eq!(fields[3].type_ref, TypeRef::Named("JobProgressType".to_string()));
        assert!(session.registry().contains("JobProgressType"));
    }

    #[test]
    fn test_emit_renders_through_backend() {
        let document = document();
        let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
        let mut session = GenerationSession::new(backend.as_ref(), &document);

        let text = emit(&mut session, "TaskStatus", &document.components.schemas["TaskStatus"]).unwrap();
        assert!(text.contains("public enum TaskStatus"));
        assert!(text.contains("Running"));
    }
}
