//! Schema to target type resolution.
//!
//! [`resolve`] maps one schema node to a backend-neutral [`TypeRef`]. Inline
//! closed objects are hoisted as a side effect: their declaration is emitted
//! through the session's backend and recorded in the session registry under
//! the context name supplied by the caller.
//!
//! Traversal is depth-first and left-to-right, so hoisted names and the order
//! of registry entries are fully determined by the input document.

use crate::description::Schema;
use crate::models;
use crate::session::GenerationSession;
use sdkgen_core::{Error, Result};

/// A resolved, backend-neutral type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Boolean
    Boolean,
    /// 64-bit floating point
    Float64,
    /// 32-bit integer
    Int32,
    /// Plain text
    Text,
    /// Absolute or relative URI
    Uri,
    /// GUID / UUID
    Guid,
    /// Time span
    Duration,
    /// Timestamp
    DateTime,
    /// Untyped JSON value
    Dynamic,
    /// Named model (component or hoisted type)
    Named(String),
    /// Ordered sequence
    Sequence(Box<TypeRef>),
    /// Map with text keys
    Map(Box<TypeRef>),
    /// Value that may be absent
    Optional(Box<TypeRef>),
    /// Raw request body stream
    ByteStream,
    /// Raw response, returned for octet-stream content
    RawResponse,
    /// Trailing cancellation token of asynchronous methods
    Cancellation,
}

impl TypeRef {
    /// Wraps the type in [`TypeRef::Optional`] unless it already is.
    #[must_use]
    pub fn into_optional(self) -> Self {
        match self {
            Self::Optional(_) => self,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// Returns `true` for [`TypeRef::Optional`].
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Strips one optional marker.
    #[must_use]
    pub fn inner(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }
}

/// Resolves `schema` to a target type.
///
/// `context_name` names the type hoisted from an inline closed object; it is
/// required only when such an object is actually met. `is_required` comes
/// from the calling context; the result is optional when it is `false` or
/// when the schema itself is nullable.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaShape`] for type/format pairs without a
/// target type, unions with more than one branch, arrays without items and
/// inline objects met without a context name. Errors from hoisted model
/// emission propagate unchanged.
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::backend::{backend_for};
/// use sdkgen_codegen::description::{Document, Schema};
/// use sdkgen_codegen::resolver::{resolve, TypeRef};
/// use sdkgen_codegen::session::GenerationSession;
/// use sdkgen_core::{GeneratorSettings, Target};
///
/// let document = Document::from_json_str(r#"{"info": {"version": "v1"}}"#).unwrap();
/// let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
/// let mut session = GenerationSession::new(backend.as_ref(), &document);
///
/// let schema = Schema {
///     schema_type: Some("string".to_string()),
///     format: Some("date-time".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(resolve(&mut session, &schema, None, true).unwrap(), TypeRef::DateTime);
/// assert_eq!(
///     resolve(&mut session, &schema, None, false).unwrap(),
///     TypeRef::Optional(Box::new(TypeRef::DateTime))
/// );
/// ```
pub fn resolve(
    session: &mut GenerationSession<'_>,
    schema: &Schema,
    context_name: Option<&str>,
    is_required: bool,
) -> Result<TypeRef> {
    let resolved = resolve_shape(session, schema, context_name)?;

    if schema.nullable || !is_required {
        Ok(resolved.into_optional())
    } else {
        Ok(resolved)
    }
}

fn resolve_shape(
    session: &mut GenerationSession<'_>,
    schema: &Schema,
    context_name: Option<&str>,
) -> Result<TypeRef> {
    if let Some(name) = schema.reference_id() {
        return Ok(TypeRef::Named(name.to_string()));
    }

    let format = schema.format.as_deref();

    let Some(schema_type) = schema.schema_type.as_deref() else {
        return match schema.one_of.as_slice() {
            [] => Ok(TypeRef::Dynamic),
            // The branch's own nullability still applies.
            [single] => resolve(session, single, context_name, true),
            branches => Err(Error::unsupported_schema(
                None,
                format,
                format!("oneOf with {} branches", branches.len()),
            )),
        };
    };

    match (schema_type, format) {
        ("boolean", _) => Ok(TypeRef::Boolean),
        ("number", None | Some("double")) => Ok(TypeRef::Float64),
        ("integer", None | Some("int32")) => Ok(TypeRef::Int32),
        ("string", Some("uri")) => Ok(TypeRef::Uri),
        ("string", Some("guid")) => Ok(TypeRef::Guid),
        ("string", Some("duration")) => Ok(TypeRef::Duration),
        ("string", Some("date-time")) => Ok(TypeRef::DateTime),
        ("string", _) => Ok(TypeRef::Text),
        ("array", _) => {
            let items = schema.items.as_deref().ok_or_else(|| {
                Error::unsupported_schema(Some(schema_type), format, "array without items")
            })?;
            let item = resolve(session, items, context_name, true)?;
            Ok(TypeRef::Sequence(Box::new(item)))
        }
        ("object", _) => resolve_object(session, schema, context_name),
        _ => Err(Error::unsupported_schema(
            Some(schema_type),
            format,
            "no matching target type",
        )),
    }
}

fn resolve_object(
    session: &mut GenerationSession<'_>,
    schema: &Schema,
    context_name: Option<&str>,
) -> Result<TypeRef> {
    if let Some(values) = schema.open_value_schema() {
        let value = resolve(session, values, context_name, true)?;
        return Ok(TypeRef::Map(Box::new(value)));
    }

    if let Some(name) = session.component_name_of(schema) {
        return Ok(TypeRef::Named(name.to_string()));
    }

    let name = context_name.ok_or_else(|| {
        Error::unsupported_schema(
            Some("object"),
            schema.format.as_deref(),
            "inline object where no type name can be synthesized",
        )
    })?;

    let declaration = models::emit(session, name, schema)?;
    tracing::debug!("Hoisted inline object as {}", name);
    session.registry_mut().register(name, declaration);

    Ok(TypeRef::Named(name.to_string()))
}
