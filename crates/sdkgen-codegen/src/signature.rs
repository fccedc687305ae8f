//! Method signature synthesis.
//!
//! One operation yields one [`MethodSignature`] per response content entry.
//! Each signature carries the return type, the accept and content media
//! types, and the ordered parameter list: required parameters first (body
//! included, keyed by its own `required` flag), declared order kept inside
//! each partition, and the cancellation parameter always last.

use crate::description::{Operation, ParameterLocation, RequestBody};
use crate::naming::OperationNaming;
use crate::resolver::{self, TypeRef};
use crate::session::GenerationSession;
use sdkgen_core::{Error, HttpMethod, MediaType, Result};
use serde_json::Value;

/// Vendor extension naming the body parameter.
pub const BODY_NAME_EXTENSION: &str = "x-name";

/// Parameter name used when the body carries no name extension.
pub const DEFAULT_BODY_NAME: &str = "body";

/// Name of the trailing cancellation parameter.
pub const CANCELLATION_PARAMETER: &str = "cancellationToken";

/// Synchronous or asynchronous rendering of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodVariant {
    /// Blocking call
    Sync,
    /// Awaitable call
    Async,
}

impl MethodVariant {
    /// Returns `true` for [`MethodVariant::Async`].
    #[must_use]
    pub const fn is_async(&self) -> bool {
        matches!(self, Self::Async)
    }
}

/// Where a signature parameter ends up in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterPosition {
    /// Path placeholder
    Path,
    /// Query string entry
    Query,
    /// Request body with its media type
    Body(MediaType),
    /// Cancellation token, not sent
    Cancellation,
}

/// One parameter of a generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameter {
    /// Name as written in the description (wire name for path and query)
    pub name: String,
    /// Position in the request
    pub position: ParameterPosition,
    /// Resolved type
    pub type_ref: TypeRef,
    /// Required flag used for ordering and defaults
    pub required: bool,
    /// Documentation
    pub description: Option<String>,
}

impl SignatureParameter {
    /// Returns `true` if the value may be absent at call time.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        !self.required || self.type_ref.is_optional()
    }
}

/// Signature of one generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Base name including the media-type suffix
    pub name: String,
    /// HTTP verb
    pub method: HttpMethod,
    /// Path template
    pub path: String,
    /// Operation summary
    pub summary: Option<String>,
    /// Return type, `None` for void
    pub return_type: Option<TypeRef>,
    /// Accept header value
    pub accept: Option<MediaType>,
    /// Parameters in call order, cancellation last
    pub parameters: Vec<SignatureParameter>,
}

impl MethodSignature {
    /// Method name for `variant`; asynchronous methods get an `Async` suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_codegen::signature::{MethodSignature, MethodVariant};
    /// use sdkgen_core::HttpMethod;
    ///
    /// let signature = MethodSignature {
    ///     name: "GetStream".to_string(),
    ///     method: HttpMethod::Get,
    ///     path: "/data".to_string(),
    ///     summary: None,
    ///     return_type: None,
    ///     accept: None,
    ///     parameters: Vec::new(),
    /// };
    ///
    /// assert_eq!(signature.method_name(MethodVariant::Sync), "GetStream");
    /// assert_eq!(signature.method_name(MethodVariant::Async), "GetStreamAsync");
    /// ```
    #[must_use]
    pub fn method_name(&self, variant: MethodVariant) -> String {
        match variant {
            MethodVariant::Sync => self.name.clone(),
            MethodVariant::Async => format!("{}Async", self.name),
        }
    }

    /// Parameters of `variant`; the cancellation parameter is async-only.
    pub fn parameters(&self, variant: MethodVariant) -> impl Iterator<Item = &SignatureParameter> {
        self.parameters.iter().filter(move |parameter| {
            variant.is_async() || parameter.position != ParameterPosition::Cancellation
        })
    }

    /// Parameters that are sent over the wire.
    pub fn request_parameters(&self) -> impl Iterator<Item = &SignatureParameter> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.position != ParameterPosition::Cancellation)
    }

    /// Path placeholder parameters, in call order.
    pub fn path_parameters(&self) -> impl Iterator<Item = &SignatureParameter> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.position == ParameterPosition::Path)
    }

    /// Query parameters, in call order.
    pub fn query_parameters(&self) -> impl Iterator<Item = &SignatureParameter> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.position == ParameterPosition::Query)
    }

    /// Body parameter, if the operation has a request body.
    #[must_use]
    pub fn body(&self) -> Option<&SignatureParameter> {
        self.parameters
            .iter()
            .find(|parameter| matches!(parameter.position, ParameterPosition::Body(_)))
    }

    /// Content type of the request body.
    #[must_use]
    pub fn content_type(&self) -> Option<MediaType> {
        self.body().and_then(|body| match body.position {
            ParameterPosition::Body(media_type) => Some(media_type),
            _ => None,
        })
    }
}

/// Builds method signatures for operations.
pub struct MethodSignatureBuilder<'n> {
    naming: &'n dyn OperationNaming,
    require_body_name: bool,
}

impl std::fmt::Debug for MethodSignatureBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodSignatureBuilder")
            .field("require_body_name", &self.require_body_name)
            .finish_non_exhaustive()
    }
}

impl<'n> MethodSignatureBuilder<'n> {
    /// Creates a builder using `naming` for base method names.
    ///
    /// With `require_body_name`, a request body without the `x-name`
    /// extension is an error instead of a generic `body` parameter.
    #[must_use]
    pub fn new(naming: &'n dyn OperationNaming, require_body_name: bool) -> Self {
        Self {
            naming,
            require_body_name,
        }
    }

    /// Builds the signatures of `operation`, one per response content entry.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedOperationKind`],
    /// [`Error::UnsupportedResponseStatus`], [`Error::UnsupportedMediaType`],
    /// [`Error::UnsupportedContentCount`] or
    /// [`Error::MissingRequiredExtension`] for constructs a client cannot
    /// express, and propagates naming and resolver errors.
    pub fn build(
        &self,
        session: &mut GenerationSession<'_>,
        path: &str,
        verb: &str,
        operation: &Operation,
    ) -> Result<Vec<MethodSignature>> {
        let method = HttpMethod::parse(path, verb)?;
        let base_name = self
            .naming
            .resolve_operation_name(path, method, operation)?;

        let (status, response) =
            operation
                .responses
                .first()
                .ok_or_else(|| Error::UnsupportedResponseStatus {
                    path: path.to_string(),
                    verb: method.to_string(),
                    status: "<none>".to_string(),
                })?;

        if status != "200" && status != "201" {
            return Err(Error::UnsupportedResponseStatus {
                path: path.to_string(),
                verb: method.to_string(),
                status: status.clone(),
            });
        }

        let mut variants = Vec::with_capacity(response.content.len().max(1));

        if response.content.is_empty() {
            variants.push((String::new(), None));
        } else {
            let single = response.content.len() == 1;

            for (key, media) in &response.content {
                let media_type =
                    MediaType::parse(key).ok_or_else(|| Error::UnsupportedMediaType {
                        path: path.to_string(),
                        verb: method.to_string(),
                        media_type: key.clone(),
                    })?;

                let suffix = if single { "" } else { media_type.method_suffix() };
                variants.push((suffix.to_string(), Some((media_type, media.schema.as_ref()))));
            }
        }

        let declared = self.declared_parameters(session, path, method, operation)?;
        let mut signatures = Vec::with_capacity(variants.len());

        for (suffix, content) in variants {
            let name = format!("{base_name}{suffix}");

            let (return_type, accept) = match content {
                None => (None, None),
                Some((MediaType::OctetStream, _)) => {
                    (Some(TypeRef::RawResponse), Some(MediaType::OctetStream))
                }
                Some((MediaType::Json, schema)) => {
                    let return_type = match schema {
                        Some(schema) => resolver::resolve(
                            session,
                            schema,
                            Some(&format!("{name}Response")),
                            true,
                        )?,
                        None => TypeRef::Dynamic,
                    };
                    (Some(return_type), Some(MediaType::Json))
                }
            };

            let mut parameters = declared.clone();

            if let Some(body) = &operation.request_body {
                parameters.push(self.body_parameter(session, path, method, body, &name)?);
            }

            parameters.sort_by_key(|parameter| !parameter.required);

            parameters.push(SignatureParameter {
                name: CANCELLATION_PARAMETER.to_string(),
                position: ParameterPosition::Cancellation,
                type_ref: TypeRef::Cancellation,
                required: false,
                description: Some("The token to cancel the current operation.".to_string()),
            });

            signatures.push(MethodSignature {
                name,
                method,
                path: path.to_string(),
                summary: operation.summary.clone(),
                return_type,
                accept,
                parameters,
            });
        }

        Ok(signatures)
    }

    fn declared_parameters(
        &self,
        session: &mut GenerationSession<'_>,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
    ) -> Result<Vec<SignatureParameter>> {
        let mut parameters = Vec::with_capacity(operation.parameters.len());

        for parameter in &operation.parameters {
            let position = match parameter.location {
                ParameterLocation::Path => ParameterPosition::Path,
                ParameterLocation::Query => ParameterPosition::Query,
                ParameterLocation::Header | ParameterLocation::Cookie => {
                    tracing::warn!(
                        "Ignoring {} parameter '{}' of {} {}",
                        parameter.location.as_str(),
                        parameter.name,
                        method,
                        path
                    );
                    continue;
                }
            };

            let type_ref = resolver::resolve(session, &parameter.schema, None, parameter.required)?;

            parameters.push(SignatureParameter {
                name: parameter.name.clone(),
                position,
                type_ref,
                required: parameter.required,
                description: parameter
                    .description
                    .clone()
                    .or_else(|| parameter.schema.description.clone()),
            });
        }

        Ok(parameters)
    }

    fn body_parameter(
        &self,
        session: &mut GenerationSession<'_>,
        path: &str,
        method: HttpMethod,
        body: &RequestBody,
        method_name: &str,
    ) -> Result<SignatureParameter> {
        if body.content.len() != 1 {
            return Err(Error::UnsupportedContentCount {
                path: path.to_string(),
                verb: method.to_string(),
                count: body.content.len(),
            });
        }

        let Some((key, media)) = body.content.first() else {
            return Err(Error::UnsupportedContentCount {
                path: path.to_string(),
                verb: method.to_string(),
                count: 0,
            });
        };

        let media_type = MediaType::parse(key).ok_or_else(|| Error::UnsupportedMediaType {
            path: path.to_string(),
            verb: method.to_string(),
            media_type: key.clone(),
        })?;

        let missing = |reason: &str| Error::MissingRequiredExtension {
            extension: BODY_NAME_EXTENSION.to_string(),
            location: format!("request body of {method} '{path}'"),
            reason: reason.to_string(),
        };

        let (name, type_ref) = match body.extension(BODY_NAME_EXTENSION) {
            Some(Value::String(name)) => {
                let type_ref = match (media_type, media.schema.as_ref()) {
                    (MediaType::OctetStream, _) => {
                        if body.required {
                            TypeRef::ByteStream
                        } else {
                            TypeRef::ByteStream.into_optional()
                        }
                    }
                    (MediaType::Json, Some(schema)) => resolver::resolve(
                        session,
                        schema,
                        Some(&format!("{method_name}Request")),
                        body.required,
                    )?,
                    (MediaType::Json, None) => dynamic(body.required),
                };
                (name.clone(), type_ref)
            }
            Some(_) => return Err(missing("value must be a string")),
            None if self.require_body_name => return Err(missing("extension is missing")),
            None => (DEFAULT_BODY_NAME.to_string(), dynamic(body.required)),
        };

        Ok(SignatureParameter {
            name,
            position: ParameterPosition::Body(media_type),
            type_ref,
            required: body.required,
            description: body.description.clone(),
        })
    }
}

fn dynamic(required: bool) -> TypeRef {
    if required {
        TypeRef::Dynamic
    } else {
        TypeRef::Dynamic.into_optional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::backend_for;
    use crate::description::Document;
    use crate::naming::OperationIdNaming;
    use sdkgen_core::{GeneratorSettings, Target};
    use serde_json::json;

    fn build_with(
        operation: serde_json::Value,
        verb: &str,
        require_body_name: bool,
    ) -> Result<Vec<MethodSignature>> {
        let document = Document::from_value(json!({
            "info": {"version": "v1"},
            "components": {"schemas": {"Widget": {"type": "object", "properties": {}}}}
        }))
        .unwrap();
        let operation: Operation = serde_json::from_value(operation).unwrap();
        let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
        let mut session = GenerationSession::new(backend.as_ref(), &document);
        let naming = OperationIdNaming;

        MethodSignatureBuilder::new(&naming, require_body_name).build(&mut session, "/widgets/{id}", verb, &operation)
    }

    fn build(operation: serde_json::Value) -> Result<Vec<MethodSignature>> {
        build_with(operation, "get", false)
    }

    fn names(signature: &MethodSignature, variant: MethodVariant) -> Vec<&str> {
        signature.parameters(variant).map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_required_parameters_come_first() {
        let signatures = build(json!({
            "operationId": "Widgets_Find",
            "parameters": [
                {"name": "b", "in": "query", "required": true, "schema": {"type": "string"}},
                {"name": "a", "in": "query", "required": false, "schema": {"type": "string"}},
                {"name": "c", "in": "query", "schema": {"type": "string"}},
                {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}
            ],
            "responses": {"200": {}}
        }))
        .unwrap();

        assert_eq!(names(&signatures[0], MethodVariant::Sync), vec!["b", "id", "a", "c"]);
        assert_eq!(
            names(&signatures[0], MethodVariant::Async),
            vec!["b", "id", "a", "c", "cancellationToken"]
        );
    }

    #[test]
    fn test_header_parameters_are_ignored() {
        let signatures = build(json!({
            "operationId": "Widgets_Get",
            "parameters": [
                {"name": "X-Trace", "in": "header", "required": true, "schema": {"type": "string"}},
                {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}
            ],
            "responses": {"200": {}}
        }))
        .unwrap();

        assert_eq!(names(&signatures[0], MethodVariant::Sync), vec!["id"]);
    }

    #[test]
    fn test_no_content_means_void() {
        let signatures = build(json!({"operationId": "Widgets_Ping", "responses": {"201": {}}})).unwrap();
        assert_eq!(signatures.len(), 1);
        assert_eq!(signatures[0].return_type, None);
        assert_eq!(signatures[0].accept, None);
        assert_eq!(signatures[0].parameters(MethodVariant::Sync).count(), 0);
    }

    #[test]
    fn test_octet_stream_response() {
        let signatures = build(json!({
            "operationId": "Widgets_Download",
            "responses": {"200": {"content": {"application/octet-stream": {}}}}
        }))
        .unwrap();

        assert_eq!(signatures[0].name, "Download");
        assert_eq!(signatures[0].return_type, Some(TypeRef::RawResponse));
    }

    #[test]
    fn test_multiple_response_contents() {
        let signatures = build(json!({
            "operationId": "Widgets_Get",
            "responses": {"200": {"content": {
                "application/octet-stream": {},
                "application/json": {"schema": {"$ref": "#/components/schemas/Widget"}}
            }}}
        }))
        .unwrap();

        let names: Vec<_> = signatures.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["GetAsStream", "GetAsJson"]);
        assert_eq!(signatures[1].return_type, Some(TypeRef::Named("Widget".to_string())));
        assert_eq!(signatures[1].method_name(MethodVariant::Async), "GetAsJsonAsync");
    }

    #[test]
    fn test_unsupported_verb_and_status() {
        let err = build_with(json!({"operationId": "W_P", "responses": {"200": {}}}), "patch", false).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperationKind { .. }));

        let err = build(json!({"operationId": "W_G", "responses": {"204": {}}})).unwrap_err();
        assert!(matches!(err, Error::UnsupportedResponseStatus { ref status, .. } if status == "204"));

        let err = build(json!({"operationId": "W_G", "responses": {}})).unwrap_err();
        assert!(matches!(err, Error::UnsupportedResponseStatus { ref status, .. } if status == "<none>"));
    }

    #[test]
    fn test_unsupported_response_media_type() {
        let err = build(json!({
            "operationId": "W_G",
            "responses": {"200": {"content": {"text/plain": {}}}}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedMediaType { ref media_type, .. } if media_type == "text/plain"));
    }

    #[test]
    fn test_named_body_parameter() {
        let signatures = build_with(
            json!({
                "operationId": "Widgets_Create",
                "parameters": [
                    {"name": "dryRun", "in": "query", "schema": {"type": "boolean"}}
                ],
                "requestBody": {
                    "x-name": "payload",
                    "required": true,
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Widget"}}}
                },
                "responses": {"200": {}}
            }),
            "post",
            false,
        )
        .unwrap();

        let signature = &signatures[0];
        assert_eq!(names(signature, MethodVariant::Sync), vec!["payload", "dryRun"]);

        let body = signature.body().unwrap();
        assert_eq!(body.type_ref, TypeRef::Named("Widget".to_string()));
        assert_eq!(signature.content_type(), Some(MediaType::Json));
    }

    #[test]
    fn test_optional_body_keeps_its_place() {
        let signatures = build_with(
            json!({
                "operationId": "Widgets_Update",
                "parameters": [
                    {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}},
                    {"name": "force", "in": "query", "schema": {"type": "boolean"}}
                ],
                "requestBody": {
                    "x-name": "patch",
                    "content": {"application/octet-stream": {}}
                },
                "responses": {"200": {}}
            }),
            "put",
            false,
        )
        .unwrap();

        assert_eq!(names(&signatures[0], MethodVariant::Sync), vec!["id", "force", "patch"]);
        let body = signatures[0].body().unwrap();
        assert_eq!(body.type_ref, TypeRef::Optional(Box::new(TypeRef::ByteStream)));
    }

    #[test]
    fn test_inline_request_body_is_hoisted() {
        let document = Document::from_value(json!({"info": {"version": "v1"}})).unwrap();
        let operation: Operation = serde_json::from_value(json!({
            "operationId": "Jobs_Export",
            "requestBody": {
                "x-name": "parameters",
                "required": true,
                "content": {"application/json": {"schema": {
                    "type": "object",
                    "properties": {"begin": {"type": "string", "format": "date-time"}}
                }}}
            },
            "responses": {"200": {"content": {"application/json": {"schema": {
                "type": "object",
                "properties": {"id": {"type": "string"}}
            }}}}}
        }))
        .unwrap();

        let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
        let mut session = GenerationSession::new(backend.as_ref(), &document);
        let naming = OperationIdNaming;
        MethodSignatureBuilder::new(&naming, false)
            .build(&mut session, "/jobs/export", "post", &operation)
            .unwrap();

        let names: Vec<_> = session.registry().all().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["ExportResponse", "ExportRequest"]);
    }

    #[test]
    fn test_body_without_name_extension() {
        let operation = json!({
            "operationId": "Widgets_Create",
            "requestBody": {"content": {"application/json": {"schema": {"type": "string"}}}},
            "responses": {"200": {}}
        });

        let signatures = build_with(operation.clone(), "post", false).unwrap();
        let body = signatures[0].body().unwrap();
        assert_eq!(body.name, "body");
        assert_eq!(body.type_ref, TypeRef::Optional(Box::new(TypeRef::Dynamic)));

        let err = build_with(operation, "post", true).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredExtension { .. }));
    }

    #[test]
    fn test_non_string_body_name() {
        let err = build_with(
            json!({
                "operationId": "Widgets_Create",
                "requestBody": {"x-name": 42, "content": {"application/json": {}}},
                "responses": {"200": {}}
            }),
            "post",
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn test_body_content_count_and_media_type() {
        let err = build_with(
            json!({
                "operationId": "Widgets_Create",
                "requestBody": {"x-name": "a", "content": {
                    "application/json": {}, "application/octet-stream": {}
                }},
                "responses": {"200": {}}
            }),
            "post",
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedContentCount { count: 2, .. }));

        let err = build_with(
            json!({
                "operationId": "Widgets_Create",
                "requestBody": {"x-name": "a", "content": {"text/csv": {}}},
                "responses": {"200": {}}
            }),
            "post",
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedMediaType { .. }));
    }
}
