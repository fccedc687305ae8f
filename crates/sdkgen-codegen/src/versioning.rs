//! Composition of several description versions under one root client.

use crate::backend::Backend;
use crate::description::Document;
use crate::grouper;
use crate::models;
use crate::naming::OperationNaming;
use crate::session::GenerationSession;
use crate::signature::MethodSignatureBuilder;
use crate::subclient::{SubClient, SubClientEmitter};
use sdkgen_core::{Error, Result, VersionId};
use std::collections::HashSet;

/// Everything generated for one description version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionModule {
    /// Normalized version identifier
    pub version: VersionId,
    /// Description title
    pub title: String,
    /// Description text
    pub description: Option<String>,
    /// Sub-clients in group order
    pub sub_clients: Vec<SubClient>,
    /// Model declarations: components in document order, then hoisted
    /// anonymous types in registration order
    pub models: Vec<String>,
}

/// Builds one [`VersionModule`] per description document.
pub struct VersioningComposer<'n> {
    naming: &'n dyn OperationNaming,
    require_body_name: bool,
}

impl std::fmt::Debug for VersioningComposer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersioningComposer")
            .field("require_body_name", &self.require_body_name)
            .finish_non_exhaustive()
    }
}

impl<'n> VersioningComposer<'n> {
    /// Creates a composer.
    #[must_use]
    pub fn new(naming: &'n dyn OperationNaming, require_body_name: bool) -> Self {
        Self {
            naming,
            require_body_name,
        }
    }

    /// Composes the versions of `documents`, in the order given.
    ///
    /// Every document gets its own [`GenerationSession`], so anonymous type
    /// names never leak from one version into another.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if no document is supplied or two
    /// documents normalize to the same version identifier, and propagates
    /// every grouping, signature and model error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_codegen::backend::backend_for;
    /// use sdkgen_codegen::description::Document;
    /// use sdkgen_codegen::naming::OperationIdNaming;
    /// use sdkgen_codegen::versioning::VersioningComposer;
    /// use sdkgen_core::{GeneratorSettings, Target};
    ///
    /// let v1 = Document::from_json_str(r#"{"info": {"title": "A", "version": "1.0"}}"#).unwrap();
    /// let v2 = Document::from_json_str(r#"{"info": {"title": "A", "version": "2.0"}}"#).unwrap();
    ///
    /// let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
    /// let composer = VersioningComposer::new(&OperationIdNaming, false);
    /// let versions = composer.compose(backend.as_ref(), &[v1, v2]).unwrap();
    ///
    /// assert_eq!(versions[0].version.as_str(), "v1_0");
    /// assert_eq!(versions[1].version.as_str(), "v2_0");
    /// ```
    pub fn compose(&self, backend: &dyn Backend, documents: &[Document]) -> Result<Vec<VersionModule>> {
        if documents.is_empty() {
            return Err(Error::ConfigError {
                message: "at least one description document is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut versions = Vec::with_capacity(documents.len());

        for document in documents {
            let version = VersionId::normalize(&document.info.version);

            if !seen.insert(version.clone()) {
                return Err(Error::ConfigError {
                    message: format!(
                        "descriptions '{}' and an earlier one share the version identifier '{}'",
                        document.info.title, version
                    ),
                });
            }

            tracing::info!("Composing version {} ({})", version, document.info.title);
            versions.push(self.compose_one(backend, document, version)?);
        }

        Ok(versions)
    }

    fn compose_one(
        &self,
        backend: &dyn Backend,
        document: &Document,
        version: VersionId,
    ) -> Result<VersionModule> {
        let mut session = GenerationSession::new(backend, document);

        let groups = grouper::group(&document.paths)?;
        let emitter = SubClientEmitter::new(MethodSignatureBuilder::new(
            self.naming,
            self.require_body_name,
        ));
        let sub_clients = emitter.emit(&mut session, &groups)?;

        let mut models = Vec::with_capacity(document.components.schemas.len());
        for (name, schema) in &document.components.schemas {
            models.push(models::emit(&mut session, name, schema)?);
        }

        let registry = session.into_registry();
        tracing::debug!(
            "Version {}: {} component models, {} hoisted models",
            version,
            models.len(),
            registry.len()
        );
        models.extend(registry.all().map(|(_, declaration)| declaration.to_string()));

        Ok(VersionModule {
            version,
            title: document.info.title.clone(),
            description: document.info.description.clone(),
            sub_clients,
            models,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::backend_for;
    use crate::naming::OperationIdNaming;
    use sdkgen_core::{GeneratorSettings, Target};
    use serde_json::json;

    fn document(version: &str) -> Document {
        Document::from_value(json!({
            "info": {"title": "Nexus", "version": version},
            "paths": {
                "/jobs": {"post": {
                    "operationId": "Jobs_Export",
                    "tags": ["Jobs"],
                    "requestBody": {
                        "x-name": "parameters",
                        "required": true,
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ExportParameters"}}}
                    },
                    "responses": {"200": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "properties": {"id": {"type": "string", "format": "guid"}}
                    }}}}}
                }}
            },
            "components": {"schemas": {
                "ExportParameters": {
                    "type": "object",
                    "properties": {
                        "begin": {"type": "string", "format": "date-time"},
                        "options": {"type": "object", "properties": {"compress": {"type": "boolean"}}}
                    }
                }
            }}
        }))
        .unwrap()
    }

    #[test]
    fn test_models_are_components_then_hoisted() {
        let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
        let composer = VersioningComposer::new(&OperationIdNaming, false);
        let versions = composer.compose(backend.as_ref(), &[document("v1")]).unwrap();

        let models = &versions[0].models;
        assert_eq!(models.len(), 3);
        assert!(models[0].contains("public record ExportParameters("));
        assert!(models[1].contains("public record ExportResponse(Guid Id);"));
        assert!(models[2].contains("public record ExportParametersOptionsType(bool Compress);"));
    }

    #[test]
    fn test_duplicate_version_is_rejected() {
        let backend = backend_for(Target::Python, &GeneratorSettings::default());
        let composer = VersioningComposer::new(&OperationIdNaming, false);
        let err = composer
            .compose(backend.as_ref(), &[document("1.0"), document("v1.0")])
            .unwrap_err();

        assert!(err.is_config_error());
    }

    #[test]
    fn test_no_documents() {
        let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
        let composer = VersioningComposer::new(&OperationIdNaming, false);
        assert!(composer.compose(backend.as_ref(), &[]).is_err());
    }

    #[test]
    fn test_sessions_do_not_leak_between_versions() {
        let backend = backend_for(Target::CSharp, &GeneratorSettings::default());
        let composer = VersioningComposer::new(&OperationIdNaming, false);
        let versions = composer
            .compose(backend.as_ref(), &[document("v1"), document("v2")])
            .unwrap();

        assert_eq!(versions[0].models, versions[1].models);
        assert_eq!(versions[1].version.type_name(), "V2");
    }
}
