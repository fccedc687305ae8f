//! Client SDK generator.
//!
//! Ties the pipeline together: descriptions are composed into versions,
//! each version's sub-clients and models are emitted through the target's
//! backend, and the backend lays everything out into files.
//!
//! # Examples
//!
//! ```
//! use sdkgen_codegen::ClientGenerator;
//! use sdkgen_codegen::description::Document;
//! use sdkgen_core::{GeneratorSettings, Target};
//!
//! let document = Document::from_json_str(r##"{
//!     "info": {"title": "Widgets", "version": "v1"},
//!     "paths": {"/widgets/{id}": {"get": {
//!         "operationId": "Widgets_GetWidget",
//!         "tags": ["Widgets"],
//!         "parameters": [{"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}],
//!         "responses": {"200": {"content": {"application/json": {
//!             "schema": {"$ref": "#/components/schemas/Widget"}
//!         }}}}
//!     }}},
//!     "components": {"schemas": {"Widget": {"type": "object", "properties": {"name": {"type": "string"}}}}}
//! }"##)?;
//!
//! let generator = ClientGenerator::new(GeneratorSettings::default())?;
//! let code = generator.generate(Target::CSharp, &[document])?;
//!
//! assert!(code.file("ApiClient.g.cs").is_some());
//! assert!(code.file("ApiClient.V1.g.cs").unwrap().content.contains("Widget GetWidget(string id);"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::backend::backend_for;
use crate::description::Document;
use crate::naming::{OperationIdNaming, OperationNaming};
use crate::template_engine::TemplateEngine;
use crate::types::GeneratedCode;
use crate::versioning::VersioningComposer;
use sdkgen_core::{GeneratorSettings, Result, Target};

/// Generator for client SDKs.
///
/// Holds no state between calls: every [`ClientGenerator::generate`] call
/// starts fresh sessions, so identical input always yields identical output.
pub struct ClientGenerator<'a> {
    engine: TemplateEngine<'a>,
    settings: GeneratorSettings,
    naming: Box<dyn OperationNaming + 'a>,
}

impl std::fmt::Debug for ClientGenerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientGenerator")
            .field("engine", &self.engine)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<'a> ClientGenerator<'a> {
    /// Creates a generator naming operations by their `operationId`.
    ///
    /// # Errors
    ///
    /// Returns [`sdkgen_core::Error::ConfigError`] if the settings are
    /// invalid, or a template error if the built-in templates fail to load.
    pub fn new(settings: GeneratorSettings) -> Result<Self> {
        Self::with_naming(settings, OperationIdNaming)
    }

    /// Creates a generator with a custom operation-naming strategy.
    ///
    /// # Errors
    ///
    /// Same as [`ClientGenerator::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_codegen::ClientGenerator;
    /// use sdkgen_codegen::naming::PathTableNaming;
    /// use sdkgen_core::GeneratorSettings;
    ///
    /// let naming = PathTableNaming::new().with_entry("/widgets", "Widgets");
    /// let generator = ClientGenerator::with_naming(GeneratorSettings::default(), naming).unwrap();
    /// assert_eq!(generator.settings().client_name, "Api");
    /// ```
    pub fn with_naming(
        settings: GeneratorSettings,
        naming: impl OperationNaming + 'a,
    ) -> Result<Self> {
        settings.validate()?;

        Ok(Self {
            engine: TemplateEngine::new()?,
            settings,
            naming: Box::new(naming),
        })
    }

    /// Returns the settings.
    #[must_use]
    pub const fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generates the client for `target` from one or more descriptions.
    ///
    /// Each document becomes one version accessor on the root client, in
    /// the order given.
    ///
    /// # Errors
    ///
    /// Fails on the first unsupported construct in any document; no
    /// partial output is returned.
    pub fn generate(&self, target: Target, documents: &[Document]) -> Result<GeneratedCode> {
        tracing::info!(
            "Generating {} client '{}' from {} description(s)",
            target,
            self.settings.client_name,
            documents.len()
        );

        let backend = backend_for(target, &self.settings);
        let composer = VersioningComposer::new(self.naming.as_ref(), self.settings.require_body_name);
        let versions = composer.compose(backend.as_ref(), documents)?;
        let code = backend.render_files(&self.engine, &versions)?;

        for file in code.files() {
            tracing::debug!("Generated {} ({} bytes)", file.path, file.content.len());
        }

        tracing::info!(
            "Successfully generated {} files for {} ({} bytes)",
            code.file_count(),
            target,
            code.total_bytes()
        );

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdkgen_core::{Capability, Error, HttpMethod};
    use crate::description::Operation;
    use serde_json::json;

    fn document() -> Document {
        Document::from_value(json!({
            "info": {"title": "Widgets", "version": "1.0"},
            "paths": {"/widgets": {"get": {
                "operationId": "Widgets_GetAll",
                "tags": ["Widgets"],
                "responses": {"200": {"content": {"application/json": {
                    "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Widget"}}
                }}}}
            }}},
            "components": {"schemas": {"Widget": {"type": "object", "properties": {"name": {"type": "string"}}}}}
        }))
        .unwrap()
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = GeneratorSettings::builder().capability(Capability::ExtendedFeatures).build();
        let err = ClientGenerator::new(settings).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_csharp_files() {
        let generator = ClientGenerator::new(GeneratorSettings::default()).unwrap();
        let code = generator.generate(Target::CSharp, &[document()]).unwrap();

        let paths: Vec<_> = code.files().map(|file| file.path.as_str()).collect();
        assert_eq!(paths, vec!["ApiClient.g.cs", "ApiClient.V1_0.g.cs"]);
    }

    #[test]
    fn test_python_files() {
        let generator = ClientGenerator::new(GeneratorSettings::default()).unwrap();
        let code = generator.generate(Target::Python, &[document()]).unwrap();

        let paths: Vec<_> = code.files().map(|file| file.path.as_str()).collect();
        assert_eq!(paths, vec!["_shared.py", "_client.py", "v1_0.py", "__init__.py"]);
    }

    #[test]
    fn test_closure_naming() {
        let naming = |_: &str, method: HttpMethod, _: &Operation| -> sdkgen_core::Result<String> {
            Ok(format!("{}Everything", method.pascal_name()))
        };

        let generator = ClientGenerator::with_naming(GeneratorSettings::default(), naming).unwrap();
        let code = generator.generate(Target::CSharp, &[document()]).unwrap();
        let version = code.file("ApiClient.V1_0.g.cs").unwrap();
        assert!(version.content.contains("IReadOnlyList<Widget> GetEverything();"));
    }

    #[test]
    fn test_errors_abort_generation() {
        let document = Document::from_value(json!({
            "info": {"version": "v1"},
            "paths": {"/widgets": {"patch": {"operationId": "Widgets_Patch", "tags": ["Widgets"], "responses": {}}}}
        }))
        .unwrap();

        let generator = ClientGenerator::new(GeneratorSettings::default()).unwrap();
        let err = generator.generate(Target::Python, &[document]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperationKind { .. }));
    }
}
