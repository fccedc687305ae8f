//! Template engine for client runtime files using Handlebars.
//!
//! Wraps Handlebars with the built-in C# and Python templates registered.
//! Rendered text is source code, so HTML escaping is disabled.
//!
//! # Examples
//!
//! ```
//! use sdkgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "class {{name}}Client").unwrap();
//!
//! let text = engine.render("greeting", &json!({"name": "Nexus"})).unwrap();
//! assert_eq!(text, "class NexusClient");
//! ```

use handlebars::Handlebars;
use sdkgen_core::{Error, Result};
use serde::Serialize;

/// Built-in templates as `(name, text)` pairs.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("csharp/client", include_str!("../templates/csharp/client.cs.hbs")),
    ("csharp/version", include_str!("../templates/csharp/version.cs.hbs")),
    ("python/shared", include_str!("../templates/python/shared.py.hbs")),
    ("python/client", include_str!("../templates/python/client.py.hbs")),
    ("python/version", include_str!("../templates/python/version.py.hbs")),
    ("python/init", include_str!("../templates/python/init.py.hbs")),
];

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be used across
/// thread boundaries safely.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new template engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, template) in BUILTIN_TEMPLATES {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| Error::TemplateError {
                    template: (*name).to_string(),
                    message: format!("Failed to register template: {e}"),
                })?;
        }

        tracing::debug!("Registered {} built-in templates", BUILTIN_TEMPLATES.len());

        Ok(Self { handlebars })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - A variable the template uses is missing from the context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                template: template_name.to_string(),
                message: format!("Template rendering failed: {e}"),
            })
    }

    /// Registers an additional template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                template: name.to_string(),
                message: format!("Failed to register template: {e}"),
            })
    }

    /// Returns `true` if a template with `name` is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_engine_creation() {
        let engine = TemplateEngine::new().unwrap();

        for (name, _) in BUILTIN_TEMPLATES {
            assert!(engine.has_template(name), "missing template {name}");
        }
    }

    #[test]
    fn test_no_html_escaping() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template_string("generic", "IReadOnlyList<{{item}}>")
            .unwrap();

        let text = engine.render("generic", &json!({"item": "Dictionary<string, int>"})).unwrap();
        assert_eq!(text, "IReadOnlyList<Dictionary<string, int>>");
    }

    #[test]
    fn test_strict_mode_rejects_missing_variables() {
        let mut engine = TemplateEngine::new().unwrap();
        engine.register_template_string("strict", "{{missing}}").unwrap();

        let err = engine.render("strict", &json!({})).unwrap_err();
        assert!(err.is_template_error());
    }

    #[test]
    fn test_unknown_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("nonexistent", &json!({})).unwrap_err();
        assert!(matches!(err, Error::TemplateError { ref template, .. } if template == "nonexistent"));
    }

    #[test]
    fn test_invalid_template_string() {
        let mut engine = TemplateEngine::new().unwrap();
        assert!(engine.register_template_string("broken", "{{#if}}").is_err());
    }
}
