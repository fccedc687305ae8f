//! Target language backends.
//!
//! The resolution engine is language-neutral; a [`Backend`] decides how a
//! resolved type, a model, a method and a sub-client look in one language,
//! and how the finished pieces are laid out into files.

mod csharp;
mod python;

pub use csharp::CSharpBackend;
pub use python::PythonBackend;

use crate::models::GeneratedType;
use crate::resolver::TypeRef;
use crate::signature::{MethodSignature, MethodVariant};
use crate::template_engine::TemplateEngine;
use crate::types::GeneratedCode;
use crate::versioning::VersionModule;
use sdkgen_core::{GeneratorSettings, Result, Target};
use std::fmt;

/// Shape of the sub-client classes a backend emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientFlavor {
    /// One class carrying both synchronous and asynchronous methods
    Combined,
    /// Class with synchronous methods only
    Sync,
    /// Class with asynchronous methods only
    Async,
}

impl ClientFlavor {
    /// Method variants emitted into a class of this flavor.
    #[must_use]
    pub const fn variants(&self) -> &'static [MethodVariant] {
        match self {
            Self::Combined => &[MethodVariant::Sync, MethodVariant::Async],
            Self::Sync => &[MethodVariant::Sync],
            Self::Async => &[MethodVariant::Async],
        }
    }

    /// Class name suffix distinguishing the asynchronous flavor.
    #[must_use]
    pub const fn class_suffix(&self) -> &'static str {
        match self {
            Self::Combined | Self::Sync => "",
            Self::Async => "Async",
        }
    }
}

/// Language-specific rendering.
pub trait Backend: fmt::Debug {
    /// Target language.
    fn target(&self) -> Target;

    /// Renders a resolved type as a type expression.
    fn render_type(&self, type_ref: &TypeRef) -> String;

    /// Renders a model declaration.
    fn render_model(&self, model: &GeneratedType) -> String;

    /// Sub-client class flavors, in emission order.
    fn client_flavors(&self) -> &'static [ClientFlavor];

    /// Renders the interface declaration of a method.
    ///
    /// Returns `None` for targets without interfaces.
    fn interface_method(&self, signature: &MethodSignature, variant: MethodVariant)
    -> Option<String>;

    /// Renders the implementation of a method.
    fn implementation_method(&self, signature: &MethodSignature, variant: MethodVariant) -> String;

    /// Wraps rendered methods into one sub-client's source text.
    fn sub_client_source(
        &self,
        group: &str,
        flavor: ClientFlavor,
        interface_methods: &[String],
        implementation_methods: &[String],
    ) -> String;

    /// Lays the composed versions out into files.
    ///
    /// # Errors
    ///
    /// Returns [`sdkgen_core::Error::TemplateError`] if rendering fails.
    fn render_files(
        &self,
        engine: &TemplateEngine<'_>,
        versions: &[VersionModule],
    ) -> Result<GeneratedCode>;
}

/// Creates the backend for `target`.
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::backend::backend_for;
/// use sdkgen_codegen::resolver::TypeRef;
/// use sdkgen_core::{GeneratorSettings, Target};
///
/// let settings = GeneratorSettings::default();
/// let csharp = backend_for(Target::CSharp, &settings);
/// let python = backend_for(Target::Python, &settings);
///
/// let list = TypeRef::Sequence(Box::new(TypeRef::Text)).into_optional();
/// assert_eq!(csharp.render_type(&list), "IReadOnlyList<string>?");
/// assert_eq!(python.render_type(&list), "Optional[list[str]]");
/// ```
#[must_use]
pub fn backend_for(target: Target, settings: &GeneratorSettings) -> Box<dyn Backend> {
    match target {
        Target::CSharp => Box::new(CSharpBackend::new(settings.clone())),
        Target::Python => Box::new(PythonBackend::new(settings.clone())),
    }
}

/// Lower-case words of a PascalCase group name, for documentation.
fn group_words(group: &str) -> String {
    crate::naming::to_snake_case(group).replace('_', " ")
}

/// First line of optional documentation, or an empty string.
fn doc_line(text: Option<&str>) -> &str {
    text.and_then(crate::naming::first_line).unwrap_or_default()
}
