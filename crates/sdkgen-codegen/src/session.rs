//! Per-invocation generation state.
//!
//! A [`GenerationSession`] is created at the start of one generation pass
//! over one description document and dropped at the end. It owns the
//! [`AnonymousTypeRegistry`] and is threaded by reference through every
//! resolver and emitter call, so hoisted type names can never leak from one
//! run into the next.

use crate::backend::Backend;
use crate::description::{Document, Schema};
use indexmap::IndexMap;

/// Hoisted type name to emitted declaration text, in first-registration order.
///
/// Registering a name that already exists replaces its text but keeps its
/// original position.
///
/// # Examples
///
/// ```
/// use sdkgen_codegen::session::AnonymousTypeRegistry;
///
/// let mut registry = AnonymousTypeRegistry::new();
/// registry.register("JobResultType", "record A");
/// registry.register("JobErrorType", "record B");
/// registry.register("JobResultType", "record C");
///
/// let names: Vec<_> = registry.all().map(|(name, _)| name).collect();
/// assert_eq!(names, vec!["JobResultType", "JobErrorType"]);
/// assert_eq!(registry.get("JobResultType"), Some("record C"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymousTypeRegistry {
    entries: IndexMap<String, String>,
}

impl AnonymousTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the declaration text of a hoisted type.
    pub fn register(&mut self, name: impl Into<String>, declaration: impl Into<String>) {
        self.entries.insert(name.into(), declaration.into());
    }

    /// Returns the declaration text registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns `true` if `name` has been registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over `(name, declaration)` pairs in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was hoisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State of one generation pass.
#[derive(Debug)]
pub struct GenerationSession<'a> {
    backend: &'a dyn Backend,
    components: &'a IndexMap<String, Schema>,
    registry: AnonymousTypeRegistry,
}

impl<'a> GenerationSession<'a> {
    /// Starts a pass over `document` rendering through `backend`.
    #[must_use]
    pub fn new(backend: &'a dyn Backend, document: &'a Document) -> Self {
        Self {
            backend,
            components: &document.components.schemas,
            registry: AnonymousTypeRegistry::new(),
        }
    }

    /// Backend used to render declarations.
    #[must_use]
    pub fn backend(&self) -> &'a dyn Backend {
        self.backend
    }

    /// Named component schemas of the document.
    #[must_use]
    pub fn components(&self) -> &'a IndexMap<String, Schema> {
        self.components
    }

    /// Returns the component name if `schema` is itself a top-level component node.
    #[must_use]
    pub fn component_name_of(&self, schema: &Schema) -> Option<&'a str> {
        self.components
            .iter()
            .find(|(_, component)| std::ptr::eq(*component, schema))
            .map(|(name, _)| name.as_str())
    }

    /// Hoisted types registered so far.
    #[must_use]
    pub fn registry(&self) -> &AnonymousTypeRegistry {
        &self.registry
    }

    /// Mutable access for the resolver.
    pub fn registry_mut(&mut self) -> &mut AnonymousTypeRegistry {
        &mut self.registry
    }

    /// Ends the pass and hands back the hoisted types.
    #[must_use]
    pub fn into_registry(self) -> AnonymousTypeRegistry {
        self.registry
    }
}
