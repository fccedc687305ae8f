//! Sub-client emission.
//!
//! Turns one [`SubClientGroup`] into source text per client flavor of the
//! session's backend. Groups are visited in order, then paths in document
//! order, then verbs in document order, so the traversal that hoists
//! anonymous models is the same on every run.

use crate::backend::ClientFlavor;
use crate::grouper::SubClientGroup;
use crate::naming::to_pascal_case;
use crate::session::GenerationSession;
use crate::signature::{MethodSignature, MethodSignatureBuilder};
use sdkgen_core::{Error, Result};

/// Rendered sub-client of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubClient {
    /// PascalCase group name
    pub name: String,
    /// Number of generated method signatures (before sync/async expansion)
    pub method_count: usize,
    /// Source text per client flavor, in backend order
    pub sources: Vec<(ClientFlavor, String)>,
}

impl SubClient {
    /// Source text of `flavor`, if the backend emits it.
    #[must_use]
    pub fn source(&self, flavor: ClientFlavor) -> Option<&str> {
        self.sources
            .iter()
            .find(|(candidate, _)| *candidate == flavor)
            .map(|(_, source)| source.as_str())
    }
}

/// Emits sub-clients for grouped operations.
#[derive(Debug)]
pub struct SubClientEmitter<'n> {
    builder: MethodSignatureBuilder<'n>,
}

impl<'n> SubClientEmitter<'n> {
    /// Creates an emitter building signatures with `builder`.
    #[must_use]
    pub const fn new(builder: MethodSignatureBuilder<'n>) -> Self {
        Self { builder }
    }

    /// Emits one [`SubClient`] per group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathLevelParametersUnsupported`] if any path of a
    /// group declares shared parameters, and propagates every signature and
    /// resolver error. The first error aborts the whole pass.
    pub fn emit(
        &self,
        session: &mut GenerationSession<'_>,
        groups: &[SubClientGroup<'_>],
    ) -> Result<Vec<SubClient>> {
        let mut sub_clients = Vec::with_capacity(groups.len());

        for group in groups {
            let name = to_pascal_case(&group.name);
            let signatures = self.signatures(session, group, &name)?;

            tracing::debug!(
                "Emitting sub-client {} with {} methods",
                name,
                signatures.len()
            );

            let backend = session.backend();
            let sources = backend
                .client_flavors()
                .iter()
                .map(|&flavor| {
                    let mut interface_methods = Vec::new();
                    let mut implementation_methods = Vec::new();

                    for signature in &signatures {
                        for &variant in flavor.variants() {
                            if let Some(method) = backend.interface_method(signature, variant) {
                                interface_methods.push(method);
                            }
                            implementation_methods
                                .push(backend.implementation_method(signature, variant));
                        }
                    }

                    let source = backend.sub_client_source(
                        &name,
                        flavor,
                        &interface_methods,
                        &implementation_methods,
                    );

                    (flavor, source)
                })
                .collect();

            sub_clients.push(SubClient {
                name,
                method_count: signatures.len(),
                sources,
            });
        }

        Ok(sub_clients)
    }

    fn signatures(
        &self,
        session: &mut GenerationSession<'_>,
        group: &SubClientGroup<'_>,
        name: &str,
    ) -> Result<Vec<MethodSignature>> {
        let mut signatures = Vec::with_capacity(group.operation_count());

        for (path, item) in &group.paths {
            if !item.parameters.is_empty() {
                return Err(Error::PathLevelParametersUnsupported {
                    path: (*path).to_string(),
                    group: name.to_string(),
                });
            }

            for (verb, operation) in &item.operations {
                signatures.extend(self.builder.build(session, path, verb, operation)?);
            }
        }

        Ok(signatures)
    }
}
