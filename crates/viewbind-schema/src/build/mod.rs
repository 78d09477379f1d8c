//! Binding-model resolution: declarations in, validated graph out.
//!
//! Phases run in a fixed order so the accepted graph does not depend on the
//! order of the records inside the input:
//! 1. binding methods (every later phase consults the method table)
//! 2. explicit component declarations
//! 3. data declarations
//! 4. field bindings
//! 5. field actions
//! 6. class actions
//!
//! Rejections are collected in an [`ErrorTree`] and never stop the pass.

mod component;
mod field;
mod method;
mod validate;

use crate::{
    Error,
    decl::{DeclarationSet, DeclarationSource, SourceError},
    diagnostic::Diagnostic,
    error::ErrorTree,
    node::Graph,
};
use tracing::debug;

///
/// Resolution
///
/// Result of one resolution run. `errors` lists everything that was dropped.
///

#[derive(Clone, Debug, Default)]
pub struct Resolution {
    pub graph: Graph,
    pub errors: ErrorTree,
}

impl Resolution {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.diagnostics()
    }

    /// The graph, or every collected error if anything was dropped.
    pub fn into_result(self) -> Result<Graph, Error> {
        self.errors.result().map_err(Error::Resolution)?;

        Ok(self.graph)
    }
}

/// Resolve a declaration set into a fresh graph.
#[must_use]
pub fn resolve(decls: &DeclarationSet) -> Resolution {
    debug!(declarations = decls.len(), "resolving binding declarations");

    let mut builder = Builder::default();
    builder.binding_methods(&decls.binding_methods);
    builder.components(&decls.components);
    builder.data(&decls.data);
    builder.field_bindings(&decls.field_bindings);
    builder.field_actions(&decls.field_actions);
    builder.class_actions(&decls.class_actions);

    builder.finish()
}

/// Load declarations from a source, then resolve them.
pub fn resolve_source(source: impl DeclarationSource) -> Result<Resolution, SourceError> {
    let decls = source.load()?;

    Ok(resolve(&decls))
}

///
/// Builder
///
/// Owns the graph under construction for a single run.
///

#[derive(Debug, Default)]
pub(crate) struct Builder {
    graph: Graph,
    errors: ErrorTree,
}

impl Builder {
    fn finish(self) -> Resolution {
        debug!(
            methods = self.graph.methods.len(),
            components = self.graph.components.len(),
            data = self.graph.data.len(),
            errors = self.errors.len(),
            "binding graph resolved"
        );

        Resolution {
            graph: self.graph,
            errors: self.errors,
        }
    }
}
