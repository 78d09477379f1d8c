//! Declaration records, path grammar, and the resolved binding graph.
//!
//! Resolution is a single synchronous pass: a [`decl::DeclarationSet`] goes in,
//! a [`node::Graph`] plus an [`error::ErrorTree`] of rejected declarations comes out.

pub mod build;
pub mod decl;
pub mod diagnostic;
pub mod error;
pub mod node;
pub mod path;
pub mod types;

use crate::{decl::SourceError, error::ErrorTree};
use thiserror::Error as ThisError;

/// Separator between the segments of a type path.
pub const TYPE_PATH_SEPARATOR: &str = "::";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{Resolution, resolve},
        decl::*,
        diagnostic::{Diagnostic, DiagnosticSink, Severity},
        error::{ErrorTree, MethodShapeReason, NameKind, ResolveError},
        node::*,
        path::ParsedPath,
        types::{ParamTag, PathDialect, simple_name},
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    SourceError(#[from] SourceError),

    #[error("resolution failed:\n{0}")]
    Resolution(ErrorTree),
}
