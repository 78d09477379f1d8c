//! Code generation for viewbind: resolve declarations, plan dispatch, and
//! render the binder, adapter, and factory units.

mod adapter;
mod binder;
mod factory;
mod macros;
pub mod plan;
pub mod unit;

pub use viewbind_config_build as config;
pub use viewbind_schema::decl::{JsonSource, JsonStr};

use crate::{
    config::{BuildConfig, ConfigError},
    plan::{AdapterCase, DispatchPlan, FactoryCase, plan, plan_adapter, plan_factory},
    unit::Unit,
};
use derive_more::Display;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::{debug, info};
use viewbind_schema::{
    build::resolve_source,
    decl::{DeclarationSource, SourceError},
    diagnostic::{Diagnostic, DiagnosticSink},
    node::Graph,
};

///
/// Error
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("cannot write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

///
/// EmitError
///
/// A name from the graph that cannot be rendered as Rust.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EmitError {
    #[error("'{path}' is not a valid Rust path")]
    TypePath { path: String },

    #[error("'{ident}' is not a valid Rust identifier")]
    Ident { ident: String },
}

///
/// ArtifactKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    #[display("binder")]
    Binder,

    #[display("adapter")]
    Adapter,

    #[display("factory")]
    Factory,
}

///
/// Artifact
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub source: String,
}

///
/// Generated
///
/// Output of one run. `artifacts` is empty when no binding method survived
/// resolution.
///

#[derive(Clone, Debug, Default)]
pub struct Generated {
    pub artifacts: Vec<Artifact>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generated {
    #[must_use]
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.kind == kind)
    }

    /// Forward the resolution diagnostics to `sink`.
    pub fn report(&self, sink: &mut dyn DiagnosticSink) {
        for diagnostic in &self.diagnostics {
            sink.report(diagnostic.clone());
        }
    }
}

/// Load, resolve, and render. Resolution errors come back as diagnostics;
/// only source, config, and emit failures abort.
pub fn generate(source: impl DeclarationSource, config: &BuildConfig) -> Result<Generated, Error> {
    config.validate()?;

    let resolution = resolve_source(source)?;
    let diagnostics = resolution.diagnostics();

    if resolution.graph.is_empty() {
        info!("no binding methods, nothing to generate");

        return Ok(Generated {
            artifacts: Vec::new(),
            diagnostics,
        });
    }

    let artifacts = CodeBuilder::new(&resolution.graph, config).generate()?;

    Ok(Generated {
        artifacts,
        diagnostics,
    })
}

/// Write every artifact into `out_dir`. The first I/O failure is reported as
/// a fatal diagnostic and aborts the run.
pub fn write_artifacts(
    generated: &Generated,
    out_dir: &Path,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::with_capacity(generated.artifacts.len());

    for artifact in &generated.artifacts {
        let path = out_dir.join(&artifact.file_name);

        if let Err(source) = fs::write(&path, &artifact.source) {
            sink.report(Diagnostic::fatal(
                artifact.kind.to_string(),
                format!("cannot write '{}': {source}", path.display()),
            ));

            return Err(Error::Io { path, source });
        }

        debug!(path = %path.display(), "artifact written");
        written.push(path);
    }

    Ok(written)
}

///
/// CargoSink
///
/// Reports diagnostics as `cargo:warning` lines from a build script.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CargoSink;

impl DiagnosticSink for CargoSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        println!("cargo:warning=viewbind {diagnostic}");
    }
}

///
/// CodeBuilder
///
/// Everything the emitters read: the graph, its projections, and the
/// unit configuration.
///

pub(crate) struct CodeBuilder<'a> {
    pub(crate) config: &'a BuildConfig,
    pub(crate) plan: DispatchPlan,
    pub(crate) adapter_cases: Vec<AdapterCase>,
    pub(crate) factory_cases: Vec<FactoryCase>,
}

impl<'a> CodeBuilder<'a> {
    pub(crate) fn new(graph: &Graph, config: &'a BuildConfig) -> Self {
        Self {
            config,
            plan: plan(graph),
            adapter_cases: plan_adapter(graph),
            factory_cases: plan_factory(graph),
        }
    }

    pub(crate) fn runtime_item(&self, item: &str) -> String {
        format!("{}::{item}", self.config.runtime)
    }

    pub(crate) fn generate(&self) -> Result<Vec<Artifact>, EmitError> {
        let units: [(ArtifactKind, &str, Unit); 3] = [
            (ArtifactKind::Binder, &self.config.binder.file, binder::generate(self)?),
            (ArtifactKind::Adapter, &self.config.adapter.file, adapter::generate(self)?),
            (ArtifactKind::Factory, &self.config.factory.file, factory::generate(self)?),
        ];

        debug!(
            entries = self.plan.entries.len(),
            adapter_cases = self.adapter_cases.len(),
            factory_cases = self.factory_cases.len(),
            "dispatch planned"
        );

        Ok(units
            .into_iter()
            .map(|(kind, file_name, unit)| Artifact {
                kind,
                file_name: file_name.to_string(),
                source: unit.render(),
            })
            .collect())
    }
}

/// Render the three units for an already resolved graph.
pub fn generate_graph(graph: &Graph, config: &BuildConfig) -> Result<Vec<Artifact>, EmitError> {
    if graph.is_empty() {
        return Ok(Vec::new());
    }

    CodeBuilder::new(graph, config).generate()
}
