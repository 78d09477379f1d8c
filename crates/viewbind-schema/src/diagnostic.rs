use crate::error::ErrorTree;
use derive_more::Display;
use serde::Serialize;
use std::fmt;

///
/// Severity
///
/// `Error` marks a dropped declaration; `Fatal` marks an aborted run.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[display("error")]
    Error,

    #[display("fatal")]
    Fatal,
}

///
/// Diagnostic
///
/// `route` names the declaration the message is about; empty when the
/// message concerns the whole run.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub route: String,
    pub message: String,
}

impl Diagnostic {
    pub fn error(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            route: route.into(),
            message: message.into(),
        }
    }

    pub fn fatal(route: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            route: route.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.route.is_empty() {
            write!(f, "{}: {}", self.severity, self.message)
        } else {
            write!(f, "{}: {}: {}", self.severity, self.route, self.message)
        }
    }
}

impl ErrorTree {
    /// One error diagnostic per collected error.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.flatten()
            .into_iter()
            .map(|(route, err)| Diagnostic::error(route, err.to_string()))
            .collect()
    }
}

///
/// DiagnosticSink
///

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    fn report_all(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>)
    where
        Self: Sized,
    {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

///
/// TracingSink
///
/// Forwards every diagnostic to `tracing` at error level.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::error!(
            severity = %diagnostic.severity,
            route = %diagnostic.route,
            "{}",
            diagnostic.message
        );
    }
}
