use crate::{node::MethodKey, types::PathDialect};
use derive_more::Display;
use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// ResolveError
///
/// A declaration (or one of its paths) that was dropped from the graph.
/// None of these abort resolution.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ResolveError {
    #[error("the {key} pair already has binding method '{existing}', '{rejected}' is ignored")]
    DuplicateMethod {
        key: MethodKey,
        existing: String,
        rejected: String,
    },

    #[error(
        "cannot exist a duplicate path for the same data model: '{first}' and '{second}' both start at '{data_type}'"
    )]
    DuplicateTarget {
        first: String,
        second: String,
        data_type: String,
    },

    #[error("'{path}' is not a valid {dialect} path")]
    Grammar { path: String, dialect: PathDialect },

    #[error("invalid {kind} '{value}'")]
    InvalidName { kind: NameKind, value: String },

    #[error("{reason}")]
    MethodShape { reason: MethodShapeReason },

    #[error("the {key} pair has no binding method")]
    UnresolvedBinding { key: MethodKey },
}

impl ResolveError {
    pub fn invalid_name(kind: NameKind, value: impl Into<String>) -> Self {
        Self::InvalidName {
            kind,
            value: value.into(),
        }
    }
}

impl From<MethodShapeReason> for ResolveError {
    fn from(reason: MethodShapeReason) -> Self {
        Self::MethodShape { reason }
    }
}

///
/// MethodShapeReason
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum MethodShapeReason {
    #[display("must be public and static")]
    NotPublicStatic,

    #[display("only the first parameter can be tagged as component (found at position {position})")]
    MisplacedComponent { position: usize },

    #[display("only the second parameter can be tagged as data (found at position {position})")]
    MisplacedData { position: usize },

    #[display(
        "dependency parameters must follow the component and data parameters (found at position {position})"
    )]
    MisplacedDependency { position: usize },

    #[display("all parameters must be tagged (position {position} is not)")]
    Untagged { position: usize },

    #[display("must have a component parameter and a data parameter")]
    MissingComponentOrData,
}

///
/// NameKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum NameKind {
    #[display("field name")]
    Field,

    #[display("method name")]
    Method,

    #[display("type path")]
    TypePath,
}

///
/// ErrorTree
///
/// Route-aware collection of resolution errors. Each declaration reports
/// under its own route (`app::views::Card.title`, `app::Binders::bind_text`).
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    pub errors: Vec<ResolveError>,
    pub children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, err: impl Into<ResolveError>) {
        self.errors.push(err.into());
    }

    pub fn add_route(&mut self, route: impl Into<String>, err: impl Into<ResolveError>) {
        self.children.entry(route.into()).or_default().add(err);
    }

    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
        for (route, child) in other.children {
            self.merge_route(route, child);
        }
    }

    pub fn merge_route(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        self.children.entry(route.into()).or_default().merge(other);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.children.values().all(Self::is_empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// All errors paired with their full route, parents before children.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, &ResolveError)> {
        let mut out = Vec::with_capacity(self.len());
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a ResolveError)>) {
        for err in &self.errors {
            out.push((prefix.to_string(), err));
        }

        for (route, child) in &self.children {
            let path = if prefix.is_empty() {
                route.clone()
            } else {
                format!("{prefix} / {route}")
            };
            child.flatten_into(&path, out);
        }
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (route, err) in self.flatten() {
            if route.is_empty() {
                writeln!(f, "{err}")?;
            } else {
                writeln!(f, "{route}: {err}")?;
            }
        }

        Ok(())
    }
}
