//! Path grammar for field and action declarations.
//!
//! Two dot-segmented dialects share one shape:
//! - data path:   `Leading.(nested.)*field:Target`
//! - action path: `Leading.(nested.)*field`
//!
//! `Leading` and `Target` are simple data-type names; the segments in between
//! form the accessor chain read from the data value at runtime. A path either
//! matches its dialect in full or it is rejected; there is no partial recovery.

use crate::types::{PathDialect, is_segment};
use regex::Regex;
use std::sync::LazyLock;

const TYPE_TOKEN: &str = "[A-Z][A-Za-z0-9_]+";
const SEGMENT: &str = "(?:[A-Za-z_][A-Za-z0-9_]*|[0-9]+)";

static DATA_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{TYPE_TOKEN}\.(?:{SEGMENT}\.)*{SEGMENT}:{TYPE_TOKEN}$"
    ))
    .expect("data path pattern is valid")
});

static ACTION_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{TYPE_TOKEN}\.(?:{SEGMENT}\.)*{SEGMENT}$"))
        .expect("action path pattern is valid")
});

/// Whether `path` fully matches the given dialect and every accessor segment
/// can be rendered as a Rust field or tuple index.
#[must_use]
pub fn is_valid(path: &str, dialect: PathDialect) -> bool {
    let matched = match dialect {
        PathDialect::Data => DATA_PATH.is_match(path),
        PathDialect::Action => ACTION_PATH.is_match(path),
    };

    matched && access_path(path).split('.').all(is_segment)
}

/// Substring before the first `.`, or the whole path.
#[must_use]
pub fn leading_data_type(path: &str) -> &str {
    path.find('.').map_or(path, |idx| &path[..idx])
}

/// Substring after the last `:`, or the whole path.
#[must_use]
pub fn target_data_type(path: &str) -> &str {
    path.rfind(':').map_or(path, |idx| &path[idx + 1..])
}

/// Accessor chain with the `Leading.` prefix and `:Target` suffix removed.
#[must_use]
pub fn access_path(path: &str) -> &str {
    let rest = path.find('.').map_or(path, |idx| &path[idx + 1..]);

    rest.find(':').map_or(rest, |idx| &rest[..idx])
}

///
/// ParsedPath
///
/// A path that matched its dialect, split into its parts.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParsedPath<'a> {
    pub raw: &'a str,
    pub leading: &'a str,
    pub access: &'a str,

    /// Only present for data paths.
    pub target: Option<&'a str>,
}

impl<'a> ParsedPath<'a> {
    #[must_use]
    pub fn parse(raw: &'a str, dialect: PathDialect) -> Option<Self> {
        if !is_valid(raw, dialect) {
            return None;
        }

        let target = match dialect {
            PathDialect::Data => Some(target_data_type(raw)),
            PathDialect::Action => None,
        };

        Some(Self {
            raw,
            leading: leading_data_type(raw),
            access: access_path(raw),
            target,
        })
    }

    /// Accessor segments in order (`address.street` -> `["address", "street"]`).
    pub fn segments(&self) -> impl Iterator<Item = &'a str> {
        self.access.split('.')
    }
}
