use crate::TYPE_PATH_SEPARATOR;
use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TYPE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:::)?[A-Za-z_][A-Za-z0-9_]*(?:::[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("type path pattern is valid")
});

static IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("ident pattern is valid"));

// strict, reserved, and edition-2024 keywords, plus `_`
const KEYWORDS: &[&str] = &[
    "_", "Self", "abstract", "as", "async", "await", "become", "box", "break", "const",
    "continue", "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for",
    "gen", "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override",
    "priv", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

// keywords that may still start a type path
const PATH_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

///
/// ParamTag
///
/// Marker carried by each binding-method parameter.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamTag {
    #[display("component")]
    Component,

    #[display("data")]
    Data,

    #[display("dependency")]
    Dependency,
}

///
/// PathDialect
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathDialect {
    /// `Leading.(nested.)*field:Target`
    #[display("data")]
    Data,

    /// `Leading.(nested.)*field`
    #[display("action")]
    Action,
}

/// Last segment of a type path (`app::views::TextView` -> `TextView`).
#[must_use]
pub fn simple_name(type_path: &str) -> &str {
    type_path
        .rfind(TYPE_PATH_SEPARATOR)
        .map_or(type_path, |idx| &type_path[idx + TYPE_PATH_SEPARATOR.len()..])
}

/// Whether `s` is a plain or `::`-qualified Rust type path.
#[must_use]
pub fn is_type_path(s: &str) -> bool {
    TYPE_PATH.is_match(s)
        && s.trim_start_matches(TYPE_PATH_SEPARATOR)
            .split(TYPE_PATH_SEPARATOR)
            .all(|segment| is_ident(segment) || PATH_KEYWORDS.contains(&segment))
}

/// Whether `s` can be emitted as a plain Rust identifier (keywords excluded).
#[must_use]
pub fn is_ident(s: &str) -> bool {
    IDENT.is_match(s) && !KEYWORDS.contains(&s)
}

/// Whether `s` is one accessor segment: a field name or a tuple index.
#[must_use]
pub fn is_segment(s: &str) -> bool {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return !s.is_empty() && (s == "0" || !s.starts_with('0')) && s.parse::<u32>().is_ok();
    }

    is_ident(s)
}
