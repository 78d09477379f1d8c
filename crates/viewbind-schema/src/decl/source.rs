use crate::decl::DeclarationSet;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// SourceError
///

#[derive(Debug, ThisError)]
pub enum SourceError {
    #[error("cannot read declarations from '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid declaration document: {0}")]
    Json(#[from] serde_json::Error),
}

///
/// DeclarationSource
///
/// Anything that can hand over the declaration records for one run.
/// Host discovery sits behind this; the resolver only sees the records.
///

pub trait DeclarationSource {
    fn load(self) -> Result<DeclarationSet, SourceError>;
}

impl DeclarationSource for DeclarationSet {
    fn load(self) -> Result<DeclarationSet, SourceError> {
        Ok(self)
    }
}

impl DeclarationSource for &DeclarationSet {
    fn load(self) -> Result<DeclarationSet, SourceError> {
        Ok(self.clone())
    }
}

///
/// JsonSource
///
/// A JSON document on disk.
///

#[derive(Clone, Debug)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeclarationSource for JsonSource {
    fn load(self) -> Result<DeclarationSet, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        JsonStr(&text).load()
    }
}

///
/// JsonStr
///
/// An in-memory JSON document.
///

#[derive(Clone, Copy, Debug)]
pub struct JsonStr<'a>(pub &'a str);

impl DeclarationSource for JsonStr<'_> {
    fn load(self) -> Result<DeclarationSet, SourceError> {
        Ok(serde_json::from_str(self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParamTag;

    const DOC: &str = r#"{
        "binding_methods": [{
            "owner_type": "app::Binders",
            "method_name": "bind_text",
            "parameters": [
                { "ty": "app::TextView", "tag": "component" },
                { "ty": "app::TextModel", "tag": "data" },
                { "ty": "app::Fonts", "tag": "dependency" }
            ]
        }],
        "data": [{ "data_type": "app::TextModel", "component_type": "app::TextView" }]
    }"#;

    #[test]
    fn json_document_decodes() {
        let decls = JsonStr(DOC).load().expect("document should decode");

        assert_eq!(decls.binding_methods.len(), 1);
        assert_eq!(decls.data.len(), 1);
        assert!(decls.components.is_empty());

        let method = &decls.binding_methods[0];
        assert!(method.is_public && method.is_static);
        assert_eq!(method.parameters[2].tag, Some(ParamTag::Dependency));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = JsonStr(r#"{ "views": [] }"#).load().unwrap_err();

        assert!(matches!(err, SourceError::Json(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = JsonSource::new("/nonexistent/viewbind.json")
            .load()
            .unwrap_err();

        assert!(err.to_string().contains("/nonexistent/viewbind.json"));
    }
}
