use crate::EmitError;
use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use std::{collections::BTreeSet, fmt::Write};
use syn::{Ident, Index, Path};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by viewbind-build. Do not edit.";

///
/// Unit
///
/// One generated source file: a sorted import set followed by items in the
/// order they were pushed.
///

#[derive(Debug, Default)]
pub struct Unit {
    imports: BTreeSet<String>,
    items: Vec<TokenStream>,
}

impl Unit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `use` for a fully qualified path; repeats are ignored.
    pub fn import(&mut self, path: &str) -> Result<(), EmitError> {
        let parsed = parse_path(path)?;
        self.imports.insert(parsed.to_token_stream().to_string());

        Ok(())
    }

    pub fn push(&mut self, item: TokenStream) {
        self.items.push(item);
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(GENERATED_HEADER);
        out.push('\n');

        for import in &self.imports {
            let _ = writeln!(out, "use {import};");
        }

        for item in &self.items {
            out.push('\n');
            out.push_str(&item.to_string());
            out.push('\n');
        }

        out
    }
}

pub fn parse_path(path: &str) -> Result<Path, EmitError> {
    syn::parse_str(path).map_err(|_| EmitError::TypePath {
        path: path.to_string(),
    })
}

pub fn parse_ident(ident: &str) -> Result<Ident, EmitError> {
    syn::parse_str(ident).map_err(|_| EmitError::Ident {
        ident: ident.to_string(),
    })
}

/// `a.b.0` -> `.a.b.0` member chain, appended to some receiver.
pub fn access_tokens(access_path: &str) -> Result<TokenStream, EmitError> {
    let mut tokens = quote!();

    for segment in access_path.split('.') {
        if let Ok(index) = segment.parse::<u32>() {
            let index = Index {
                index,
                span: Span::call_site(),
            };
            tokens.extend(quote!(.#index));
        } else {
            let ident = parse_ident(segment)?;
            tokens.extend(quote!(.#ident));
        }
    }

    Ok(tokens)
}
