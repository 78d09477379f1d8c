//! Build configuration for viewbind code generation (`viewbind.toml`).
//!
//! Every key is optional; an empty file yields [`BuildConfig::default`].
//!
//! ```toml
//! runtime = "::viewbind"
//!
//! [binder]
//! file = "binder.rs"
//! module = "binder"
//! type_name = "Binder"
//! ```

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use viewbind_schema::types::{is_ident, is_type_path};

/// Conventional config file name, looked up next to the declarations.
pub const CONFIG_FILE: &str = "viewbind.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// BuildConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Path of the runtime crate as seen from the generated code.
    pub runtime: String,

    pub binder: UnitConfig,
    pub adapter: UnitConfig,
    pub factory: UnitConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            runtime: "::viewbind".to_string(),
            binder: UnitConfig::new("binder.rs", "binder", "Binder"),
            adapter: UnitConfig::new("adapter.rs", "adapter", "Adapter"),
            factory: UnitConfig::new("factory.rs", "factory", "Factory"),
        }
    }
}

impl BuildConfig {
    /// Read, parse, and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Like [`BuildConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_type_path(&self.runtime) {
            return Err(ConfigError::Invalid(format!(
                "runtime '{}' is not a valid crate path",
                self.runtime
            )));
        }

        let mut files = BTreeSet::new();
        let mut modules = BTreeSet::new();

        for (table, unit) in self.units() {
            unit.validate(table)?;

            if !files.insert(unit.file.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "[{table}] file '{}' is used by another unit",
                    unit.file
                )));
            }
            if !modules.insert(unit.module.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "[{table}] module '{}' is used by another unit",
                    unit.module
                )));
            }
        }

        Ok(())
    }

    /// The three unit tables with their TOML names.
    #[must_use]
    pub fn units(&self) -> [(&'static str, &UnitConfig); 3] {
        [
            ("binder", &self.binder),
            ("adapter", &self.adapter),
            ("factory", &self.factory),
        ]
    }
}

///
/// UnitConfig
///
/// Output file plus the module and type names the unit is reachable under.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UnitConfig {
    pub file: String,
    pub module: String,
    pub type_name: String,
}

impl UnitConfig {
    pub fn new(
        file: impl Into<String>,
        module: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            module: module.into(),
            type_name: type_name.into(),
        }
    }

    fn validate(&self, table: &str) -> Result<(), ConfigError> {
        let stem = self.file.strip_suffix(".rs").unwrap_or_default();
        if stem.is_empty() || self.file.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "[{table}] file '{}' must be a bare '.rs' file name",
                self.file
            )));
        }

        for (key, value) in [("module", &self.module), ("type_name", &self.type_name)] {
            if !is_ident(value) {
                return Err(ConfigError::Invalid(format!(
                    "[{table}] {key} '{value}' is not a valid identifier"
                )));
            }
        }

        Ok(())
    }
}
