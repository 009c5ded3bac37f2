//! manifest
//!
//! Declarative registry contents.
//!
//! A manifest is a TOML document of `[[entry]]` tables, applied to a
//! registry in document order:
//!
//! ```toml
//! [[entry]]
//! path = "database.default.port"
//! value = "5432"
//! type = "int"
//! category = "Database"
//! description = "Primary database port"
//! tags = ["db", "network"]
//!
//! [[entry]]
//! path = "app.features"
//! value = ["search", "export"]
//! ```
//!
//! Only `path` is required. A missing `value` registers null.
//!
//! # Example
//!
//! ```
//! use svcreg::manifest::Manifest;
//! use svcreg::registry::Registry;
//!
//! let manifest = Manifest::parse(r#"
//!     [[entry]]
//!     path = "app.debug"
//!     value = "yes"
//!     type = "bool"
//! "#).unwrap();
//!
//! let registry = Registry::new();
//! manifest.apply(&registry).unwrap();
//! assert_eq!(registry.resolve("app.debug").unwrap().as_bool(), Some(true));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::metadata::MetaOptions;
use crate::registry::{Registry, RegistryError};

/// Errors from loading or applying a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(String),

    /// A registration failed; earlier entries stay registered.
    #[error("manifest entry '{path}': {source}")]
    Register {
        path: String,
        #[source]
        source: RegistryError,
    },
}

/// One `[[entry]]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub path: String,

    #[serde(default)]
    pub value: Value,

    #[serde(default, rename = "type")]
    pub type_tag: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl ManifestEntry {
    /// Registration options carried by this entry.
    pub fn options(&self) -> MetaOptions {
        MetaOptions {
            type_tag: self.type_tag.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// A parsed manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "entry")]
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let manifest = Self::parse(&contents).map_err(|e| match e {
            ManifestError::Parse(message) => {
                ManifestError::Parse(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;
        log::debug!(
            "loaded {} manifest entries from {}",
            manifest.len(),
            path.display()
        );
        Ok(manifest)
    }

    pub fn parse(contents: &str) -> Result<Self, ManifestError> {
        toml::from_str(contents).map_err(|e| ManifestError::Parse(e.to_string()))
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register every entry in order, returning how many were applied.
    ///
    /// # Errors
    ///
    /// Stops at the first failed registration and reports its path.
    pub fn apply(&self, registry: &Registry) -> Result<usize, ManifestError> {
        for entry in &self.entries {
            registry
                .register(&entry.path, entry.value.clone(), entry.options())
                .map_err(|source| ManifestError::Register {
                    path: entry.path.clone(),
                    source,
                })?;
        }
        Ok(self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryCatalog;
    use serde_json::json;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
        [[entry]]
        path = "database.default.port"
        value = "5432"
        type = "int"
        category = "Database"
        description = "Primary database port"
        tags = ["db", "network"]

        [[entry]]
        path = "app.features"
        value = ["search", "export"]

        [[entry]]
        path = "app.limits"
        value = { requests = 100, burst = 20 }
    "#;

    #[test]
    fn parse_entries_in_order() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let paths: Vec<&str> = manifest.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["database.default.port", "app.features", "app.limits"]
        );

        let first = &manifest.entries()[0];
        assert_eq!(first.type_tag.as_deref(), Some("int"));
        assert_eq!(first.tags, vec!["db", "network"]);
        assert_eq!(manifest.entries()[2].value, json!({"requests": 100, "burst": 20}));
    }

    #[test]
    fn missing_value_is_null() {
        let manifest = Manifest::parse("[[entry]]\npath = \"a\"\n").unwrap();
        assert_eq!(manifest.entries()[0].value, Value::Null);
    }

    #[test]
    fn empty_document() {
        let manifest = Manifest::parse("").unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = Manifest::parse("[[entry]]\npath = \"a\"\ncolour = \"red\"\n");
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }

    #[test]
    fn apply_registers_everything() {
        let registry = Registry::builder()
            .categories(CategoryCatalog::with_defaults())
            .build();
        let applied = Manifest::parse(SAMPLE).unwrap().apply(&registry).unwrap();

        assert_eq!(applied, 3);
        assert_eq!(
            registry.resolve("database.default.port").unwrap().as_int(),
            Some(5432)
        );
        assert_eq!(
            registry.metadata("database.default.port").unwrap().category(),
            Some("database")
        );
        assert_eq!(registry.raw("app.features").unwrap(), json!(["search", "export"]));
    }

    #[test]
    fn apply_stops_at_first_failure() {
        let manifest = Manifest::parse(
            r#"
            [[entry]]
            path = "a.b"
            value = 1

            [[entry]]
            path = "a.b.c"
            value = 2

            [[entry]]
            path = "z"
            value = 3
            "#,
        )
        .unwrap();

        let registry = Registry::new();
        let err = manifest.apply(&registry).unwrap_err();
        match err {
            ManifestError::Register { path, source } => {
                assert_eq!(path, "a.b.c");
                assert!(matches!(source, RegistryError::PathConflict { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.has("a.b"));
        assert!(!registry.has("z"));
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.toml");
        fs::write(&path, SAMPLE).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.len(), 3);

        let missing = Manifest::load(&temp.path().join("absent.toml"));
        assert!(matches!(missing, Err(ManifestError::Read { .. })));
    }
}
