//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! manifest = "/etc/myapp/registry.toml"
//! strict_categories = true
//!
//! [categories]
//! Search = "Search engine connections"
//! Queues = "Message broker settings"
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing: category names must contain at
//! least one non-whitespace character and the manifest path must not be
//! empty.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Contents of a `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Manifest loaded by the CLI when `--manifest` is not given
    pub manifest: Option<PathBuf>,

    /// Reject registrations naming unknown categories
    pub strict_categories: Option<bool>,

    /// Extra categories, name to description
    pub categories: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(manifest) = &self.manifest {
            if manifest.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "manifest path cannot be empty".to_string(),
                ));
            }
        }

        for name in self.categories.keys() {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "category names cannot be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}
