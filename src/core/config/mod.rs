//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order, first hit wins:
//! 1. An explicit path (the CLI's `--config`)
//! 2. `$SVCREG_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/svcreg/config.toml`
//! 4. `~/.svcreg/config.toml`
//!
//! A missing file is not an error; defaults are used. An explicit path that
//! does not exist is.
//!
//! # Example
//!
//! ```no_run
//! use svcreg::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! let catalog = config.category_catalog();
//! println!("{} categories, strict: {}", catalog.len(), config.strict_categories());
//! ```

pub mod schema;

pub use schema::ConfigFile;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::categories::CategoryCatalog;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SVCREG_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults if no file was found)
    pub file: ConfigFile,
    /// Path the configuration was loaded from
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated, or if `explicit` points at a missing file.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = Self::locate(explicit) else {
            log::debug!("no config file found, using defaults");
            return Ok(Self::default());
        };

        let file = Self::read_config(&path)?;
        file.validate()?;
        log::debug!("loaded config from {}", path.display());

        Ok(Self {
            file,
            loaded_from: Some(path),
        })
    }

    /// Find the config file to load.
    fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        // 1. Explicit path; returned even if missing so the read fails loudly
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        // 2. $SVCREG_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 3. $XDG_CONFIG_HOME/svcreg/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("svcreg/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 4. ~/.svcreg/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".svcreg/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Manifest path, relative paths resolved against the config file's
    /// directory.
    pub fn manifest(&self) -> Option<PathBuf> {
        let manifest = self.file.manifest.as_ref()?;
        if manifest.is_absolute() {
            return Some(manifest.clone());
        }
        match self.loaded_from.as_deref().and_then(Path::parent) {
            Some(dir) => Some(dir.join(manifest)),
            None => Some(manifest.clone()),
        }
    }

    /// Whether registrations must name a known category.
    ///
    /// Defaults to `false` if not configured.
    pub fn strict_categories(&self) -> bool {
        self.file.strict_categories.unwrap_or(false)
    }

    /// Default categories merged with the configured ones.
    pub fn category_catalog(&self) -> CategoryCatalog {
        CategoryCatalog::with_defaults().with_user_categories(
            self.file
                .categories
                .iter()
                .map(|(name, description)| (name.as_str(), description.clone())),
        )
    }

    /// Path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
