//! categories
//!
//! The catalog of known item categories.
//!
//! # Overview
//!
//! Categories are optional labels on registered items (`database`,
//! `cache`, ...). A registry with a catalog attached rejects registrations
//! naming an unknown category and stores the normalized name.
//!
//! # Normalization
//!
//! Names are trimmed, every character outside `[A-Za-z0-9_]` becomes `_`,
//! and the result is lowercased. `"File System"` and `"file_system"` are
//! the same category.
//!
//! # Example
//!
//! ```
//! use svcreg::categories::CategoryCatalog;
//!
//! let mut catalog = CategoryCatalog::with_defaults();
//! assert!(catalog.has("Database"));
//!
//! catalog.add("Queues", "Message queue connections").unwrap();
//! assert!(catalog.has("queues"));
//! assert!(catalog.add("QUEUES", "again").is_err());
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

/// Categories every catalog starts with.
pub const DEFAULT_CATEGORIES: [(&str, &str); 9] = [
    (
        "App",
        "General application settings like environment, debug mode, URL, and timezone.",
    ),
    (
        "Database",
        "Configuration for all database connections, including drivers, hosts, and credentials.",
    ),
    (
        "Cache",
        "Settings for all caching stores, such as Redis, Memcached, or file-based caches.",
    ),
    (
        "Services",
        "Credentials and connection settings for third-party services.",
    ),
    (
        "Filesystem",
        "Configuration for storage disks, defining public, private, and temporary file locations.",
    ),
    (
        "Logging",
        "Defines logging channels, severity levels, and output destinations.",
    ),
    (
        "Mail",
        "Settings for all mailer transports, such as SMTP or Sendmail, including credentials.",
    ),
    (
        "Security",
        "Configuration related to application security, such as CORS policies and secret keys.",
    ),
    (
        "Session",
        "Configuration for session management, including driver, lifetime, and cookie settings.",
    ),
];

/// Errors from category operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("category '{0}' has already been registered")]
    AlreadyRegistered(String),
}

/// Normalize a category name.
///
/// ```
/// use svcreg::categories::normalize;
///
/// assert_eq!(normalize("  File System "), "file_system");
/// assert_eq!(normalize("third-party"), "third_party");
/// ```
pub fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Normalized category name → description, kept sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: BTreeMap<String, String>,
}

impl CategoryCatalog {
    /// A catalog holding [`DEFAULT_CATEGORIES`].
    pub fn with_defaults() -> Self {
        let mut catalog = Self::empty();
        catalog.load_defaults();
        catalog
    }

    /// A catalog with no categories at all.
    pub fn empty() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    /// Merge user-defined categories. Existing names are not overwritten.
    pub fn with_user_categories<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, description) in entries {
            self.categories
                .entry(normalize(name.as_ref()))
                .or_insert_with(|| description.into());
        }
        self
    }

    /// Register a new category.
    ///
    /// An empty description falls back to the name as given.
    ///
    /// # Errors
    ///
    /// `CategoryError::AlreadyRegistered` if the normalized name exists.
    pub fn add(&mut self, name: &str, description: &str) -> Result<(), CategoryError> {
        let key = normalize(name);
        if self.categories.contains_key(&key) {
            return Err(CategoryError::AlreadyRegistered(name.to_string()));
        }

        let description = if description.is_empty() {
            name.to_string()
        } else {
            description.to_string()
        };
        self.categories.insert(key, description);
        Ok(())
    }

    pub fn has(&self, name: &str) -> bool {
        self.categories.contains_key(&normalize(name))
    }

    /// Description of a category.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.categories.get(&normalize(name)).map(String::as_str)
    }

    /// All categories, sorted by normalized name.
    pub fn all(&self) -> &BTreeMap<String, String> {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Remove every category, defaults included.
    pub fn clear(&mut self) {
        self.categories.clear();
    }

    /// Drop everything and reload the defaults.
    pub fn reset(&mut self) {
        self.clear();
        self.load_defaults();
    }

    fn load_defaults(&mut self) {
        for (name, description) in DEFAULT_CATEGORIES {
            self.categories
                .insert(normalize(name), description.to_string());
        }
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
