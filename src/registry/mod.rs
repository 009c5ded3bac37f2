//! registry
//!
//! The dot-addressed registry.
//!
//! # Overview
//!
//! A [`Registry`] owns one namespace tree. Registering `app.db.host`
//! creates the nodes `app` and `app.db` on demand and binds `host` to an
//! item holding the raw value and its metadata. Resolving the path runs the
//! value resolution engine against the registry's [`TypeCatalog`].
//!
//! # Structural rules
//!
//! - Re-registering an existing leaf replaces it.
//! - A leaf can never sit above other entries, so registering `a.b` over an
//!   existing `a.b.c`, or `a.b.c` under an existing leaf `a.b`, fails with
//!   [`RegistryError::PathConflict`]. Conflicts are detected before
//!   anything is created, so a failed registration leaves the tree as it was.
//!
//! # Concurrency
//!
//! The tree sits behind a single `RwLock`. `register` and `remove` take the
//! write lock; lookups take the read lock. Resolution runs on a clone of the
//! item after the lock is released, so constructors may use the registry.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use svcreg::core::metadata::MetaOptions;
//! use svcreg::registry::{Registry, RegistryError};
//!
//! let registry = Registry::new();
//! registry.register("app.db.port", json!("5432"), MetaOptions::typed("int")).unwrap();
//!
//! assert_eq!(registry.resolve("app.db.port").unwrap().as_int(), Some(5432));
//! assert!(registry.has("app.db"));
//! assert!(matches!(registry.resolve("app.db"), Err(RegistryError::NotALeaf(_))));
//! ```

use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use thiserror::Error;

use crate::categories::{self, CategoryCatalog};
use crate::core::metadata::{MetaData, MetaOptions};
use crate::core::path::{PathError, RegistryPath};
use crate::core::tree::{Child, Item, Node};
use crate::resolve::{Construct, ResolveError, ResolvedValue, TypeCatalog};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Errors from registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error(transparent)]
    Path(#[from] PathError),

    /// The registration would put a leaf above, or an entry below, a leaf.
    #[error("cannot register '{path}': conflicts with existing entry at '{at}'")]
    PathConflict { path: String, at: String },

    #[error("nothing registered at '{0}'")]
    NotFound(String),

    /// The path names a namespace node, not an item.
    #[error("'{0}' is a namespace, not a registered item")]
    NotALeaf(String),

    /// The path names an item where a namespace was expected.
    #[error("'{0}' is a registered item, not a namespace")]
    NotANode(String),

    #[error("unknown category '{category}' for '{path}'")]
    UnknownCategory { path: String, category: String },

    #[error("failed to resolve '{path}': {source}")]
    Resolve {
        path: String,
        #[source]
        source: ResolveError,
    },
}

impl RegistryError {
    /// The underlying resolution error, if this is one.
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            RegistryError::Resolve { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Hierarchical registry of typed items.
#[derive(Debug, Default)]
pub struct Registry {
    root: RwLock<Node>,
    types: TypeCatalog,
    categories: Option<CategoryCatalog>,
}

impl Registry {
    /// An empty registry with no constructible types and no category checks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The process-wide registry.
    ///
    /// Created on first access unless one was installed with
    /// [`Registry::install_global`]. Concurrent first calls still observe a
    /// single instance.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(|| {
            log::debug!("initializing global registry");
            Registry::new()
        })
    }

    /// Install a configured registry as the process-wide one.
    ///
    /// # Errors
    ///
    /// Returns the registry back if a global instance already exists.
    pub fn install_global(registry: Registry) -> Result<&'static Registry, Registry> {
        GLOBAL.set(registry)?;
        Ok(Self::global())
    }

    pub fn types(&self) -> &TypeCatalog {
        &self.types
    }

    /// The attached category catalog, if registrations are checked.
    pub fn categories(&self) -> Option<&CategoryCatalog> {
        self.categories.as_ref()
    }

    /// Register a raw value at a dotted path.
    ///
    /// # Errors
    ///
    /// - `RegistryError::Path` for an empty path or empty segment
    /// - `RegistryError::UnknownCategory` if a catalog is attached and the
    ///   category is not in it
    /// - `RegistryError::PathConflict` if a leaf would cover a namespace or
    ///   the path runs through an existing leaf
    pub fn register(
        &self,
        path: &str,
        value: impl Into<Value>,
        options: MetaOptions,
    ) -> Result<(), RegistryError> {
        let parsed = RegistryPath::parse(path)?;
        let options = self.check_category(&parsed, options)?;
        let metadata = MetaData::from_options(parsed.to_string(), options);
        let item = Item::new(value.into(), metadata);

        let mut root = self.write_tree();
        check_conflicts(&root, &parsed)?;

        let mut current: &mut Node = &mut root;
        for segment in parsed.parent() {
            if !current.has_child(segment) {
                current.set_child(segment.clone(), Node::new());
            }
            current = match current.get_child_mut(segment) {
                Some(Child::Node(node)) => node,
                _ => {
                    return Err(RegistryError::PathConflict {
                        path: parsed.to_string(),
                        at: segment.clone(),
                    })
                }
            };
        }

        let replaced = current.has_child(parsed.leaf());
        current.set_child(parsed.leaf().to_string(), item);
        log::debug!(
            "{} '{}'",
            if replaced { "replaced" } else { "registered" },
            parsed
        );
        Ok(())
    }

    /// Resolve the item at a dotted path.
    ///
    /// # Errors
    ///
    /// - `RegistryError::NotFound` if nothing is registered there
    /// - `RegistryError::NotALeaf` if the path names a namespace
    /// - `RegistryError::Resolve` if resolution fails
    pub fn resolve(&self, path: &str) -> Result<ResolvedValue, RegistryError> {
        let item = self.item(path)?;
        item.resolve(&self.types)
            .map_err(|source| RegistryError::Resolve {
                path: path.to_string(),
                source,
            })
    }

    /// Whether anything, item or namespace, exists at the path.
    ///
    /// Invalid paths are never present.
    pub fn has(&self, path: &str) -> bool {
        match RegistryPath::parse(path) {
            Ok(parsed) => self.read_tree().descend(parsed.segments()).is_some(),
            Err(_) => false,
        }
    }

    /// Remove whatever is at the path, including any subtree below it.
    ///
    /// Removing a missing path is a no-op.
    ///
    /// # Errors
    ///
    /// Only `RegistryError::Path` for an invalid path.
    pub fn remove(&self, path: &str) -> Result<(), RegistryError> {
        let parsed = RegistryPath::parse(path)?;
        let mut root = self.write_tree();
        if let Some(parent) = root.descend_parent_mut(parsed.parent()) {
            if parent.remove_child(parsed.leaf()).is_some() {
                log::debug!("removed '{}'", parsed);
            }
        }
        Ok(())
    }

    /// A copy of the item at the path.
    pub fn item(&self, path: &str) -> Result<Item, RegistryError> {
        let parsed = RegistryPath::parse(path)?;
        let root = self.read_tree();
        match root.descend(parsed.segments()) {
            Some(Child::Item(item)) => Ok(item.clone()),
            Some(Child::Node(_)) => Err(RegistryError::NotALeaf(parsed.to_string())),
            None => Err(RegistryError::NotFound(parsed.to_string())),
        }
    }

    /// Metadata of the item at the path.
    pub fn metadata(&self, path: &str) -> Result<MetaData, RegistryError> {
        Ok(self.item(path)?.metadata().clone())
    }

    /// The raw, unresolved value at the path.
    pub fn raw(&self, path: &str) -> Result<Value, RegistryError> {
        Ok(self.item(path)?.value().clone())
    }

    /// Direct child keys of a namespace; an empty path lists the root.
    pub fn keys(&self, path: &str) -> Result<Vec<String>, RegistryError> {
        let root = self.read_tree();
        if path.is_empty() {
            return Ok(root.keys());
        }

        let parsed = RegistryPath::parse(path)?;
        match root.descend(parsed.segments()) {
            Some(Child::Node(node)) => Ok(node.keys()),
            Some(Child::Item(_)) => Err(RegistryError::NotANode(parsed.to_string())),
            None => Err(RegistryError::NotFound(parsed.to_string())),
        }
    }

    /// Every item's path and metadata, depth-first in registration order.
    pub fn entries(&self) -> Vec<(String, MetaData)> {
        self.read_tree()
            .leaves()
            .into_iter()
            .map(|(path, item)| (path, item.metadata().clone()))
            .collect()
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.read_tree().leaves().len()
    }

    /// Whether no items are registered. Empty namespaces left behind by
    /// `remove` do not count.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate and normalize the category against the attached catalog.
    fn check_category(
        &self,
        path: &RegistryPath,
        mut options: MetaOptions,
    ) -> Result<MetaOptions, RegistryError> {
        let Some(catalog) = &self.categories else {
            return Ok(options);
        };

        if let Some(category) = &options.category {
            if !catalog.has(category) {
                return Err(RegistryError::UnknownCategory {
                    path: path.to_string(),
                    category: category.clone(),
                });
            }
            let normalized = categories::normalize(category);
            options.category = Some(normalized);
        }
        Ok(options)
    }

    // The tree is only mutated after conflict checks pass, so a poisoned
    // lock still guards a consistent tree.
    fn read_tree(&self) -> RwLockReadGuard<'_, Node> {
        self.root.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tree(&self) -> RwLockWriteGuard<'_, Node> {
        self.root.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Walk the path without mutating and report the first structural conflict.
fn check_conflicts(root: &Node, path: &RegistryPath) -> Result<(), RegistryError> {
    let mut current = root;
    for (depth, segment) in path.parent().iter().enumerate() {
        match current.get_child(segment) {
            None => return Ok(()),
            Some(Child::Node(node)) => current = node,
            Some(Child::Item(_)) => {
                return Err(RegistryError::PathConflict {
                    path: path.to_string(),
                    at: path.segments()[..=depth].join("."),
                })
            }
        }
    }

    if let Some(Child::Node(_)) = current.get_child(path.leaf()) {
        return Err(RegistryError::PathConflict {
            path: path.to_string(),
            at: path.to_string(),
        });
    }

    Ok(())
}

/// Builder for a configured [`Registry`].
///
/// # Example
///
/// ```
/// use svcreg::categories::CategoryCatalog;
/// use svcreg::registry::Registry;
///
/// let registry = Registry::builder()
///     .categories(CategoryCatalog::with_defaults())
///     .build();
/// assert!(registry.categories().is_some());
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: TypeCatalog,
    categories: Option<CategoryCatalog>,
}

impl RegistryBuilder {
    /// Use `types` as the type catalog, replacing any registered so far.
    pub fn types(mut self, types: TypeCatalog) -> Self {
        self.types = types;
        self
    }

    /// Add a constructible type.
    pub fn register_type<T: Construct>(mut self, identifier: impl Into<String>) -> Self {
        self.types.register::<T>(identifier);
        self
    }

    /// Check categories against `catalog` on every registration.
    pub fn categories(mut self, catalog: CategoryCatalog) -> Self {
        self.categories = Some(catalog);
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            root: RwLock::new(Node::new()),
            types: self.types,
            categories: self.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_and_resolve_nested() {
        let registry = Registry::new();
        registry
            .register("a.b.c", json!("12"), MetaOptions::typed("int"))
            .unwrap();

        assert_eq!(registry.resolve("a.b.c").unwrap().as_int(), Some(12));
        assert!(registry.has("a"));
        assert!(registry.has("a.b"));
        assert!(registry.has("a.b.c"));
        assert!(!registry.has("a.b.c.d"));
        assert_eq!(
            registry.resolve("a.b").unwrap_err(),
            RegistryError::NotALeaf("a.b".into())
        );
    }

    #[test]
    fn missing_path_not_found() {
        let registry = Registry::new();
        assert_eq!(
            registry.resolve("nope").unwrap_err(),
            RegistryError::NotFound("nope".into())
        );
    }

    #[test]
    fn walking_through_a_leaf_is_not_found() {
        let registry = Registry::new();
        registry.register("a.b", json!(1), MetaOptions::new()).unwrap();
        assert_eq!(
            registry.resolve("a.b.c").unwrap_err(),
            RegistryError::NotFound("a.b.c".into())
        );
    }

    #[test]
    fn empty_path_rejected() {
        let registry = Registry::new();
        assert_eq!(
            registry.register("", json!(1), MetaOptions::new()),
            Err(RegistryError::Path(PathError::Empty))
        );
        assert!(matches!(
            registry.register("a..b", json!(1), MetaOptions::new()),
            Err(RegistryError::Path(PathError::EmptySegment { .. }))
        ));
        assert!(!registry.has(""));
    }

    #[test]
    fn leaf_replacement_allowed() {
        let registry = Registry::new();
        registry
            .register("app.name", json!("old"), MetaOptions::typed("string"))
            .unwrap();
        registry
            .register("app.name", json!(7), MetaOptions::typed("int"))
            .unwrap();

        assert_eq!(registry.resolve("app.name").unwrap().as_int(), Some(7));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn conflict_child_under_leaf() {
        let registry = Registry::new();
        registry.register("a.b", json!(1), MetaOptions::new()).unwrap();

        let err = registry
            .register("a.b.c", json!(2), MetaOptions::new())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::PathConflict {
                path: "a.b.c".into(),
                at: "a.b".into()
            }
        );
        // Nothing was created by the failed registration.
        assert_eq!(registry.raw("a.b").unwrap(), json!(1));
    }

    #[test]
    fn conflict_leaf_over_namespace() {
        let registry = Registry::new();
        registry.register("a.b.c", json!(2), MetaOptions::new()).unwrap();

        let err = registry
            .register("a.b", json!(1), MetaOptions::new())
            .unwrap_err();
        assert!(matches!(err, RegistryError::PathConflict { .. }));
        assert!(registry.has("a.b.c"));
    }

    #[test]
    fn failed_registration_creates_no_nodes() {
        let registry = Registry::new();
        registry.register("x", json!(1), MetaOptions::new()).unwrap();
        assert!(registry.register("x.y.z", json!(2), MetaOptions::new()).is_err());
        assert_eq!(registry.keys("").unwrap(), vec!["x".to_string()]);
    }

    #[test]
    fn remove_leaf_and_subtree() {
        let registry = Registry::new();
        registry.register("a.b.c", json!(1), MetaOptions::new()).unwrap();
        registry.register("a.d", json!(2), MetaOptions::new()).unwrap();

        registry.remove("a.b").unwrap();
        assert!(!registry.has("a.b"));
        assert!(!registry.has("a.b.c"));
        assert!(registry.has("a.d"));

        // Removing again, or below a leaf, is a no-op.
        registry.remove("a.b").unwrap();
        registry.remove("a.d.e").unwrap();
        assert!(registry.has("a.d"));
        assert!(registry.remove("").is_err());
    }

    #[test]
    fn deep_paths_register_remove_and_drop() {
        let path = vec!["n"; 100_000].join(".");
        let registry = Registry::new();

        registry.register(&path, json!(1), MetaOptions::new()).unwrap();
        assert!(registry.has(&path));
        assert_eq!(registry.raw(&path).unwrap(), json!(1));

        registry.remove("n").unwrap();
        assert!(!registry.has("n"));

        // Dropping a registry that still holds a deep tree.
        registry.register(&path, json!(2), MetaOptions::new()).unwrap();
        drop(registry);
    }

    #[test]
    fn metadata_built_from_options() {
        let registry = Registry::new();
        registry
            .register(
                "mail.host",
                json!("smtp.local"),
                MetaOptions::typed("string")
                    .with_description("SMTP relay")
                    .with_tags(["smtp", "smtp", "relay"]),
            )
            .unwrap();

        let meta = registry.metadata("mail.host").unwrap();
        assert_eq!(meta.name(), "mail.host");
        assert_eq!(meta.type_tag(), Some("string"));
        assert_eq!(meta.description(), Some("SMTP relay"));
        assert_eq!(meta.tags(), ["smtp", "relay"]);
        assert_eq!(meta.category(), None);
    }

    #[test]
    fn categories_checked_when_catalog_attached() {
        let registry = Registry::builder()
            .categories(CategoryCatalog::with_defaults())
            .build();

        registry
            .register(
                "db.host",
                json!("localhost"),
                MetaOptions::new().with_category("Database"),
            )
            .unwrap();
        assert_eq!(
            registry.metadata("db.host").unwrap().category(),
            Some("database")
        );

        let err = registry
            .register("x", json!(1), MetaOptions::new().with_category("Nope"))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownCategory {
                path: "x".into(),
                category: "Nope".into()
            }
        );
    }

    #[test]
    fn categories_unchecked_without_catalog() {
        let registry = Registry::new();
        registry
            .register("x", json!(1), MetaOptions::new().with_category("Anything Goes"))
            .unwrap();
        assert_eq!(
            registry.metadata("x").unwrap().category(),
            Some("Anything Goes")
        );
    }

    #[test]
    fn keys_and_entries_keep_order() {
        let registry = Registry::new();
        registry.register("z.one", json!(1), MetaOptions::new()).unwrap();
        registry.register("a", json!(2), MetaOptions::new()).unwrap();
        registry.register("z.two", json!(3), MetaOptions::new()).unwrap();

        assert_eq!(registry.keys("").unwrap(), vec!["z", "a"]);
        assert_eq!(registry.keys("z").unwrap(), vec!["one", "two"]);
        assert_eq!(
            registry.keys("a").unwrap_err(),
            RegistryError::NotANode("a".into())
        );
        let paths: Vec<String> = registry.entries().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["z.one", "z.two", "a"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn resolution_errors_are_wrapped() {
        let registry = Registry::new();
        registry
            .register("svc", json!({}), MetaOptions::typed("NoSuchType"))
            .unwrap();

        let err = registry.resolve("svc").unwrap_err();
        assert_eq!(
            err.resolve_error(),
            Some(&ResolveError::UnknownType("NoSuchType".into()))
        );
    }
}
