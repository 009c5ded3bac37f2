//! svcreg - A hierarchical, dot-addressed service registry
//!
//! Values are registered under dotted paths (`database.default.host`) with
//! optional metadata: a type tag, a category, a description and tags.
//! Resolving a path coerces the raw value according to its type tag, or
//! constructs an instance of a registered type from it.
//!
//! # Architecture
//!
//! - [`core`] - Paths, metadata, the namespace tree and configuration
//! - [`resolve`] - Value resolution: coercion rules and type construction
//! - [`registry`] - The thread-safe registry and its process-wide instance
//! - [`categories`] - The catalog of known item categories
//! - [`manifest`] - Declarative TOML registry contents
//! - [`cli`] - Command-line interface layer
//! - [`ui`] - Output formatting
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use svcreg::{MetaOptions, Registry};
//!
//! let registry = Registry::new();
//! registry
//!     .register("cache.ttl", json!("300"), MetaOptions::typed("int"))
//!     .unwrap();
//! assert_eq!(registry.resolve("cache.ttl").unwrap().as_int(), Some(300));
//! ```

pub mod categories;
pub mod cli;
pub mod core;
pub mod manifest;
pub mod registry;
pub mod resolve;
pub mod ui;

pub use crate::categories::{CategoryCatalog, CategoryError};
pub use crate::core::metadata::{MetaData, MetaOptions};
pub use crate::core::path::{PathError, RegistryPath};
pub use crate::manifest::{Manifest, ManifestError};
pub use crate::registry::{Registry, RegistryBuilder, RegistryError};
pub use crate::resolve::{
    Arguments, Construct, ConstructError, Instance, Param, ParamKind, ResolveError,
    ResolvedValue, Signature, TypeCatalog,
};
