//! core
//!
//! Core domain types for the registry.
//!
//! # Modules
//!
//! - [`path`] - Dotted registry paths
//! - [`metadata`] - Registration options and item descriptors
//! - [`tree`] - The namespace tree of nodes and items
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Paths are parsed once into a strong type before touching the tree
//! - Metadata is immutable after construction
//! - Tree operations never panic on missing keys

pub mod config;
pub mod metadata;
pub mod path;
pub mod tree;
