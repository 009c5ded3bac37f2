//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! Command results go to stdout; diagnostics go to stderr and respect the
//! quiet flag.

pub mod output;
