//! resolve::errors
//!
//! Error types for value resolution.
//!
//! [`ResolveError`] covers failures the engine itself detects while picking
//! a construction path. [`ConstructError`] is what a type's own initializer
//! or field setter reports; the engine wraps it in
//! [`ResolveError::Initializer`] without altering it.

use thiserror::Error;

/// Errors raised while resolving a raw value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No constructible type is registered under this identifier.
    #[error("unknown type '{0}'")]
    UnknownType(String),

    /// The type declares an initializer that callers may not invoke.
    #[error("cannot construct '{0}': initializer is not public")]
    NonConstructible(String),

    /// The initializer needs several arguments but the value is a scalar.
    #[error(
        "cannot construct '{type_name}': {required} required arguments need an array or object value"
    )]
    ArgumentShapeMismatch { type_name: String, required: usize },

    /// No construction path matched the initializer and value shape.
    #[error("could not construct '{0}' from the provided value")]
    ResolutionExhausted(String),

    /// The type's own initializer or field setter failed.
    #[error("failed to construct '{type_name}': {source}")]
    Initializer {
        type_name: String,
        #[source]
        source: ConstructError,
    },
}

/// Errors reported by a constructible type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructError {
    /// Wrong number of positional arguments.
    #[error("expected {min} to {max} arguments, got {given}")]
    Arity {
        min: usize,
        max: usize,
        given: usize,
    },

    /// A required argument is absent.
    #[error("missing required argument '{name}' at position {index}")]
    MissingArgument { index: usize, name: String },

    /// An argument could not be converted to the declared type.
    #[error("invalid argument at position {index}: {message}")]
    InvalidArgument { index: usize, message: String },

    /// A field value could not be converted to the field's type.
    #[error("invalid value for field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// Any other failure raised by user code.
    #[error("{0}")]
    Custom(String),
}

impl ConstructError {
    pub fn custom(message: impl Into<String>) -> Self {
        ConstructError::Custom(message.into())
    }
}
