//! resolve::construct
//!
//! Building catalog types from raw values.
//!
//! # Construction paths
//!
//! Given a declared initializer and a raw value, exactly one path is
//! chosen, checked in this order:
//!
//! 1. More than one required argument but a scalar value: rejected.
//! 2. One required list parameter and an array value: the whole array is
//!    the single argument.
//! 3. Any array value: elements are spread positionally.
//! 4. No required arguments and an object value: default construction,
//!    then each key is assigned to a public field of the same name.
//!    Keys without a matching field are skipped.
//! 5. One required argument: the value itself is the argument.
//!
//! Anything else cannot be constructed. The order matters: an empty array
//! for a type taking one list parameter must go through (2), not (3).

use serde_json::{Map, Value};

use super::catalog::{Arguments, Signature, TypeCatalog, TypeEntry};
use super::errors::{ConstructError, ResolveError};
use super::value::{Instance, Object};

/// How a value will be handed to an initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionPath {
    /// The whole array as one argument.
    WholeContainer,
    /// Array elements as positional arguments.
    Positional,
    /// Default construction followed by field assignment.
    FieldInjection,
    /// The raw value as one argument.
    SingleArgument,
}

impl std::fmt::Display for ConstructionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConstructionPath::WholeContainer => "whole-container",
            ConstructionPath::Positional => "positional",
            ConstructionPath::FieldInjection => "field-injection",
            ConstructionPath::SingleArgument => "single-argument",
        };
        f.write_str(name)
    }
}

/// Choose the construction path for `value` without running user code.
///
/// `signature` is `None` for types that declare no initializer.
///
/// # Errors
///
/// - `ResolveError::NonConstructible` for a non-public initializer
/// - `ResolveError::ArgumentShapeMismatch` for several required arguments
///   and a scalar value
/// - `ResolveError::ResolutionExhausted` if no path applies
pub fn plan(
    type_name: &str,
    signature: Option<&Signature>,
    value: &Value,
) -> Result<ConstructionPath, ResolveError> {
    if let Some(sig) = signature {
        if !sig.is_public() {
            return Err(ResolveError::NonConstructible(type_name.to_string()));
        }
    }

    let required = signature.map_or(0, Signature::required_count);
    let is_container = value.is_array() || value.is_object();

    if required > 1 && !is_container {
        return Err(ResolveError::ArgumentShapeMismatch {
            type_name: type_name.to_string(),
            required,
        });
    }

    if value.is_array() && signature.is_some_and(Signature::takes_whole_list) {
        return Ok(ConstructionPath::WholeContainer);
    }

    if value.is_array() {
        return Ok(ConstructionPath::Positional);
    }

    if required == 0 && value.is_object() {
        return Ok(ConstructionPath::FieldInjection);
    }

    if required == 1 {
        return Ok(ConstructionPath::SingleArgument);
    }

    Err(ResolveError::ResolutionExhausted(type_name.to_string()))
}

/// Construct the type registered as `type_name` from `value`.
///
/// # Errors
///
/// - `ResolveError::UnknownType` if the catalog has no such type
/// - any error from [`plan`]
/// - `ResolveError::Initializer` wrapping the type's own failure, or too
///   few arguments for its declared initializer
pub fn construct(type_name: &str, value: &Value, types: &TypeCatalog) -> Result<Instance, ResolveError> {
    let entry = types
        .get(type_name)
        .ok_or_else(|| ResolveError::UnknownType(type_name.to_string()))?;

    let path = plan(type_name, entry.signature(), value)?;
    log::debug!("constructing '{}' via {} path", entry.name(), path);

    let object = match path {
        ConstructionPath::WholeContainer | ConstructionPath::SingleArgument => {
            invoke(entry, Arguments::new(vec![value.clone()]))
        }
        ConstructionPath::Positional => {
            let elements = value.as_array().cloned().unwrap_or_default();
            invoke(entry, Arguments::new(elements))
        }
        ConstructionPath::FieldInjection => match value.as_object() {
            Some(fields) => inject(entry, fields),
            None => invoke(entry, Arguments::empty()),
        },
    }
    .map_err(|source| ResolveError::Initializer {
        type_name: entry.name().to_string(),
        source,
    })?;

    Ok(Instance::from_boxed(entry.name(), object))
}

/// Check the argument count, then call the initializer.
///
/// Fewer arguments than required, or any argument to a type without an
/// initializer, fail here. Surplus arguments are handed to the type, which
/// may ignore them or reject them through [`Arguments::len`].
fn invoke(entry: &TypeEntry, args: Arguments) -> Result<Box<dyn Object>, ConstructError> {
    let given = args.len();
    match entry.signature() {
        Some(sig) if given < sig.required_count() => Err(ConstructError::Arity {
            min: sig.required_count(),
            max: sig.max_arity(),
            given,
        }),
        None if given > 0 => Err(ConstructError::Arity {
            min: 0,
            max: 0,
            given,
        }),
        _ => entry.build(args),
    }
}

fn inject(entry: &TypeEntry, fields: &Map<String, Value>) -> Result<Box<dyn Object>, ConstructError> {
    let mut object = invoke(entry, Arguments::empty())?;

    for (key, field_value) in fields {
        if entry.has_field(key) {
            entry.assign(object.as_mut(), key, field_value.clone())?;
        } else {
            log::debug!("'{}' has no public field '{}', skipping", entry.name(), key);
        }
    }

    Ok(object)
}
