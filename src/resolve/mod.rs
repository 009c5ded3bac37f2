//! resolve
//!
//! The value resolution engine.
//!
//! # Overview
//!
//! Items store raw JSON-shaped values next to a type tag. Resolution turns
//! the pair into a [`ResolvedValue`]:
//!
//! | Tag | Result |
//! |---|---|
//! | absent, `""`, `null`, `obj`, `object` | raw value unchanged |
//! | `bool`, `boolean` | [`coerce::boolean`] |
//! | `array`, `arr`, `list` | [`coerce::array`] |
//! | `int`, `integer`, `number` | [`coerce::integer`] |
//! | `string` | [`coerce::string`] |
//! | anything else | construction through the [`TypeCatalog`] |
//!
//! Resolution is pure: it never mutates the raw value and performs no I/O.
//! The only user code it runs is the initializer and field setters of
//! catalog types.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use svcreg::resolve::{resolve, TypeCatalog};
//!
//! let types = TypeCatalog::new();
//! let port = resolve(&json!("8080"), Some("int"), &types).unwrap();
//! assert_eq!(port.as_int(), Some(8080));
//! ```

pub mod catalog;
pub mod coerce;
pub mod construct;
pub mod errors;
pub mod tag;
pub mod value;

pub use catalog::{
    field_value, Arguments, Construct, Param, ParamKind, Signature, TypeCatalog, TypeEntry,
    Visibility,
};
pub use construct::{plan, ConstructionPath};
pub use errors::{ConstructError, ResolveError};
pub use tag::TypeTag;
pub use value::{Instance, Object, ResolvedValue};

use serde_json::Value;

/// Resolve `value` according to `type_tag`.
///
/// # Errors
///
/// Only class construction can fail; see [`construct::construct`].
pub fn resolve(
    value: &Value,
    type_tag: Option<&str>,
    types: &TypeCatalog,
) -> Result<ResolvedValue, ResolveError> {
    let resolved = match TypeTag::parse(type_tag) {
        TypeTag::PassThrough => ResolvedValue::Raw(value.clone()),
        TypeTag::Bool => ResolvedValue::Bool(coerce::boolean(value)),
        TypeTag::Array => ResolvedValue::Array(coerce::array(value)),
        TypeTag::Int => ResolvedValue::Int(coerce::integer(value)),
        TypeTag::String => ResolvedValue::String(coerce::string(value)),
        TypeTag::Class(name) => ResolvedValue::Instance(construct::construct(name, value, types)?),
    };
    Ok(resolved)
}
