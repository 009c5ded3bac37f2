//! resolve::catalog
//!
//! Constructible types, declared up front.
//!
//! # Design
//!
//! A type becomes constructible by implementing [`Construct`] and being
//! registered in a [`TypeCatalog`] under an identifier. The catalog keeps
//! the declared initializer [`Signature`] next to type-erased factory and
//! field-setter functions, so the engine can choose a construction path
//! from the signature alone and only then call into user code.
//!
//! Identifiers are matched case-insensitively.
//!
//! # Example
//!
//! ```
//! use serde_json::Value;
//! use svcreg::resolve::{Arguments, Construct, ConstructError, Param, ParamKind, Signature, TypeCatalog};
//!
//! #[derive(Debug)]
//! struct Endpoint {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Construct for Endpoint {
//!     fn signature() -> Option<Signature> {
//!         Some(Signature::public([
//!             Param::required("host", ParamKind::String),
//!             Param::optional("port", ParamKind::Int),
//!         ]))
//!     }
//!
//!     fn construct(args: Arguments) -> Result<Self, ConstructError> {
//!         Ok(Endpoint {
//!             host: args.required(0, "host")?,
//!             port: args.optional_or(1, 80)?,
//!         })
//!     }
//! }
//!
//! let types = TypeCatalog::new().with::<Endpoint>("Endpoint");
//! assert!(types.contains("endpoint"));
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::ConstructError;
use super::value::Object;

/// Whether callers may invoke an initializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Declared type of an initializer parameter.
///
/// Only [`ParamKind::List`] changes engine behavior: a single required
/// list parameter receives a whole array instead of its spread elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Any,
    Bool,
    Int,
    String,
    List,
    Map,
}

/// One initializer parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    kind: ParamKind,
    required: bool,
}

impl Param {
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// A declared initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    visibility: Visibility,
    params: Vec<Param>,
}

impl Signature {
    pub fn public(params: impl IntoIterator<Item = Param>) -> Self {
        Self {
            visibility: Visibility::Public,
            params: params.into_iter().collect(),
        }
    }

    /// An initializer that exists but cannot be called from outside.
    pub fn private(params: impl IntoIterator<Item = Param>) -> Self {
        Self {
            visibility: Visibility::Private,
            params: params.into_iter().collect(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Number of required parameters.
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| p.required).count()
    }

    /// Number of declared parameters.
    pub fn max_arity(&self) -> usize {
        self.params.len()
    }

    /// True when exactly one parameter is required and the first declared
    /// parameter is a list.
    pub fn takes_whole_list(&self) -> bool {
        self.required_count() == 1
            && self
                .params
                .first()
                .is_some_and(|p| p.kind == ParamKind::List)
    }
}

/// Positional arguments handed to [`Construct::construct`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Vec<Value>,
}

impl Arguments {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw argument at `index`.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Deserialize a required argument.
    ///
    /// # Errors
    ///
    /// - `ConstructError::MissingArgument` if there is no argument at `index`
    /// - `ConstructError::InvalidArgument` if it does not fit `T`
    pub fn required<T: DeserializeOwned>(&self, index: usize, name: &str) -> Result<T, ConstructError> {
        match self.values.get(index) {
            Some(value) => convert_argument(index, value),
            None => Err(ConstructError::MissingArgument {
                index,
                name: name.to_string(),
            }),
        }
    }

    /// Deserialize an optional argument.
    pub fn optional<T: DeserializeOwned>(&self, index: usize) -> Result<Option<T>, ConstructError> {
        self.values
            .get(index)
            .map(|value| convert_argument(index, value))
            .transpose()
    }

    /// Deserialize an optional argument, falling back to `default`.
    pub fn optional_or<T: DeserializeOwned>(&self, index: usize, default: T) -> Result<T, ConstructError> {
        Ok(self.optional(index)?.unwrap_or(default))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

fn convert_argument<T: DeserializeOwned>(index: usize, value: &Value) -> Result<T, ConstructError> {
    serde_json::from_value(value.clone()).map_err(|e| ConstructError::InvalidArgument {
        index,
        message: e.to_string(),
    })
}

/// Deserialize a value assigned to a field.
///
/// Helper for [`Construct::set_field`] implementations.
pub fn field_value<T: DeserializeOwned>(field: &str, value: Value) -> Result<T, ConstructError> {
    serde_json::from_value(value).map_err(|e| ConstructError::InvalidField {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// A type the registry can build from a raw value.
pub trait Construct: fmt::Debug + Send + Sync + Sized + 'static {
    /// The declared initializer, or `None` if the type has none.
    ///
    /// A type without an initializer is built by calling
    /// [`Construct::construct`] with no arguments.
    fn signature() -> Option<Signature>;

    /// Build an instance from positional arguments.
    ///
    /// At least the required arguments of [`Construct::signature`] are
    /// present when this is called. Surplus positional arguments are passed
    /// through; reject them here if the type cares.
    fn construct(args: Arguments) -> Result<Self, ConstructError>;

    /// Fields that may be assigned after default construction.
    fn fields() -> &'static [&'static str] {
        &[]
    }

    /// Assign one of [`Construct::fields`].
    fn set_field(&mut self, field: &str, value: Value) -> Result<(), ConstructError> {
        let _ = value;
        Err(ConstructError::InvalidField {
            field: field.to_string(),
            message: "field is not assignable".to_string(),
        })
    }
}

type ConstructFn = fn(Arguments) -> Result<Box<dyn Object>, ConstructError>;
type SetFieldFn = fn(&mut dyn Object, &str, Value) -> Result<(), ConstructError>;

/// A registered constructible type.
pub struct TypeEntry {
    name: String,
    signature: Option<Signature>,
    fields: &'static [&'static str],
    construct: ConstructFn,
    set_field: SetFieldFn,
}

impl TypeEntry {
    fn of<T: Construct>(name: String) -> Self {
        Self {
            name,
            signature: T::signature(),
            fields: T::fields(),
            construct: construct_erased::<T>,
            set_field: set_field_erased::<T>,
        }
    }

    /// Identifier as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains(&field)
    }

    pub(crate) fn build(&self, args: Arguments) -> Result<Box<dyn Object>, ConstructError> {
        (self.construct)(args)
    }

    pub(crate) fn assign(
        &self,
        object: &mut dyn Object,
        field: &str,
        value: Value,
    ) -> Result<(), ConstructError> {
        (self.set_field)(object, field, value)
    }
}

impl fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeEntry")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("fields", &self.fields)
            .finish()
    }
}

fn construct_erased<T: Construct>(args: Arguments) -> Result<Box<dyn Object>, ConstructError> {
    let value = T::construct(args)?;
    Ok(Box::new(value))
}

fn set_field_erased<T: Construct>(
    object: &mut dyn Object,
    field: &str,
    value: Value,
) -> Result<(), ConstructError> {
    match object.as_any_mut().downcast_mut::<T>() {
        Some(target) => target.set_field(field, value),
        None => Err(ConstructError::custom(format!(
            "instance is not a {}",
            std::any::type_name::<T>()
        ))),
    }
}

/// Identifier → constructible type mapping.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    entries: HashMap<String, TypeEntry>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `identifier`, replacing any previous entry.
    pub fn register<T: Construct>(&mut self, identifier: impl Into<String>) -> &mut Self {
        let name = identifier.into();
        self.entries
            .insert(name.to_ascii_lowercase(), TypeEntry::of::<T>(name));
        self
    }

    /// Builder form of [`TypeCatalog::register`].
    pub fn with<T: Construct>(mut self, identifier: impl Into<String>) -> Self {
        self.register::<T>(identifier);
        self
    }

    pub fn get(&self, identifier: &str) -> Option<&TypeEntry> {
        self.entries.get(&identifier.to_ascii_lowercase())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    /// Registered identifiers, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.values().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Flag {
        on: bool,
    }

    impl Construct for Flag {
        fn signature() -> Option<Signature> {
            None
        }

        fn construct(_args: Arguments) -> Result<Self, ConstructError> {
            Ok(Flag::default())
        }

        fn fields() -> &'static [&'static str] {
            &["on"]
        }

        fn set_field(&mut self, field: &str, value: Value) -> Result<(), ConstructError> {
            match field {
                "on" => self.on = field_value(field, value)?,
                _ => {}
            }
            Ok(())
        }
    }

    #[test]
    fn signature_counts() {
        let sig = Signature::public([
            Param::required("name", ParamKind::String),
            Param::optional("age", ParamKind::Int),
            Param::optional("likes", ParamKind::List),
        ]);
        assert_eq!(sig.required_count(), 1);
        assert_eq!(sig.max_arity(), 3);
        assert!(sig.is_public());
        assert!(!sig.takes_whole_list());

        let list = Signature::public([Param::required("items", ParamKind::List)]);
        assert!(list.takes_whole_list());

        let private = Signature::private([]);
        assert_eq!(private.visibility(), Visibility::Private);
    }

    #[test]
    fn arguments_typed_access() {
        let args = Arguments::new(vec![json!("Apollo"), json!(12)]);
        assert_eq!(args.required::<String>(0, "name").unwrap(), "Apollo");
        assert_eq!(args.optional_or::<u32>(1, 9).unwrap(), 12);
        assert_eq!(args.optional_or::<Vec<String>>(2, vec![]).unwrap(), Vec::<String>::new());
        assert_eq!(args.optional::<String>(5).unwrap(), None);
    }

    #[test]
    fn arguments_report_problems() {
        let args = Arguments::new(vec![json!("not a number")]);
        assert!(matches!(
            args.required::<i64>(0, "count"),
            Err(ConstructError::InvalidArgument { index: 0, .. })
        ));
        assert_eq!(
            args.required::<String>(1, "label"),
            Err(ConstructError::MissingArgument {
                index: 1,
                name: "label".into()
            })
        );
    }

    #[test]
    fn catalog_lookup_is_case_insensitive() {
        let types = TypeCatalog::new().with::<Flag>("Flag");
        assert!(types.contains("flag"));
        assert!(types.contains("FLAG"));
        assert_eq!(types.get("flag").unwrap().name(), "Flag");
        assert!(!types.contains("Other"));
        assert_eq!(types.names(), vec!["Flag"]);
    }

    #[test]
    fn erased_build_and_assign() {
        let types = TypeCatalog::new().with::<Flag>("Flag");
        let entry = types.get("Flag").unwrap();
        assert!(entry.has_field("on"));
        assert!(!entry.has_field("off"));

        let mut object = entry.build(Arguments::empty()).unwrap();
        entry.assign(object.as_mut(), "on", json!(true)).unwrap();
        let flag = (*object).as_any().downcast_ref::<Flag>().unwrap();
        assert_eq!(flag, &Flag { on: true });
    }
}
