//! resolve::value
//!
//! Resolved results.

use std::any::Any;
use std::fmt;

use serde_json::Value;

/// Object-safe view of a constructed value.
///
/// Implemented for every `'static` type that is `Debug + Send + Sync`.
pub trait Object: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + fmt::Debug + Send + Sync> Object for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A value built by a registered constructible type.
pub struct Instance {
    type_name: String,
    object: Box<dyn Object>,
}

impl Instance {
    pub fn new<T: Any + fmt::Debug + Send + Sync>(type_name: impl Into<String>, value: T) -> Self {
        Self::from_boxed(type_name, Box::new(value))
    }

    pub(crate) fn from_boxed(type_name: impl Into<String>, object: Box<dyn Object>) -> Self {
        Self {
            type_name: type_name.into(),
            object,
        }
    }

    /// Identifier the instance was resolved under.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        (*self.object).as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.object).as_any().downcast_ref::<T>()
    }

    /// Take ownership of the concrete value, if it has type `T`.
    pub fn downcast<T: Any>(self) -> Option<T> {
        self.object.into_any().downcast::<T>().ok().map(|boxed| *boxed)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("object", &self.object)
            .finish()
    }
}

/// The typed result of resolving an item.
#[derive(Debug)]
pub enum ResolvedValue {
    /// Pass-through: the raw value unchanged.
    Raw(Value),
    Bool(bool),
    Int(i64),
    /// An array, or an object kept as a keyed container.
    Array(Value),
    String(String),
    Instance(Instance),
}

impl ResolvedValue {
    /// Short name of the variant, used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedValue::Raw(_) => "raw",
            ResolvedValue::Bool(_) => "bool",
            ResolvedValue::Int(_) => "int",
            ResolvedValue::Array(_) => "array",
            ResolvedValue::String(_) => "string",
            ResolvedValue::Instance(_) => "instance",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ResolvedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ResolvedValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Value> {
        match self {
            ResolvedValue::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            ResolvedValue::Raw(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            ResolvedValue::Instance(i) => Some(i),
            _ => None,
        }
    }

    /// Borrow a constructed instance as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_instance().and_then(Instance::downcast_ref::<T>)
    }

    /// Take a constructed instance as `T`.
    pub fn into_instance<T: Any>(self) -> Option<T> {
        match self {
            ResolvedValue::Instance(instance) => instance.downcast::<T>(),
            _ => None,
        }
    }

    /// JSON form of primitive results; `None` for instances.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            ResolvedValue::Raw(v) | ResolvedValue::Array(v) => Some(v.clone()),
            ResolvedValue::Bool(b) => Some(Value::Bool(*b)),
            ResolvedValue::Int(i) => Some(Value::from(*i)),
            ResolvedValue::String(s) => Some(Value::String(s.clone())),
            ResolvedValue::Instance(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    #[test]
    fn instance_downcasts() {
        let instance = Instance::new("Point", Point { x: 1, y: 2 });
        assert_eq!(instance.type_name(), "Point");
        assert!(instance.is::<Point>());
        assert!(!instance.is::<String>());
        assert_eq!(instance.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
        assert!(instance.downcast_ref::<String>().is_none());
        assert_eq!(instance.downcast::<Point>(), Some(Point { x: 1, y: 2 }));
    }

    #[test]
    fn downcast_to_wrong_type_is_none() {
        let instance = Instance::new("Point", Point { x: 0, y: 0 });
        assert!(instance.downcast::<u8>().is_none());
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(ResolvedValue::Int(3).as_int(), Some(3));
        assert_eq!(ResolvedValue::Int(3).as_bool(), None);
        assert_eq!(ResolvedValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ResolvedValue::String("x".into()).as_str(), Some("x"));
        assert_eq!(
            ResolvedValue::Array(json!([1])).as_array(),
            Some(&json!([1]))
        );
        assert_eq!(ResolvedValue::Raw(json!(null)).as_raw(), Some(&json!(null)));
    }

    #[test]
    fn to_json_skips_instances() {
        assert_eq!(ResolvedValue::Int(7).to_json(), Some(json!(7)));
        assert_eq!(ResolvedValue::Bool(false).to_json(), Some(json!(false)));
        let instance = ResolvedValue::Instance(Instance::new("Point", Point { x: 0, y: 0 }));
        assert_eq!(instance.kind(), "instance");
        assert!(instance.to_json().is_none());
    }
}
