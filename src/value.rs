//! Dynamic values produced and consumed by the container.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ContainerError, ContainerResult};
use crate::identifier::Identifier;

/// Type-erased, shareable object with a runtime type name.
///
/// The runtime type name is what subtype checks (rewrite and `resolving`
/// substitution) are evaluated against, and what method lookups use. Two
/// `Object`s are the same instance when they share the same allocation.
///
/// # Examples
///
/// ```rust
/// use wiring::Object;
///
/// struct Mailer { host: String }
///
/// let mailer = Object::new("Mailer", Mailer { host: "smtp.local".into() });
/// let copy = mailer.clone();
///
/// assert!(mailer.ptr_eq(&copy));
/// assert_eq!(mailer.type_name().as_str(), "Mailer");
/// assert_eq!(mailer.downcast_ref::<Mailer>().unwrap().host, "smtp.local");
/// ```
#[derive(Clone)]
pub struct Object {
    type_name: Identifier,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Object {
    /// Wraps a value under the given runtime type name.
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<Identifier>, value: T) -> Self {
        Self {
            type_name: type_name.into(),
            inner: Arc::new(value),
        }
    }

    /// Wraps an existing `Arc` without reallocating.
    pub fn from_arc<T: Any + Send + Sync>(type_name: impl Into<Identifier>, value: Arc<T>) -> Self {
        Self {
            type_name: type_name.into(),
            inner: value,
        }
    }

    /// Runtime type name.
    pub fn type_name(&self) -> &Identifier {
        &self.type_name
    }

    /// Reference equality.
    #[inline]
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns a typed handle sharing the same allocation.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.inner.clone().downcast::<T>().ok()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({} @ {:p})", self.type_name, Arc::as_ptr(&self.inner))
    }
}

/// A value flowing through recipes, arguments, hooks and decorators.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Shorthand for `Value::Object(Object::new(type_name, value))`.
    pub fn object<T: Any + Send + Sync>(type_name: impl Into<Identifier>, value: T) -> Self {
        Value::Object(Object::new(type_name, value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Runtime type name for objects.
    pub fn type_name(&self) -> Option<&Identifier> {
        self.as_object().map(Object::type_name)
    }

    /// Short description used in error messages.
    pub fn kind(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Object(object) => object.type_name().to_string(),
        }
    }

    /// True when both values are objects backed by the same allocation.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Downcasts an object value.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.as_object().and_then(Object::downcast::<T>)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_object().and_then(Object::downcast_ref::<T>)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

/// Positional arguments handed to constructors, factories and methods.
///
/// The order always matches the declared parameter order, regardless of
/// whether a value came from an override, recursive resolution, or a default.
#[derive(Clone, Debug, Default)]
pub struct Arguments(Vec<Value>);

impl Arguments {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value at `position`, `Null` when out of range.
    pub fn get(&self, position: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.0.get(position).unwrap_or(&NULL)
    }

    /// Typed object handle at `position`.
    pub fn object<T: Any + Send + Sync>(&self, position: usize) -> ContainerResult<Arc<T>> {
        self.get(position)
            .downcast::<T>()
            .ok_or_else(|| mismatch(position, std::any::type_name::<T>()))
    }

    /// Untyped object at `position`.
    pub fn any_object(&self, position: usize) -> ContainerResult<Object> {
        self.get(position)
            .as_object()
            .cloned()
            .ok_or_else(|| mismatch(position, "object"))
    }

    pub fn int(&self, position: usize) -> ContainerResult<i64> {
        self.get(position)
            .as_int()
            .ok_or_else(|| mismatch(position, "int"))
    }

    pub fn bool(&self, position: usize) -> ContainerResult<bool> {
        self.get(position)
            .as_bool()
            .ok_or_else(|| mismatch(position, "bool"))
    }

    pub fn str(&self, position: usize) -> ContainerResult<&str> {
        self.get(position)
            .as_str()
            .ok_or_else(|| mismatch(position, "string"))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

fn mismatch(position: usize, expected: &str) -> ContainerError {
    ContainerError::ArgumentType {
        position,
        expected: expected.to_string(),
    }
}

impl FromIterator<Value> for Arguments {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Named argument overrides supplied by the caller of `make`/`call`.
///
/// An override wins over recursive resolution and defaults for the parameter
/// with the same name, and is passed through without type checking.
///
/// ```rust
/// use wiring::{Overrides, Value};
///
/// let overrides = Overrides::new().with("retries", 3).with("host", "db.local");
/// assert_eq!(overrides.get("retries").and_then(Value::as_int), Some(3));
/// assert!(!overrides.contains("port"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Overrides(HashMap<String, Value>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
