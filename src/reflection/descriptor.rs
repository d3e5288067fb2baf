//! Type, constructor, method and parameter descriptors.
//!
//! Rust has no runtime reflection, so the container learns how to build a
//! type from an explicit descriptor: the parameter list (names, declared
//! types, defaults) and a function that turns resolved positional arguments
//! into an instance. Methods are described the same way, which is what makes
//! `Type@method` recipes, inflections and method injection possible.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{ContainerError, ContainerResult};
use crate::identifier::Identifier;
use crate::value::{Arguments, Object, Value};

pub(crate) type ConstructorFn = Arc<dyn Fn(Arguments) -> ContainerResult<Object> + Send + Sync>;
pub(crate) type MethodFn = Arc<dyn Fn(&Object, Arguments) -> ContainerResult<Value> + Send + Sync>;

/// A formal parameter of a constructor, method or factory.
///
/// A parameter with a `declared_type` is resolved from the container by that
/// identifier when the caller does not override it. Parameters without one
/// are primitives: they take the override, else the default, else `Null`.
///
/// ```rust
/// use wiring::{ParameterDescriptor, Value};
///
/// let logger = ParameterDescriptor::typed("logger", "Logger");
/// let retries = ParameterDescriptor::new("retries").with_default(3);
///
/// assert_eq!(logger.declared_type.as_ref().unwrap().as_str(), "Logger");
/// assert!(retries.has_default());
/// assert_eq!(retries.default.as_ref().and_then(Value::as_int), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct ParameterDescriptor {
    pub name: String,
    pub declared_type: Option<Identifier>,
    pub default: Option<Value>,
}

impl ParameterDescriptor {
    /// Untyped parameter without a default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            default: None,
        }
    }

    /// Parameter whose value is resolved from the container by type.
    pub fn typed(name: impl Into<String>, declared_type: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            declared_type: Some(declared_type.into()),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Parameter list plus the function that builds an instance from it.
#[derive(Clone)]
pub struct Constructor {
    pub(crate) parameters: Vec<ParameterDescriptor>,
    pub(crate) invoke: ConstructorFn,
}

impl Constructor {
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub(crate) fn instantiate(&self, arguments: Arguments) -> ContainerResult<Object> {
        (self.invoke)(arguments)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// A callable method on instances of a class.
#[derive(Clone)]
pub struct MethodDescriptor {
    pub(crate) name: String,
    pub(crate) parameters: Vec<ParameterDescriptor>,
    pub(crate) invoke: MethodFn,
}

impl MethodDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub(crate) fn invoke(&self, receiver: &Object, arguments: Arguments) -> ContainerResult<Value> {
        (self.invoke)(receiver, arguments)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Concrete and instantiable.
    Class,
    /// Abstract; only reachable through a binding.
    Interface,
}

/// Everything the container knows about one named type.
///
/// # Examples
///
/// ```rust
/// use wiring::{ParameterDescriptor, TypeDescriptor, TypeKind, Value};
///
/// struct Engine;
/// struct Car { wheels: i64 }
///
/// let engine = TypeDescriptor::class::<Engine>("Engine")
///     .constructor([], |_| Ok(Engine))
///     .build();
///
/// let car = TypeDescriptor::class::<Car>("Car")
///     .implements("Vehicle")
///     .constructor(
///         [
///             ParameterDescriptor::typed("engine", "Engine"),
///             ParameterDescriptor::new("wheels").with_default(4),
///         ],
///         |args| Ok(Car { wheels: args.int(1)? }),
///     )
///     .method("wheels", [], |car: &Car, _| Ok(Value::Int(car.wheels)))
///     .build();
///
/// assert_eq!(engine.kind(), TypeKind::Class);
/// assert!(car.has_method("wheels"));
/// assert_eq!(car.supertypes()[0].as_str(), "Vehicle");
/// ```
#[derive(Clone)]
pub struct TypeDescriptor {
    name: Identifier,
    kind: TypeKind,
    supertypes: Vec<Identifier>,
    constructor: Option<Constructor>,
    methods: HashMap<String, MethodDescriptor>,
}

impl TypeDescriptor {
    /// Starts describing a concrete type backed by the Rust type `T`.
    pub fn class<T: Any + Send + Sync>(name: impl Into<Identifier>) -> ClassBuilder<T> {
        ClassBuilder {
            name: name.into(),
            supertypes: Vec::new(),
            constructor: None,
            methods: HashMap::new(),
            _marker: PhantomData,
        }
    }

    /// Describes an interface. `parents` are the interfaces it extends.
    pub fn interface<I, P>(name: impl Into<Identifier>, parents: I) -> TypeDescriptor
    where
        I: IntoIterator<Item = P>,
        P: Into<Identifier>,
    {
        TypeDescriptor {
            name: name.into(),
            kind: TypeKind::Interface,
            supertypes: parents.into_iter().map(Into::into).collect(),
            constructor: None,
            methods: HashMap::new(),
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Direct supertypes (parent class and implemented interfaces).
    pub fn supertypes(&self) -> &[Identifier] {
        &self.supertypes
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.get(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("supertypes", &self.supertypes)
            .field("constructor", &self.constructor)
            .field("methods", &methods)
            .finish()
    }
}

/// Builder for class descriptors, typed on the backing Rust type so method
/// bodies receive `&T` instead of a type-erased object.
pub struct ClassBuilder<T> {
    name: Identifier,
    supertypes: Vec<Identifier>,
    constructor: Option<Constructor>,
    methods: HashMap<String, MethodDescriptor>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ClassBuilder<T> {
    /// Declares the parent class.
    pub fn extends(mut self, parent: impl Into<Identifier>) -> Self {
        self.supertypes.push(parent.into());
        self
    }

    /// Declares an implemented interface.
    pub fn implements(mut self, interface: impl Into<Identifier>) -> Self {
        self.supertypes.push(interface.into());
        self
    }

    /// Declares the constructor. Arguments arrive in `parameters` order.
    pub fn constructor<P, F>(mut self, parameters: P, build: F) -> Self
    where
        P: IntoIterator<Item = ParameterDescriptor>,
        F: Fn(Arguments) -> ContainerResult<T> + Send + Sync + 'static,
    {
        let name = self.name.clone();
        self.constructor = Some(Constructor {
            parameters: parameters.into_iter().collect(),
            invoke: Arc::new(move |args| build(args).map(|value| Object::new(name.clone(), value))),
        });
        self
    }

    /// Declares a method callable on instances of this class.
    pub fn method<P, F>(mut self, name: impl Into<String>, parameters: P, body: F) -> Self
    where
        P: IntoIterator<Item = ParameterDescriptor>,
        F: Fn(&T, Arguments) -> ContainerResult<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let invoke: MethodFn = Arc::new(move |receiver: &Object, args| {
            let this = receiver.downcast_ref::<T>().ok_or_else(|| {
                ContainerError::construction(format!(
                    "{} is not backed by {}",
                    receiver.type_name(),
                    std::any::type_name::<T>()
                ))
            })?;
            body(this, args)
        });
        self.methods.insert(
            name.clone(),
            MethodDescriptor {
                name,
                parameters: parameters.into_iter().collect(),
                invoke,
            },
        );
        self
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            name: self.name,
            kind: TypeKind::Class,
            supertypes: self.supertypes,
            constructor: self.constructor,
            methods: self.methods,
        }
    }
}

impl<T: Any + Send + Sync + Default> ClassBuilder<T> {
    /// Parameterless constructor backed by `T::default()`.
    pub fn default_constructor(self) -> Self {
        self.constructor(std::iter::empty(), |_| Ok(T::default()))
    }
}
