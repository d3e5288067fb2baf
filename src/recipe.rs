//! Recipes: what a binding is resolved from.

use std::fmt;
use std::sync::Arc;

use crate::container::ResolverContext;
use crate::error::ContainerResult;
use crate::identifier::Identifier;
use crate::reflection::ParameterDescriptor;
use crate::value::{Arguments, Object, Value};

pub(crate) type FactoryFn =
    Arc<dyn for<'a> Fn(&ResolverContext<'a>, Arguments) -> ContainerResult<Value> + Send + Sync>;

/// A closure together with its declared parameters.
///
/// The container resolves the parameters the same way it resolves a
/// constructor's (overrides, then type, then default) and passes them
/// positionally. The [`ResolverContext`] gives the closure explicit access to
/// the container for anything its parameters do not cover.
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, Factory, ParameterDescriptor, Value};
///
/// let container = Container::new();
/// container.share("dsn", Value::from("postgres://localhost")).unwrap();
///
/// container.bind("banner", Factory::new(
///     [ParameterDescriptor::new("greeting").with_default("hello")],
///     |ctx, args| {
///         let dsn = ctx.make("dsn")?;
///         Ok(Value::from(format!("{} {}", args.str(0)?, dsn.as_str().unwrap_or(""))))
///     },
/// )).unwrap();
///
/// let banner = container.make("banner").unwrap();
/// assert_eq!(banner.as_str(), Some("hello postgres://localhost"));
/// ```
#[derive(Clone)]
pub struct Factory {
    pub(crate) parameters: Vec<ParameterDescriptor>,
    pub(crate) invoke: FactoryFn,
}

impl Factory {
    pub fn new<P, F, V>(parameters: P, factory: F) -> Self
    where
        P: IntoIterator<Item = ParameterDescriptor>,
        F: Fn(&ResolverContext<'_>, Arguments) -> ContainerResult<V> + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self {
            parameters: parameters.into_iter().collect(),
            invoke: Arc::new(move |ctx: &ResolverContext<'_>, args: Arguments| {
                factory(ctx, args).map(Into::into)
            }),
        }
    }

    /// Factory without declared parameters.
    pub fn from_fn<F, V>(factory: F) -> Self
    where
        F: Fn(&ResolverContext<'_>) -> ContainerResult<V> + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(std::iter::empty(), move |ctx, _| factory(ctx))
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub(crate) fn invoke(&self, ctx: &ResolverContext<'_>, arguments: Arguments) -> ContainerResult<Value> {
        (self.invoke)(ctx, arguments)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// The thing a binding resolves from.
///
/// - `Instance`: an already-built value, returned as-is; the binding becomes shared.
/// - `Factory`: a closure invoked with resolved arguments.
/// - `TypeName`: a class name, `Class@method`, or an interface name that is
///   delegated to the container's own binding for it.
///
/// String conversions produce `TypeName`; use [`Recipe::instance`] to bind a
/// plain string value.
#[derive(Clone)]
pub enum Recipe {
    Instance(Value),
    Factory(Factory),
    TypeName(Identifier),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum RecipeKind {
    Instance,
    Factory,
    TypeName,
}

impl Recipe {
    pub fn instance(value: impl Into<Value>) -> Self {
        Recipe::Instance(value.into())
    }

    pub fn type_name(name: impl Into<Identifier>) -> Self {
        Recipe::TypeName(name.into())
    }

    pub fn factory<P, F, V>(parameters: P, factory: F) -> Self
    where
        P: IntoIterator<Item = ParameterDescriptor>,
        F: Fn(&ResolverContext<'_>, Arguments) -> ContainerResult<V> + Send + Sync + 'static,
        V: Into<Value>,
    {
        Recipe::Factory(Factory::new(parameters, factory))
    }

    pub fn kind(&self) -> RecipeKind {
        match self {
            Recipe::Instance(_) => RecipeKind::Instance,
            Recipe::Factory(_) => RecipeKind::Factory,
            Recipe::TypeName(_) => RecipeKind::TypeName,
        }
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipe::Instance(value) => f.debug_tuple("Instance").field(value).finish(),
            Recipe::Factory(factory) => f.debug_tuple("Factory").field(factory).finish(),
            Recipe::TypeName(name) => f.debug_tuple("TypeName").field(name).finish(),
        }
    }
}

impl From<&str> for Recipe {
    fn from(value: &str) -> Self {
        Recipe::TypeName(Identifier::new(value))
    }
}

impl From<String> for Recipe {
    fn from(value: String) -> Self {
        Recipe::TypeName(Identifier::new(value))
    }
}

impl From<Identifier> for Recipe {
    fn from(value: Identifier) -> Self {
        Recipe::TypeName(value)
    }
}

impl From<Object> for Recipe {
    fn from(value: Object) -> Self {
        Recipe::Instance(Value::Object(value))
    }
}

impl From<Value> for Recipe {
    fn from(value: Value) -> Self {
        Recipe::Instance(value)
    }
}

impl From<Factory> for Recipe {
    fn from(value: Factory) -> Self {
        Recipe::Factory(value)
    }
}

/// What [`Container::call`](crate::Container::call) accepts.
///
/// Only closures and `Type@method` strings are callable; any other value is
/// carried through so the container can report it as not callable.
#[derive(Clone, Debug)]
pub enum Callable {
    Function(Factory),
    Method(String),
    Other(Value),
}

impl From<Factory> for Callable {
    fn from(value: Factory) -> Self {
        Callable::Function(value)
    }
}

impl From<&str> for Callable {
    fn from(value: &str) -> Self {
        Callable::Method(value.to_string())
    }
}

impl From<String> for Callable {
    fn from(value: String) -> Self {
        Callable::Method(value)
    }
}

impl From<Value> for Callable {
    fn from(value: Value) -> Self {
        match value {
            Value::Str(spec) => Callable::Method(spec),
            other => Callable::Other(other),
        }
    }
}
