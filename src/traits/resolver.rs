//! Lookup-by-identifier capability.

use std::any::Any;
use std::sync::Arc;

use crate::container::{Container, ResolverContext};
use crate::error::{ContainerError, ContainerResult};
use crate::identifier::Identifier;
use crate::value::{Overrides, Value};

/// Object-safe core of the lookup capability.
///
/// Code that only needs "get by id" can depend on this instead of the whole
/// [`Container`].
pub trait ResolverCore: Send + Sync {
    fn resolve(&self, id: &Identifier, overrides: &Overrides) -> ContainerResult<Value>;

    fn contains(&self, id: &Identifier) -> bool;
}

/// Convenience methods over [`ResolverCore`].
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, Resolver, Value};
///
/// fn port(resolver: &impl Resolver) -> i64 {
///     resolver.lookup("port").ok().and_then(|v| v.as_int()).unwrap_or(80)
/// }
///
/// let container = Container::new();
/// assert_eq!(port(&container), 80);
///
/// container.share("port", Value::from(8080)).unwrap();
/// assert_eq!(port(&container), 8080);
/// assert!(container.exists("port"));
/// ```
pub trait Resolver: ResolverCore {
    fn lookup(&self, id: &str) -> ContainerResult<Value> {
        self.resolve(&Identifier::new(id), &Overrides::new())
    }

    fn lookup_with(&self, id: &str, overrides: &Overrides) -> ContainerResult<Value> {
        self.resolve(&Identifier::new(id), overrides)
    }

    fn exists(&self, id: &str) -> bool {
        self.contains(&Identifier::new(id))
    }

    /// Resolves `id` and downcasts the resulting object.
    fn lookup_as<T: Any + Send + Sync>(&self, id: &str) -> ContainerResult<Arc<T>> {
        let value = self.lookup(id)?;
        value.downcast::<T>().ok_or_else(|| {
            ContainerError::construction(format!(
                "{} resolved to {}, not {}",
                id,
                value.kind(),
                std::any::type_name::<T>()
            ))
        })
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}

impl ResolverCore for Container {
    fn resolve(&self, id: &Identifier, overrides: &Overrides) -> ContainerResult<Value> {
        Container::resolve(self, id, overrides)
    }

    fn contains(&self, id: &Identifier) -> bool {
        self.has(id)
    }
}

impl ResolverCore for ResolverContext<'_> {
    fn resolve(&self, id: &Identifier, overrides: &Overrides) -> ContainerResult<Value> {
        Container::resolve(self.container(), id, overrides)
    }

    fn contains(&self, id: &Identifier) -> bool {
        self.container().has(id)
    }
}
