use std::fmt;

use crate::container::Container;
use crate::error::ContainerResult;
use crate::identifier::Identifier;
use crate::recipe::Callable;
use crate::value::{Overrides, Value};

/// Handle to the resolving container, passed to factories and decorators.
#[derive(Clone, Copy)]
pub struct ResolverContext<'a> {
    container: &'a Container,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &'a Container {
        self.container
    }

    pub fn make(&self, id: impl Into<Identifier>) -> ContainerResult<Value> {
        self.container.make(id)
    }

    pub fn make_with(&self, id: impl Into<Identifier>, overrides: Overrides) -> ContainerResult<Value> {
        self.container.make_with(id, overrides)
    }

    pub fn has(&self, id: impl Into<Identifier>) -> bool {
        self.container.has(id)
    }

    pub fn call(&self, callable: impl Into<Callable>) -> ContainerResult<Value> {
        self.container.call(callable)
    }

    pub fn tagged(&self, tag: &str) -> ContainerResult<Vec<Value>> {
        self.container.tagged(tag)
    }
}

impl fmt::Debug for ResolverContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResolverContext").field(self.container).finish()
    }
}
