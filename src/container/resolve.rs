//! Resolution: lookup, construction pipeline, memoization and hooks.

use std::sync::Arc;
use std::time::Instant;

use tracing::trace;

use crate::config::PhaseOrder;
use crate::container::{Container, ResolverContext};
use crate::decoration::{apply_decorators, apply_inflections};
use crate::error::{ContainerError, ContainerResult};
use crate::hooks::{fire_resolved, fire_resolving};
use crate::identifier::Identifier;
use crate::internal::StackGuard;
use crate::lifetime::Lifetime;
use crate::recipe::{Callable, Recipe};
use crate::registration::BindingEntry;
use crate::resolver::strategy;
use crate::value::{Overrides, Value};

impl Container {
    /// Resolves `id`.
    ///
    /// Unregistered identifiers naming a known class (or `Class@method`) are
    /// built through a throwaway transient entry; anything else unregistered
    /// is `NotFound`.
    pub fn make(&self, id: impl Into<Identifier>) -> ContainerResult<Value> {
        self.resolve(&id.into(), &Overrides::new())
    }

    /// [`make`](Self::make) with named argument overrides.
    ///
    /// Overrides only matter when something is constructed: a shared binding
    /// that is already memoized ignores them.
    pub fn make_with(&self, id: impl Into<Identifier>, overrides: Overrides) -> ContainerResult<Value> {
        self.resolve(&id.into(), &overrides)
    }

    /// Same as [`make`](Self::make).
    pub fn get(&self, id: impl Into<Identifier>) -> ContainerResult<Value> {
        self.make(id)
    }

    pub fn get_with(&self, id: impl Into<Identifier>, overrides: Overrides) -> ContainerResult<Value> {
        self.make_with(id, overrides)
    }

    /// Invokes a closure or a `Type@method` string with injected arguments.
    ///
    /// `method` is looked up on the descriptor of `Type` only; methods
    /// declared by its supertypes are not inherited. When the method is
    /// missing the constructed `Type` is returned instead.
    pub fn call(&self, callable: impl Into<Callable>) -> ContainerResult<Value> {
        self.call_with(callable, Overrides::new())
    }

    pub fn call_with(&self, callable: impl Into<Callable>, overrides: Overrides) -> ContainerResult<Value> {
        let ctx = ResolverContext::new(self);
        match callable.into() {
            Callable::Function(factory) => strategy::invoke_factory(&ctx, &factory, &overrides),
            Callable::Method(spec) => {
                let id = Identifier::new(&spec);
                if !id.has_method() {
                    return Err(ContainerError::NotCallable(spec));
                }
                trace!(%id, "calling");
                strategy::construct_type_name(&ctx, &id, &overrides)
            }
            Callable::Other(value) => Err(ContainerError::NotCallable(value.kind())),
        }
    }

    /// Resolves every member of `tag` in order. Unknown tags yield an empty
    /// list; the list itself is never cached.
    pub fn tagged(&self, tag: &str) -> ContainerResult<Vec<Value>> {
        let members = self.inner.registry.read().tagged(tag);
        members
            .iter()
            .map(|id| self.resolve(id, &Overrides::new()))
            .collect()
    }

    pub(crate) fn resolve(&self, id: &Identifier, overrides: &Overrides) -> ContainerResult<Value> {
        let entry = match self.entry(id) {
            Some(entry) => entry,
            None if self.is_class(id.split_method().0.as_str()) => {
                trace!(%id, "building unregistered class");
                Arc::new(BindingEntry::new(
                    id.clone(),
                    Recipe::TypeName(id.clone()),
                    Lifetime::Transient,
                ))
            }
            None => return Err(ContainerError::NotFound(id.clone())),
        };
        self.resolve_entry(&entry, overrides)
    }

    pub(crate) fn resolve_entry(
        &self,
        entry: &BindingEntry,
        overrides: &Overrides,
    ) -> ContainerResult<Value> {
        if let Some(value) = entry.resolved() {
            return Ok(value);
        }

        let id = entry.identifier();
        let config = &self.inner.config;
        let _guard = StackGuard::enter(self.inner.id, id, config.detect_cycles, config.max_depth)?;

        let observers = &self.inner.observers;
        let started = observers.has_observers().then(|| {
            observers.resolving(id);
            Instant::now()
        });

        let result = self.build(entry, overrides);

        if let Some(started) = started {
            match &result {
                Ok(_) => observers.resolved(id, started.elapsed()),
                Err(error) => observers.failed(id, error),
            }
        }
        result
    }

    /// construct, post-construction phases, memoize, `resolved` hooks.
    fn build(&self, entry: &BindingEntry, overrides: &Overrides) -> ContainerResult<Value> {
        let recipe = entry.recipe();
        if matches!(recipe, Recipe::Instance(_)) {
            entry.force_shared();
        }

        let id = entry.identifier();
        let ctx = ResolverContext::new(self);
        let raw = match entry.take_seed() {
            Some(seed) => seed,
            None => strategy::construct(&ctx, &recipe, overrides)?,
        };
        let value = self.post_construct(&ctx, id, raw, entry.lifetime().is_shared())?;
        let value = entry.memoize(value);

        let resolved = self.inner.hooks.read().resolved_for(id.as_str());
        fire_resolved(&resolved, &value);

        trace!(%id, kind = %value.kind(), "resolved");
        Ok(value)
    }

    fn post_construct(
        &self,
        ctx: &ResolverContext<'_>,
        id: &Identifier,
        value: Value,
        shared: bool,
    ) -> ContainerResult<Value> {
        let (inflections, decorators) = {
            let pipeline = self.inner.pipeline.read();
            (pipeline.inflections(), pipeline.decorators_for(id.as_str()))
        };

        apply_inflections(ctx, id, &value, &inflections)?;

        match self.inner.config.phase_order {
            PhaseOrder::DecorateFirst => {
                let decorated = apply_decorators(ctx, value, shared, &decorators)?;
                self.fire_resolving(id, decorated)
            }
            PhaseOrder::HooksFirst => {
                let hooked = self.fire_resolving(id, value)?;
                apply_decorators(ctx, hooked, shared, &decorators)
            }
        }
    }

    fn fire_resolving(&self, id: &Identifier, value: Value) -> ContainerResult<Value> {
        let callbacks = self.inner.hooks.read().resolving_for(id.as_str());
        fire_resolving(&callbacks, value, |sub, sup| self.is_subtype(sub, sup))
    }
}
