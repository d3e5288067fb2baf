//! The container: binding registry, hooks and extension points.
//!
//! Registration and configuration live here; resolution is in
//! [`resolve`](self::resolve).

mod context;
mod resolve;

pub use context::ResolverContext;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::ContainerConfig;
use crate::decoration::{DecorationPipeline, Decorator, Inflection};
use crate::descriptors::BindingDescriptor;
use crate::error::{ContainerError, ContainerResult};
use crate::hooks::{HookRegistry, Phase};
use crate::identifier::Identifier;
use crate::lifetime::Lifetime;
use crate::observer::{Observers, ResolutionObserver};
use crate::recipe::Recipe;
use crate::reflection::{Constructor, MethodDescriptor, TypeDescriptor, TypeRegistry};
use crate::registration::{BindingEntry, Registry};
use crate::resolver::strategy;
use crate::value::{Overrides, Value};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// String-keyed dependency injection container.
///
/// Cloning is cheap and every clone addresses the same registry. The
/// container is `Send + Sync`; internal locks are held only around table
/// reads and writes, never while user code (constructors, factories, hooks,
/// decorators) runs, so those may call back into the container freely.
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, ParameterDescriptor, TypeDescriptor};
///
/// struct Engine;
/// struct Car { engine: std::sync::Arc<Engine> }
///
/// let container = Container::new();
/// container.define_type(TypeDescriptor::class::<Engine>("Engine").constructor([], |_| Ok(Engine)).build()).unwrap();
/// container.define_type(
///     TypeDescriptor::class::<Car>("Car")
///         .constructor([ParameterDescriptor::typed("engine", "Engine")], |args| {
///             Ok(Car { engine: args.object::<Engine>(0)? })
///         })
///         .build(),
/// ).unwrap();
///
/// container.share("Engine", "Engine").unwrap();
/// container.bind("car", "Car").unwrap();
///
/// let a = container.make("car").unwrap();
/// let b = container.make("car").unwrap();
/// assert!(!a.same_instance(&b));
///
/// let engine_a = &a.downcast_ref::<Car>().unwrap().engine;
/// let engine_b = &b.downcast_ref::<Car>().unwrap().engine;
/// assert!(std::sync::Arc::ptr_eq(engine_a, engine_b));
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    id: u64,
    config: ContainerConfig,
    types: RwLock<TypeRegistry>,
    registry: RwLock<Registry>,
    hooks: RwLock<HookRegistry>,
    pipeline: RwLock<DecorationPipeline>,
    observers: Observers,
}

impl Container {
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Container that knows the given types.
    pub fn with_types(types: TypeRegistry) -> Self {
        Self::builder().types(types).build()
    }

    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::default()
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    /// Adds a type descriptor to the introspection registry.
    pub fn define_type(&self, descriptor: TypeDescriptor) -> ContainerResult<()> {
        debug!(name = %descriptor.name(), kind = ?descriptor.kind(), "defined type");
        self.inner.types.write().register(descriptor)
    }

    /// Reflexive, transitive `is-a` over the known types.
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        self.inner.types.read().is_subtype(sub, sup)
    }

    /// Registers a transient binding.
    pub fn bind(&self, id: impl Into<Identifier>, recipe: impl Into<Recipe>) -> ContainerResult<()> {
        self.register(id, recipe, Lifetime::Transient)
    }

    /// Registers a shared binding.
    pub fn share(&self, id: impl Into<Identifier>, recipe: impl Into<Recipe>) -> ContainerResult<()> {
        self.register(id, recipe, Lifetime::Shared)
    }

    /// Registers `recipe` under `id`.
    ///
    /// Fails with `DuplicateBinding` when `id` is taken. When `id` names a
    /// known interface, the recipe is built once up front and must produce an
    /// object implementing it. A shared binding starts from that value on its
    /// first `make` (which still runs inflections, decorators and hooks); a
    /// transient one discards it.
    pub fn register(
        &self,
        id: impl Into<Identifier>,
        recipe: impl Into<Recipe>,
        lifetime: Lifetime,
    ) -> ContainerResult<()> {
        let id = id.into();
        let recipe = recipe.into();

        if self.inner.registry.read().contains(id.as_str()) {
            return Err(ContainerError::DuplicateBinding(id));
        }
        let probe = if self.inner.config.validate_interface_bindings && self.is_interface(id.as_str()) {
            Some(self.check_interface_binding(&id, &recipe)?)
        } else {
            None
        };

        let mut registry = self.inner.registry.write();
        if registry.contains(id.as_str()) {
            return Err(ContainerError::DuplicateBinding(id));
        }
        debug!(%id, kind = ?recipe.kind(), ?lifetime, "registered binding");
        let entry = registry.insert(BindingEntry::new(id, recipe, lifetime));
        if let Some(probe) = probe {
            entry.seed(probe);
        }
        Ok(())
    }

    /// Builds `recipe` raw and returns it if it implements `interface`.
    fn check_interface_binding(&self, interface: &Identifier, recipe: &Recipe) -> ContainerResult<Value> {
        let ctx = ResolverContext::new(self);
        let probe = strategy::construct(&ctx, recipe, &Overrides::new())?;
        let implements = probe
            .type_name()
            .is_some_and(|actual| self.inner.types.read().implements(actual.as_str(), interface.as_str()));
        if !implements {
            warn!(%interface, actual = %probe.kind(), "rejected interface binding");
            return Err(ContainerError::InterfaceBinding {
                interface: interface.clone(),
                actual: probe.kind(),
            });
        }
        Ok(probe)
    }

    pub fn has(&self, id: impl Into<Identifier>) -> bool {
        self.inner.registry.read().contains(id.into().as_str())
    }

    /// Makes `alias` resolve through the very entry `target` uses.
    pub fn alias(&self, alias: impl Into<Identifier>, target: impl Into<Identifier>) -> ContainerResult<()> {
        let alias = alias.into();
        let target = target.into();

        let mut registry = self.inner.registry.write();
        if registry.contains(alias.as_str()) {
            return Err(ContainerError::AlreadyRegistered(alias));
        }
        let entry = registry
            .get(target.as_str())
            .ok_or(ContainerError::UnknownTarget(target))?;
        debug!(%alias, target = %entry.identifier(), "registered alias");
        registry.insert_alias(alias, entry);
        Ok(())
    }

    /// Replaces the recipe of an existing binding.
    ///
    /// The new recipe is built once and compared against the currently active
    /// value (resolving it first if needed). Distinct objects must keep an
    /// `is-a` relationship, otherwise the rewrite fails with
    /// `IncompatibleRewrite` and the binding is left untouched. On success the
    /// memoized value is dropped.
    pub fn rewrite(&self, id: impl Into<Identifier>, recipe: impl Into<Recipe>) -> ContainerResult<()> {
        let id = id.into();
        let recipe = recipe.into();
        let entry = self
            .entry(&id)
            .ok_or_else(|| ContainerError::UnknownIdentifier(id.clone()))?;

        let ctx = ResolverContext::new(self);
        let candidate = strategy::construct(&ctx, &recipe, &Overrides::new())?;
        let active = self.resolve_entry(&entry, &Overrides::new())?;

        if let (Some(old), Some(new)) = (active.as_object(), candidate.as_object()) {
            if !old.ptr_eq(new) && !self.is_subtype(new.type_name().as_str(), old.type_name().as_str()) {
                warn!(%id, expected = %old.type_name(), actual = %new.type_name(), "rejected rewrite");
                return Err(ContainerError::IncompatibleRewrite {
                    expected: old.type_name().clone(),
                    actual: new.type_name().clone(),
                });
            }
        }

        debug!(%id, kind = ?recipe.kind(), "rewrote binding");
        entry.replace_recipe(recipe);
        Ok(())
    }

    /// Appends `ids` to the tag set `tag`.
    pub fn tag<I, S>(&self, ids: I, tag: &str)
    where
        I: IntoIterator<Item = S>,
        S: Into<Identifier>,
    {
        self.inner
            .registry
            .write()
            .tag(tag, ids.into_iter().map(Into::into));
    }

    /// Registers a `resolving` hook. Returning `Some` substitutes the value;
    /// `None` or `Some(Value::Null)` keeps it.
    pub fn resolving<F>(&self, id: impl Into<Identifier>, callback: F)
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        let id = self.canonical(id.into());
        self.inner.hooks.write().push_resolving(id, Arc::new(callback));
    }

    /// Registers a `resolved` hook; it observes the final value.
    pub fn resolved<F>(&self, id: impl Into<Identifier>, callback: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let id = self.canonical(id.into());
        self.inner.hooks.write().push_resolved(id, Arc::new(callback));
    }

    /// Number of hooks queued for `id` in `phase`.
    pub fn hook_count(&self, id: impl Into<Identifier>, phase: Phase) -> usize {
        let id = self.canonical(id.into());
        self.inner.hooks.read().count(id.as_str(), phase)
    }

    /// Calls `method` on every fresh instance resolved under `id`, or whose
    /// runtime type is a subtype of `id`. Instances without the method are
    /// left alone.
    pub fn inflect(&self, id: impl Into<Identifier>, method: impl Into<String>, overrides: Overrides) {
        let target = self.canonical(id.into());
        let method = method.into();
        debug!(%target, %method, "registered inflection");
        self.inner.pipeline.write().add_inflection(Inflection {
            target,
            method,
            overrides,
        });
    }

    /// Adds a decorator for `id`, which must be bound or a known class.
    pub fn decorate(&self, id: impl Into<Identifier>, decorator: impl Into<Decorator>) -> ContainerResult<()> {
        let id = id.into();
        let key = match self.entry(&id) {
            Some(entry) => entry.identifier().clone(),
            None if self.is_class(id.as_str()) => id,
            None => return Err(ContainerError::InvalidIdentifier(id)),
        };
        let decorator = decorator.into();
        debug!(id = %key, ?decorator, "registered decorator");
        self.inner.pipeline.write().add_decorator(key, decorator);
        Ok(())
    }

    /// Every registered name, sorted.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        self.inner
            .registry
            .read()
            .entries()
            .into_iter()
            .map(|(name, entry)| describe(name, &entry))
            .collect()
    }

    pub fn descriptor(&self, id: impl Into<Identifier>) -> Option<BindingDescriptor> {
        let id = id.into();
        self.entry(&id).map(|entry| describe(id, &entry))
    }

    pub(crate) fn entry(&self, id: &Identifier) -> Option<Arc<BindingEntry>> {
        self.inner.registry.read().get(id.as_str())
    }

    /// The entry's own identifier for bound names, `id` otherwise.
    fn canonical(&self, id: Identifier) -> Identifier {
        match self.entry(&id) {
            Some(entry) => entry.identifier().clone(),
            None => id,
        }
    }

    pub(crate) fn is_class(&self, name: &str) -> bool {
        self.inner.types.read().is_class(name)
    }

    pub(crate) fn is_interface(&self, name: &str) -> bool {
        self.inner.types.read().is_interface(name)
    }

    pub(crate) fn constructor_of(&self, name: &str) -> Option<Constructor> {
        self.inner.types.read().constructor_of(name)
    }

    pub(crate) fn method_of(&self, type_name: &str, method: &str) -> Option<MethodDescriptor> {
        self.inner.types.read().method_of(type_name, method)
    }
}

fn describe(name: Identifier, entry: &BindingEntry) -> BindingDescriptor {
    BindingDescriptor {
        identifier: name,
        target: entry.identifier().clone(),
        lifetime: entry.lifetime(),
        recipe_kind: entry.recipe_kind(),
        resolved: entry.is_resolved(),
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.inner.id)
            .field("bindings", &self.inner.registry.read().len())
            .field("types", &self.inner.types.read().len())
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Assembles a [`Container`] with its types, configuration and observers.
///
/// ```rust
/// use std::sync::Arc;
/// use wiring::{Container, ContainerConfig, TracingObserver, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Clock;
///
/// let container = Container::builder()
///     .config(ContainerConfig::default().with_cycle_detection(false))
///     .type_descriptor(TypeDescriptor::class::<Clock>("Clock").default_constructor().build())
///     .observer(Arc::new(TracingObserver::with_prefix("app")))
///     .build();
///
/// assert!(container.make("Clock").is_ok());
/// assert!(!container.config().detect_cycles);
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    types: TypeRegistry,
    config: ContainerConfig,
    observers: Observers,
}

impl ContainerBuilder {
    /// Replaces the type registry wholesale.
    pub fn types(mut self, types: TypeRegistry) -> Self {
        self.types = types;
        self
    }

    /// Adds one type; a later descriptor with the same name wins.
    pub fn type_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        if let Some(previous) = self.types.replace(descriptor) {
            warn!(name = %previous.name(), "type descriptor replaced");
        }
        self
    }

    pub fn config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    pub fn build(self) -> Container {
        let id = NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed);
        debug!(id, types = self.types.len(), "container built");
        Container {
            inner: Arc::new(ContainerInner {
                id,
                config: self.config,
                types: RwLock::new(self.types),
                registry: RwLock::new(Registry::new()),
                hooks: RwLock::new(HookRegistry::new()),
                pipeline: RwLock::new(DecorationPipeline::default()),
                observers: self.observers,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Container>();
    }

    #[test]
    fn clones_share_the_registry() {
        let container = Container::new();
        let clone = container.clone();
        clone.bind("x", Value::Int(1)).unwrap();
        assert!(container.has("x"));
        assert!(container.has("\\x"));
    }

    #[test]
    fn hooks_on_an_alias_are_stored_under_the_target() {
        let container = Container::new();
        container.bind("db", Value::Int(1)).unwrap();
        container.alias("database", "db").unwrap();
        container.resolved("database", |_| {});
        assert_eq!(container.hook_count("db", Phase::Resolved), 1);
        assert_eq!(container.hook_count("database", Phase::Resolved), 1);
    }
}
