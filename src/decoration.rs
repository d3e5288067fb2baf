//! Inflection and decoration: post-construction steps keyed by identifier.
//!
//! Inflections call a setter-style method on each fresh instance and discard
//! its result. Decorators wrap or replace the instance; they chain in
//! registration order, each receiving the previous stage's value.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::container::ResolverContext;
use crate::error::{ContainerError, ContainerResult};
use crate::identifier::Identifier;
use crate::resolver::strategy::{call_method, instantiate};
use crate::value::{Overrides, Value};

pub(crate) type DecoratorFn =
    Arc<dyn for<'a> Fn(&ResolverContext<'a>, Value, bool) -> ContainerResult<Value> + Send + Sync>;

/// A decoration step registered with [`Container::decorate`](crate::Container::decorate).
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, Decorator, Value};
///
/// let container = Container::new();
/// container.bind("greeting", Value::from("hello")).unwrap();
/// container
///     .decorate("greeting", Decorator::function(|_ctx, previous, _shared| {
///         Ok(Value::from(format!("{}!", previous.as_str().unwrap_or_default())))
///     }))
///     .unwrap();
///
/// assert_eq!(container.make("greeting").unwrap().as_str(), Some("hello!"));
/// ```
#[derive(Clone)]
pub struct Decorator(DecoratorKind);

#[derive(Clone)]
enum DecoratorKind {
    /// `(resolver, previous, shared) -> next`.
    Function(DecoratorFn),
    /// A class whose constructor takes the previous value.
    Class(Identifier),
}

impl Decorator {
    pub fn function<F>(decorate: F) -> Self
    where
        F: Fn(&ResolverContext<'_>, Value, bool) -> ContainerResult<Value> + Send + Sync + 'static,
    {
        Decorator(DecoratorKind::Function(Arc::new(
            move |ctx: &ResolverContext<'_>, previous: Value, shared: bool| decorate(ctx, previous, shared),
        )))
    }

    /// Wrapper class. The previous value is injected into the first
    /// constructor parameter whose declared type it satisfies; the remaining
    /// parameters resolve as usual.
    pub fn class(name: impl Into<Identifier>) -> Self {
        Decorator(DecoratorKind::Class(name.into()))
    }

    pub(crate) fn apply(
        &self,
        ctx: &ResolverContext<'_>,
        previous: Value,
        shared: bool,
    ) -> ContainerResult<Value> {
        match &self.0 {
            DecoratorKind::Function(decorate) => decorate(ctx, previous, shared),
            DecoratorKind::Class(class) => wrap_in_class(ctx, class, previous),
        }
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            DecoratorKind::Function(_) => f.write_str("Decorator::Function"),
            DecoratorKind::Class(class) => write!(f, "Decorator::Class({})", class),
        }
    }
}

impl From<&str> for Decorator {
    fn from(value: &str) -> Self {
        Decorator::class(value)
    }
}

impl From<Identifier> for Decorator {
    fn from(value: Identifier) -> Self {
        Decorator::class(value)
    }
}

fn wrap_in_class(
    ctx: &ResolverContext<'_>,
    class: &Identifier,
    previous: Value,
) -> ContainerResult<Value> {
    let container = ctx.container();
    let constructor = container.constructor_of(class.as_str()).ok_or_else(|| {
        ContainerError::construction(format!("decorator {} declares no constructor", class))
    })?;

    let slot = previous.type_name().and_then(|actual| {
        constructor.parameters().iter().find(|p| {
            p.declared_type
                .as_ref()
                .is_some_and(|declared| container.is_subtype(actual.as_str(), declared.as_str()))
        })
    });
    let Some(slot) = slot else {
        return Err(ContainerError::construction(format!(
            "decorator {} has no parameter accepting {}",
            class,
            previous.kind()
        )));
    };

    let overrides = Overrides::new().with(slot.name.clone(), previous);
    instantiate(ctx, class, &overrides).map(Value::Object)
}

/// A method call applied to every fresh instance resolved under `target`, or
/// whose runtime type is a subtype of `target`.
#[derive(Clone, Debug)]
pub(crate) struct Inflection {
    pub(crate) target: Identifier,
    pub(crate) method: String,
    pub(crate) overrides: Overrides,
}

#[derive(Default)]
pub(crate) struct DecorationPipeline {
    inflections: Vec<Inflection>,
    decorators: HashMap<Identifier, Vec<Decorator>>,
}

impl DecorationPipeline {
    pub(crate) fn add_inflection(&mut self, inflection: Inflection) {
        self.inflections.push(inflection);
    }

    pub(crate) fn add_decorator(&mut self, id: Identifier, decorator: Decorator) {
        self.decorators.entry(id).or_default().push(decorator);
    }

    /// Snapshot; callers run the steps after releasing the lock.
    pub(crate) fn inflections(&self) -> Vec<Inflection> {
        self.inflections.clone()
    }

    pub(crate) fn decorators_for(&self, id: &str) -> Vec<Decorator> {
        self.decorators.get(id).cloned().unwrap_or_default()
    }
}

/// Runs each applicable inflection once, in registration order.
pub(crate) fn apply_inflections(
    ctx: &ResolverContext<'_>,
    id: &Identifier,
    value: &Value,
    inflections: &[Inflection],
) -> ContainerResult<()> {
    let Some(object) = value.as_object() else {
        return Ok(());
    };
    let container = ctx.container();
    for inflection in inflections {
        let applies = inflection.target == *id
            || container.is_subtype(object.type_name().as_str(), inflection.target.as_str());
        if !applies {
            continue;
        }
        tracing::trace!(%id, method = %inflection.method, "inflecting");
        call_method(ctx, object, &inflection.method, &inflection.overrides)?;
    }
    Ok(())
}

/// Threads `value` through `decorators` in registration order.
pub(crate) fn apply_decorators(
    ctx: &ResolverContext<'_>,
    mut value: Value,
    shared: bool,
    decorators: &[Decorator],
) -> ContainerResult<Value> {
    for decorator in decorators {
        value = decorator.apply(ctx, value, shared)?;
    }
    Ok(value)
}
