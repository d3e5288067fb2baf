//! Construction strategies, one per recipe kind.

use crate::container::ResolverContext;
use crate::error::{ContainerError, ContainerResult};
use crate::identifier::Identifier;
use crate::recipe::{Factory, Recipe};
use crate::resolver::arguments::resolve_arguments;
use crate::value::{Object, Overrides, Value};

/// Produces the raw value of a recipe, before inflection, decoration and
/// hooks.
pub(crate) fn construct(
    ctx: &ResolverContext<'_>,
    recipe: &Recipe,
    overrides: &Overrides,
) -> ContainerResult<Value> {
    match recipe {
        Recipe::Instance(value) => Ok(value.clone()),
        Recipe::Factory(factory) => invoke_factory(ctx, factory, overrides),
        Recipe::TypeName(name) => construct_type_name(ctx, name, overrides),
    }
}

pub(crate) fn invoke_factory(
    ctx: &ResolverContext<'_>,
    factory: &Factory,
    overrides: &Overrides,
) -> ContainerResult<Value> {
    let arguments = resolve_arguments(ctx, factory.parameters(), overrides)?;
    factory.invoke(ctx, arguments)
}

/// `Type` or `Type@method`.
///
/// A registered class is instantiated directly. Anything else (an interface,
/// another binding) is delegated to the container. With a method suffix the
/// receiver is built without overrides and the overrides go to the method; a
/// missing method yields the receiver itself.
pub(crate) fn construct_type_name(
    ctx: &ResolverContext<'_>,
    name: &Identifier,
    overrides: &Overrides,
) -> ContainerResult<Value> {
    let (type_name, method) = name.split_method();
    let Some(method) = method else {
        return build_type(ctx, &type_name, overrides);
    };

    let receiver = build_type(ctx, &type_name, &Overrides::new())?;
    let Value::Object(object) = receiver else {
        tracing::trace!(%name, "receiver is not an object, skipping method call");
        return Ok(receiver);
    };
    call_method(ctx, &object, method, overrides)
        .map(|result| result.unwrap_or(Value::Object(object)))
}

fn build_type(
    ctx: &ResolverContext<'_>,
    type_name: &Identifier,
    overrides: &Overrides,
) -> ContainerResult<Value> {
    let container = ctx.container();
    if container.is_class(type_name.as_str()) {
        instantiate(ctx, type_name, overrides).map(Value::Object)
    } else {
        container.resolve(type_name, overrides)
    }
}

/// Builds a registered class through its constructor descriptor.
pub(crate) fn instantiate(
    ctx: &ResolverContext<'_>,
    class: &Identifier,
    overrides: &Overrides,
) -> ContainerResult<Object> {
    let constructor = ctx.container().constructor_of(class.as_str()).ok_or_else(|| {
        ContainerError::construction(format!("{} declares no constructor", class))
    })?;
    let arguments = resolve_arguments(ctx, constructor.parameters(), overrides)?;
    tracing::trace!(%class, arguments = arguments.len(), "instantiating");
    constructor.instantiate(arguments)
}

/// Invokes `method` on `receiver` with injected arguments. `None` when the
/// receiver's runtime type does not declare such a method itself.
pub(crate) fn call_method(
    ctx: &ResolverContext<'_>,
    receiver: &Object,
    method: &str,
    overrides: &Overrides,
) -> ContainerResult<Option<Value>> {
    let Some(descriptor) = ctx.container().method_of(receiver.type_name().as_str(), method) else {
        tracing::trace!(type_name = %receiver.type_name(), method, "method not found");
        return Ok(None);
    };
    let arguments = resolve_arguments(ctx, descriptor.parameters(), overrides)?;
    descriptor.invoke(receiver, arguments).map(Some)
}
