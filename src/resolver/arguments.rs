//! Positional argument resolution for constructors, methods and factories.

use crate::container::ResolverContext;
use crate::error::ContainerResult;
use crate::reflection::ParameterDescriptor;
use crate::value::{Arguments, Overrides, Value};

/// Resolves `parameters` in declaration order. For each parameter the first
/// match wins:
///
/// 1. a same-named override, passed through untouched;
/// 2. the declared type, resolved recursively through the container;
/// 3. the default value;
/// 4. `Null`.
pub(crate) fn resolve_arguments(
    ctx: &ResolverContext<'_>,
    parameters: &[ParameterDescriptor],
    overrides: &Overrides,
) -> ContainerResult<Arguments> {
    parameters
        .iter()
        .map(|parameter| resolve_parameter(ctx, parameter, overrides))
        .collect()
}

fn resolve_parameter(
    ctx: &ResolverContext<'_>,
    parameter: &ParameterDescriptor,
    overrides: &Overrides,
) -> ContainerResult<Value> {
    if let Some(value) = overrides.get(&parameter.name) {
        return Ok(value.clone());
    }
    if let Some(declared) = &parameter.declared_type {
        tracing::trace!(parameter = %parameter.name, declared = %declared, "injecting");
        return ctx.make(declared);
    }
    Ok(parameter.default.clone().unwrap_or_default())
}
