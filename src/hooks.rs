//! Lifecycle hooks fired around every construction.
//!
//! Two append-only FIFO queues exist per identifier:
//!
//! - `resolving` callbacks see the freshly built value and may return a
//!   replacement. A replacement object must be the same instance or a subtype
//!   of the value it replaces.
//! - `resolved` callbacks observe the final value; their return is ignored.
//!
//! There is no priority ordering; callbacks run in registration order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ContainerError, ContainerResult};
use crate::identifier::Identifier;
use crate::value::Value;

pub(crate) type ResolvingFn = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;
pub(crate) type ResolvedFn = Arc<dyn Fn(&Value) + Send + Sync>;

/// Hook phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Resolving,
    Resolved,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Resolving => f.write_str("resolving"),
            Phase::Resolved => f.write_str("resolved"),
        }
    }
}

#[derive(Default)]
pub(crate) struct HookRegistry {
    resolving: HashMap<Identifier, Vec<ResolvingFn>>,
    resolved: HashMap<Identifier, Vec<ResolvedFn>>,
}

impl HookRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_resolving(&mut self, id: Identifier, callback: ResolvingFn) {
        self.resolving.entry(id).or_default().push(callback);
    }

    pub(crate) fn push_resolved(&mut self, id: Identifier, callback: ResolvedFn) {
        self.resolved.entry(id).or_default().push(callback);
    }

    /// Snapshot of the `resolving` queue so callbacks run without the lock.
    pub(crate) fn resolving_for(&self, id: &str) -> Vec<ResolvingFn> {
        self.resolving.get(id).cloned().unwrap_or_default()
    }

    pub(crate) fn resolved_for(&self, id: &str) -> Vec<ResolvedFn> {
        self.resolved.get(id).cloned().unwrap_or_default()
    }

    pub(crate) fn count(&self, id: &str, phase: Phase) -> usize {
        match phase {
            Phase::Resolving => self.resolving.get(id).map_or(0, Vec::len),
            Phase::Resolved => self.resolved.get(id).map_or(0, Vec::len),
        }
    }
}

/// Threads `value` through each `resolving` callback in order. A callback
/// returning `None` or `Some(Value::Null)` leaves the value as it was.
///
/// `is_subtype(sub, sup)` answers the `is-a` query for the substitution check.
pub(crate) fn fire_resolving<S>(
    callbacks: &[ResolvingFn],
    mut value: Value,
    is_subtype: S,
) -> ContainerResult<Value>
where
    S: Fn(&str, &str) -> bool,
{
    for callback in callbacks {
        let Some(replacement) = callback(&value).filter(|v| !v.is_null()) else {
            continue;
        };
        check_substitution(&value, &replacement, &is_subtype)?;
        value = replacement;
    }
    Ok(value)
}

pub(crate) fn fire_resolved(callbacks: &[ResolvedFn], value: &Value) {
    for callback in callbacks {
        callback(value);
    }
}

/// Substitution safety: distinct objects must keep an `is-a` relationship.
pub(crate) fn check_substitution<S>(
    original: &Value,
    replacement: &Value,
    is_subtype: S,
) -> ContainerResult<()>
where
    S: Fn(&str, &str) -> bool,
{
    match (original, replacement) {
        (Value::Object(old), Value::Object(new))
            if !old.ptr_eq(new) && !is_subtype(new.type_name().as_str(), old.type_name().as_str()) =>
        {
            Err(ContainerError::IncompatibleSubstitution {
                expected: old.type_name().clone(),
                actual: new.type_name().clone(),
            })
        }
        _ => Ok(()),
    }
}
