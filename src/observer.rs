//! Observers for resolution events.
//!
//! Observers see every resolution that actually constructs something (memoized
//! hits are not reported). Calls are made synchronously on the resolving
//! thread, so implementations should stay cheap.

use std::sync::Arc;
use std::time::Duration;

use crate::error::ContainerError;
use crate::identifier::Identifier;

/// Hook into resolution for tracing, timing and failure reporting.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
/// use wiring::{Container, ContainerError, Identifier, ResolutionObserver, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Counter(AtomicUsize);
///
/// impl ResolutionObserver for Counter {
///     fn resolving(&self, _id: &Identifier) {}
///
///     fn resolved(&self, _id: &Identifier, _duration: Duration) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
///
///     fn failed(&self, _id: &Identifier, _error: &ContainerError) {}
/// }
///
/// #[derive(Default)]
/// struct Clock;
///
/// let counter = Arc::new(Counter::default());
/// let container = Container::builder()
///     .type_descriptor(TypeDescriptor::class::<Clock>("Clock").default_constructor().build())
///     .observer(counter.clone())
///     .build();
///
/// container.make("Clock").unwrap();
/// container.make("Clock").unwrap();
/// assert_eq!(counter.0.load(Ordering::SeqCst), 2);
/// ```
pub trait ResolutionObserver: Send + Sync {
    /// Construction of `id` is about to start.
    fn resolving(&self, id: &Identifier);

    /// `id` finished every phase; `duration` is measured from `resolving`.
    fn resolved(&self, id: &Identifier, duration: Duration);

    /// Resolution of `id` failed. Nested failures are reported once per
    /// frame they propagate through.
    fn failed(&self, id: &Identifier, error: &ContainerError);
}

#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, id: &Identifier) {
        for observer in &self.observers {
            observer.resolving(id);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, id: &Identifier, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(id, duration);
        }
    }

    #[inline]
    pub(crate) fn failed(&self, id: &Identifier, error: &ContainerError) {
        for observer in &self.observers {
            observer.failed(id, error);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
///
/// Events are emitted under the `wiring::resolution` target with the
/// observer's `prefix` attached as a field, so several containers can be told
/// apart in one subscriber.
pub struct TracingObserver {
    prefix: String,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self {
            prefix: "wiring".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionObserver for TracingObserver {
    fn resolving(&self, id: &Identifier) {
        tracing::trace!(target: "wiring::resolution", prefix = %self.prefix, id = %id, "resolving");
    }

    fn resolved(&self, id: &Identifier, duration: Duration) {
        tracing::debug!(
            target: "wiring::resolution",
            prefix = %self.prefix,
            id = %id,
            elapsed_us = duration.as_micros() as u64,
            "resolved"
        );
    }

    fn failed(&self, id: &Identifier, error: &ContainerError) {
        tracing::warn!(target: "wiring::resolution", prefix = %self.prefix, id = %id, error = %error, "resolution failed");
    }
}
