//! Binding lifetime definitions.

/// Controls whether a binding's resolved value is memoized.
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, Lifetime, Object, Value};
///
/// struct Clock;
///
/// let container = Container::new();
/// container.register("clock", Object::new("Clock", Clock), Lifetime::Transient).unwrap();
///
/// // Pre-built instances are always shared, whatever lifetime they were bound with.
/// let a = container.make("clock").unwrap();
/// let b = container.make("clock").unwrap();
/// assert!(a.same_instance(&b));
/// assert_eq!(container.descriptor("clock").unwrap().lifetime, Lifetime::Shared);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifetime {
    /// Resolved once, memoized, and returned for every later `make` until the
    /// binding is rewritten.
    Shared,
    /// Constructed fresh on every `make`.
    Transient,
}

impl Lifetime {
    /// Whether values are memoized.
    pub fn is_shared(self) -> bool {
        matches!(self, Lifetime::Shared)
    }
}
