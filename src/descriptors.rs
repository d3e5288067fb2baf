//! Binding descriptors for introspection and diagnostics.

use crate::identifier::Identifier;
use crate::lifetime::Lifetime;
use crate::recipe::RecipeKind;

/// Snapshot of one registered name.
///
/// Aliases appear as their own descriptor whose `target` is the canonical
/// identifier of the entry they share.
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, Lifetime, RecipeKind, Value};
///
/// let container = Container::new();
/// container.bind("port", Value::from(8080)).unwrap();
/// container.alias("http.port", "port").unwrap();
///
/// let descriptors = container.descriptors();
/// assert_eq!(descriptors.len(), 2);
///
/// let alias = container.descriptor("http.port").unwrap();
/// assert!(alias.is_alias());
/// assert_eq!(alias.target.as_str(), "port");
/// assert_eq!(alias.recipe_kind, RecipeKind::Instance);
/// assert!(!alias.resolved);
///
/// container.make("http.port").unwrap();
/// let port = container.descriptor("port").unwrap();
/// assert_eq!(port.lifetime, Lifetime::Shared);
/// assert!(port.resolved);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingDescriptor {
    /// Name the descriptor was listed under.
    pub identifier: Identifier,
    /// Canonical identifier of the underlying entry.
    pub target: Identifier,
    pub lifetime: Lifetime,
    pub recipe_kind: RecipeKind,
    /// Whether a memoized value is currently held.
    pub resolved: bool,
}

impl BindingDescriptor {
    pub fn is_alias(&self) -> bool {
        self.identifier != self.target
    }

    pub fn is_shared(&self) -> bool {
        self.lifetime.is_shared()
    }
}
