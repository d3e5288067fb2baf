//! Binding entries and the table that holds them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::identifier::Identifier;
use crate::lifetime::Lifetime;
use crate::recipe::{Recipe, RecipeKind};
use crate::value::Value;

/// One registered definition.
///
/// Aliases hold the same `Arc<BindingEntry>` as their target, so sharing,
/// memoization and rewrites are observed through every name.
pub(crate) struct BindingEntry {
    identifier: Identifier,
    state: Mutex<EntryState>,
}

struct EntryState {
    recipe: Recipe,
    lifetime: Lifetime,
    resolved: Option<Value>,
    // Raw value built ahead of the first resolution, used in place of the
    // recipe once.
    seed: Option<Value>,
}

impl BindingEntry {
    pub(crate) fn new(identifier: Identifier, recipe: Recipe, lifetime: Lifetime) -> Self {
        Self {
            identifier,
            state: Mutex::new(EntryState {
                recipe,
                lifetime,
                resolved: None,
                seed: None,
            }),
        }
    }

    /// Canonical identifier the entry was registered under.
    pub(crate) fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Snapshot of the recipe; construction runs without holding the lock.
    pub(crate) fn recipe(&self) -> Recipe {
        self.state.lock().recipe.clone()
    }

    pub(crate) fn recipe_kind(&self) -> RecipeKind {
        self.state.lock().recipe.kind()
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        self.state.lock().lifetime
    }

    /// Instance recipes cannot be rebuilt, so they are always shared.
    pub(crate) fn force_shared(&self) {
        self.state.lock().lifetime = Lifetime::Shared;
    }

    /// Memoized value of a shared entry.
    pub(crate) fn resolved(&self) -> Option<Value> {
        let state = self.state.lock();
        if state.lifetime.is_shared() {
            state.resolved.clone()
        } else {
            None
        }
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.state.lock().resolved.is_some()
    }

    /// Stores `value` unless another resolution got there first; returns the
    /// value every caller must observe.
    pub(crate) fn memoize(&self, value: Value) -> Value {
        let mut state = self.state.lock();
        if !state.lifetime.is_shared() {
            return value;
        }
        state.resolved.get_or_insert(value).clone()
    }

    /// Keeps an already constructed raw value for the first resolution of a
    /// shared entry. Ignored for transient entries.
    pub(crate) fn seed(&self, value: Value) {
        let mut state = self.state.lock();
        if state.lifetime.is_shared() {
            state.seed = Some(value);
        }
    }

    pub(crate) fn take_seed(&self) -> Option<Value> {
        self.state.lock().seed.take()
    }

    /// Swaps the recipe and drops any memoized or seeded value.
    pub(crate) fn replace_recipe(&self, recipe: Recipe) {
        let mut state = self.state.lock();
        state.recipe = recipe;
        state.resolved = None;
        state.seed = None;
    }
}

/// Binding table plus tag sets.
#[derive(Default)]
pub(crate) struct Registry {
    bindings: HashMap<Identifier, Arc<BindingEntry>>,
    tags: HashMap<String, Vec<Identifier>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.bindings.contains_key(id)
    }

    #[inline]
    pub(crate) fn get(&self, id: &str) -> Option<Arc<BindingEntry>> {
        self.bindings.get(id).cloned()
    }

    /// Inserts an entry. Callers check for duplicates first.
    pub(crate) fn insert(&mut self, entry: BindingEntry) -> Arc<BindingEntry> {
        let entry = Arc::new(entry);
        self.bindings.insert(entry.identifier().clone(), entry.clone());
        entry
    }

    /// Points `alias` at an existing entry object.
    pub(crate) fn insert_alias(&mut self, alias: Identifier, entry: Arc<BindingEntry>) {
        self.bindings.insert(alias, entry);
    }

    pub(crate) fn tag(&mut self, tag: &str, ids: impl IntoIterator<Item = Identifier>) {
        self.tags.entry(tag.to_string()).or_default().extend(ids);
    }

    /// Member identifiers in insertion order; empty for unknown tags.
    pub(crate) fn tagged(&self, tag: &str) -> Vec<Identifier> {
        self.tags.get(tag).cloned().unwrap_or_default()
    }

    /// Every registered name with its entry, sorted by name.
    pub(crate) fn entries(&self) -> Vec<(Identifier, Arc<BindingEntry>)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }
}
