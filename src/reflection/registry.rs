//! Type registry: the container's introspection provider.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{ContainerError, ContainerResult};
use crate::identifier::Identifier;
use crate::reflection::descriptor::{Constructor, MethodDescriptor, TypeDescriptor, TypeKind};

/// Named type descriptors plus the `is-a` queries evaluated over them.
///
/// # Examples
///
/// ```rust
/// use wiring::{TypeDescriptor, TypeRegistry};
///
/// struct FileStore;
///
/// let mut types = TypeRegistry::new();
/// types.register(TypeDescriptor::interface("Store", ["Flushable"])).unwrap();
/// types.register(
///     TypeDescriptor::class::<FileStore>("FileStore")
///         .implements("Store")
///         .constructor([], |_| Ok(FileStore))
///         .build(),
/// ).unwrap();
///
/// assert!(types.is_subtype("FileStore", "Store"));
/// assert!(types.is_subtype("FileStore", "Flushable"));
/// assert!(!types.is_subtype("Store", "FileStore"));
/// assert!(types.is_class("FileStore"));
/// assert!(types.is_interface("Store"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<Identifier, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor. Names are unique.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> ContainerResult<()> {
        if self.types.contains_key(descriptor.name()) {
            return Err(ContainerError::DuplicateType(descriptor.name().clone()));
        }
        self.types.insert(descriptor.name().clone(), descriptor);
        Ok(())
    }

    /// Inserts or overwrites a descriptor, returning the one it replaced.
    pub fn replace(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.types.insert(descriptor.name().clone(), descriptor)
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with(mut self, descriptor: TypeDescriptor) -> ContainerResult<Self> {
        self.register(descriptor)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn is_class(&self, name: &str) -> bool {
        self.kind_of(name) == Some(TypeKind::Class)
    }

    pub fn is_interface(&self, name: &str) -> bool {
        self.kind_of(name) == Some(TypeKind::Interface)
    }

    fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.types.get(name).map(TypeDescriptor::kind)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Reflexive, transitive `is-a` over declared supertypes.
    ///
    /// Unknown names are only subtypes of themselves.
    pub fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        if sub == sup {
            return true;
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([sub]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            let Some(descriptor) = self.types.get(current) else {
                continue;
            };
            for parent in descriptor.supertypes() {
                if parent.as_str() == sup {
                    return true;
                }
                queue.push_back(parent.as_str());
            }
        }
        false
    }

    /// Whether concrete type `class` implements `interface`.
    pub fn implements(&self, class: &str, interface: &str) -> bool {
        self.is_subtype(class, interface)
    }

    pub(crate) fn constructor_of(&self, name: &str) -> Option<Constructor> {
        self.types.get(name).and_then(|d| d.constructor().cloned())
    }

    pub(crate) fn method_of(&self, type_name: &str, method: &str) -> Option<MethodDescriptor> {
        self.types.get(type_name).and_then(|d| d.method(method).cloned())
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<Identifier> {
        let mut names: Vec<_> = self.types.keys().cloned().collect();
        names.sort();
        names
    }
}
