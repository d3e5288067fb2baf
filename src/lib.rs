//! # wiring
//!
//! String-keyed dependency injection with recursive constructor and method
//! injection, shared/transient lifetimes, lifecycle hooks, inflection and
//! decoration.
//!
//! ## Features
//!
//! - **Identifiers, not types**: bindings are keyed by normalized strings such
//!   as `"Mailer"`, `"App\\Cache"` or `"mailer.default"`
//! - **Recipes**: bind a class name, a `Class@method` call, a factory closure
//!   or a pre-built value
//! - **Injection**: constructor and method parameters are resolved by declared
//!   type, with named overrides and defaults
//! - **Hooks**: `resolving` callbacks may substitute the instance (subtypes
//!   only), `resolved` callbacks observe it
//! - **Inflection and decoration**: setter calls and wrappers applied to every
//!   fresh instance
//! - **Safety nets**: cycle and depth detection, interface-binding and rewrite
//!   compatibility checks
//!
//! ## Quick Start
//!
//! ```rust
//! use wiring::{Container, ParameterDescriptor, TypeDescriptor, TypeRegistry, Value};
//! use std::sync::Arc;
//!
//! struct MemoryStore;
//!
//! struct Repository {
//!     store: Arc<MemoryStore>,
//!     table: String,
//! }
//!
//! let mut types = TypeRegistry::new();
//! types.register(TypeDescriptor::interface("Store", std::iter::empty::<&str>())).unwrap();
//! types.register(
//!     TypeDescriptor::class::<MemoryStore>("MemoryStore")
//!         .implements("Store")
//!         .constructor([], |_| Ok(MemoryStore))
//!         .build(),
//! ).unwrap();
//! types.register(
//!     TypeDescriptor::class::<Repository>("Repository")
//!         .constructor(
//!             [
//!                 ParameterDescriptor::typed("store", "Store"),
//!                 ParameterDescriptor::new("table").with_default("users"),
//!             ],
//!             |args| Ok(Repository { store: args.object(0)?, table: args.str(1)?.to_string() }),
//!         )
//!         .method("describe", [], |repo: &Repository, _| Ok(Value::from(repo.table.clone())))
//!         .build(),
//! ).unwrap();
//!
//! let container = Container::with_types(types);
//! container.share("Store", "MemoryStore").unwrap();
//!
//! // Unregistered classes are built on demand.
//! let a = container.make("Repository").unwrap();
//! let b = container.make("Repository").unwrap();
//! assert!(!a.same_instance(&b));
//!
//! // The shared store is injected into both.
//! let store_a = &a.downcast_ref::<Repository>().unwrap().store;
//! let store_b = &b.downcast_ref::<Repository>().unwrap().store;
//! assert!(Arc::ptr_eq(store_a, store_b));
//!
//! // Method injection.
//! assert_eq!(container.call("Repository@describe").unwrap().as_str(), Some("users"));
//! ```
//!
//! ## Hooks
//!
//! ```rust
//! use wiring::{Container, Value};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let container = Container::new();
//! container.bind("answer", wiring::Factory::from_fn(|_| Ok(Value::Int(41)))).unwrap();
//!
//! container.resolving("answer", |value| value.as_int().map(|n| Value::Int(n + 1)));
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = seen.clone();
//! container.resolved("answer", move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! assert_eq!(container.make("answer").unwrap().as_int(), Some(42));
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

pub mod config;
pub mod container;
pub mod decoration;
pub mod descriptors;
pub mod error;
pub mod hooks;
pub mod identifier;
pub mod lifetime;
pub mod observer;
pub mod recipe;
pub mod reflection;
pub mod traits;
pub mod value;

// Internal modules
mod internal;
mod registration;
mod resolver;

pub use config::{ContainerConfig, PhaseOrder};
pub use container::{Container, ContainerBuilder, ResolverContext};
pub use decoration::Decorator;
pub use descriptors::BindingDescriptor;
pub use error::{ContainerError, ContainerResult};
pub use hooks::Phase;
pub use identifier::Identifier;
pub use lifetime::Lifetime;
pub use observer::{ResolutionObserver, TracingObserver};
pub use recipe::{Callable, Factory, Recipe, RecipeKind};
pub use reflection::{
    ClassBuilder, Constructor, MethodDescriptor, ParameterDescriptor, TypeDescriptor, TypeKind,
    TypeRegistry,
};
pub use traits::{Resolver, ResolverCore};
pub use value::{Arguments, Object, Overrides, Value};
