//! Error types for the dependency injection container.

use crate::identifier::Identifier;

/// Container errors.
///
/// Every variant terminates the call that raised it; nothing is retried and
/// there is no partial result. Side effects performed by callbacks before the
/// failure are not rolled back.
///
/// # Examples
///
/// ```rust
/// use wiring::{Container, ContainerError};
///
/// let container = Container::new();
/// match container.make("missing") {
///     Err(ContainerError::NotFound(id)) => assert_eq!(id.as_str(), "missing"),
///     other => panic!("unexpected: {:?}", other.map(|_| ())),
/// }
/// ```
///
/// ```rust
/// use wiring::{ContainerError, Identifier};
///
/// let err = ContainerError::CyclicDependency(vec![
///     Identifier::new("A"),
///     Identifier::new("B"),
///     Identifier::new("A"),
/// ]);
/// assert_eq!(err.to_string(), "Circular dependency: A -> B -> A");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContainerError {
    /// Binding an identifier that is already registered.
    #[error("Binding already registered: {0}")]
    DuplicateBinding(Identifier),
    /// Neither bound nor a resolvable class name.
    #[error("Service not found: {0}")]
    NotFound(Identifier),
    /// An interface binding whose recipe does not produce an implementation.
    #[error("Cannot bind {interface}: {actual} does not implement it")]
    InterfaceBinding {
        interface: Identifier,
        actual: String,
    },
    /// `rewrite` of an identifier that is not registered.
    #[error("Cannot rewrite {0}: not registered")]
    UnknownIdentifier(Identifier),
    /// `alias` pointing at an identifier that is not registered.
    #[error("Cannot alias {0}: not registered")]
    UnknownTarget(Identifier),
    /// `alias` whose new name is already taken.
    #[error("Alias already registered: {0}")]
    AlreadyRegistered(Identifier),
    /// `rewrite` with a recipe whose object is not a subtype of the active one.
    #[error("Rewrite type {actual} must extend {expected}")]
    IncompatibleRewrite {
        expected: Identifier,
        actual: Identifier,
    },
    /// A `resolving` hook returned an object that is not a subtype of its input.
    #[error("Substitute type {actual} must extend {expected}")]
    IncompatibleSubstitution {
        expected: Identifier,
        actual: Identifier,
    },
    /// `call` given something that is neither a closure nor `Type@method`.
    #[error("{0} cannot be called out of the container")]
    NotCallable(String),
    /// `decorate` targeting an identifier the container cannot resolve.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(Identifier),
    /// Re-entrant resolution of an identifier already in flight (includes path).
    #[error("Circular dependency: {}", join_path(.0))]
    CyclicDependency(Vec<Identifier>),
    /// Maximum nested resolution depth exceeded.
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// A positional argument did not have the type its consumer asked for.
    #[error("Argument {position} is not {expected}")]
    ArgumentType { position: usize, expected: String },
    /// A type descriptor was registered twice.
    #[error("Type already defined: {0}")]
    DuplicateType(Identifier),
    /// A constructor, factory or method reported a failure of its own.
    #[error("Construction failed: {0}")]
    Construction(String),
    /// Malformed configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn join_path(path: &[Identifier]) -> String {
    path.iter()
        .map(Identifier::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl ContainerError {
    /// Convenience constructor for failures raised inside user constructors.
    pub fn construction(message: impl Into<String>) -> Self {
        ContainerError::Construction(message.into())
    }
}

/// Result type for container operations.
///
/// ```rust
/// use wiring::{ContainerError, ContainerResult};
///
/// fn open() -> ContainerResult<u16> {
///     Err(ContainerError::construction("port unavailable"))
/// }
///
/// assert!(open().is_err());
/// ```
pub type ContainerResult<T> = Result<T, ContainerError>;
