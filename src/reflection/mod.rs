//! Type introspection: descriptors and the registry that answers `is-a`.

pub mod descriptor;
pub mod registry;

pub use descriptor::{
    ClassBuilder, Constructor, MethodDescriptor, ParameterDescriptor, TypeDescriptor, TypeKind,
};
pub use registry::TypeRegistry;
