//! Argument resolution and construction strategies.

pub(crate) mod arguments;
pub(crate) mod strategy;
