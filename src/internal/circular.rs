//! Circular dependency and depth detection.

use std::cell::RefCell;

use crate::error::{ContainerError, ContainerResult};
use crate::identifier::Identifier;

// Per-thread stack of in-flight resolutions, keyed by owning container.
thread_local! {
    static RESOLUTION_TLS: RefCell<Vec<(u64, Identifier)>> = const { RefCell::new(Vec::new()) };
}

/// Pops its frame from the in-flight stack on drop, including on early
/// return through `?` and unwinding out of a user callback.
pub(crate) struct StackGuard {
    container: u64,
    id: Identifier,
}

impl StackGuard {
    /// Pushes `(container, id)` after checking for re-entry and depth.
    pub(crate) fn enter(
        container: u64,
        id: &Identifier,
        detect_cycles: bool,
        max_depth: usize,
    ) -> ContainerResult<Self> {
        RESOLUTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();

            // Cycle check BEFORE pushing.
            if detect_cycles {
                let frames = stack.iter().filter(|(c, _)| *c == container);
                if let Some(start) = frames.clone().position(|(_, n)| n == id) {
                    let mut path: Vec<Identifier> =
                        frames.skip(start).map(|(_, n)| n.clone()).collect();
                    path.push(id.clone());
                    return Err(ContainerError::CyclicDependency(path));
                }
            }

            if stack.len() >= max_depth {
                return Err(ContainerError::DepthExceeded(max_depth));
            }

            stack.push((container, id.clone()));
            Ok(())
        })?;

        Ok(Self {
            container,
            id: id.clone(),
        })
    }
}

impl Drop for StackGuard {
    fn drop(&mut self) {
        RESOLUTION_TLS.with(|tls| {
            let mut stack = tls.borrow_mut();
            if let Some((container, last)) = stack.pop() {
                debug_assert!(container == self.container && last == self.id);
            }
        });
    }
}

/// Current nesting depth on this thread.
#[cfg(test)]
pub(crate) fn depth() -> usize {
    RESOLUTION_TLS.with(|tls| tls.borrow().len())
}
