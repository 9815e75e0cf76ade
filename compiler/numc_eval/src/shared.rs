//! Shared, immutable registry handle.

use std::fmt;
use std::sync::Arc;

/// Cheaply clonable handle to a registry that no longer changes.
///
/// Build and seed the registry first, then share it. Every clone points at
/// the same allocation.
pub struct SharedRegistry<R>(Arc<R>);

impl<R> SharedRegistry<R> {
    pub fn new(registry: R) -> Self {
        SharedRegistry(Arc::new(registry))
    }

    /// Whether two handles share one registry.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<R> Clone for SharedRegistry<R> {
    fn clone(&self) -> Self {
        SharedRegistry(Arc::clone(&self.0))
    }
}

impl<R> std::ops::Deref for SharedRegistry<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<R> From<R> for SharedRegistry<R> {
    fn from(registry: R) -> Self {
        SharedRegistry::new(registry)
    }
}

impl<R: fmt::Debug> fmt::Debug for SharedRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedRegistry({:?})", &*self.0)
    }
}
