//! Thread-safe in-memory namespace.
//!
//! [`InMemoryNamespace`] wraps a [`Tree`] in a single engine-wide `RwLock`.
//! Reads share the lock; `put` and `delete` hold it exclusively, so every
//! operation observes and leaves a consistent tree. Data is lost when the
//! namespace is dropped.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;
use tracing::warn;

use crate::error::{NamespaceError, Result};
use crate::traits::NamespaceStore;
use crate::tree::{Tree, TreeStats};

/// An in-memory implementation of [`NamespaceStore`].
#[derive(Debug, Default)]
pub struct InMemoryNamespace {
    tree: RwLock<Tree>,
}

impl InMemoryNamespace {
    /// Create a namespace holding only the empty root directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` if nothing but the root exists.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    pub fn stats(&self) -> Result<TreeStats> {
        Ok(self.read()?.stats())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tree>> {
        self.tree.read().map_err(|e| {
            warn!("namespace lock poisoned");
            NamespaceError::Internal(format!("lock poisoned: {e}"))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tree>> {
        self.tree.write().map_err(|e| {
            warn!("namespace lock poisoned");
            NamespaceError::Internal(format!("lock poisoned: {e}"))
        })
    }
}

impl From<Tree> for InMemoryNamespace {
    fn from(tree: Tree) -> Self {
        Self {
            tree: RwLock::new(tree),
        }
    }
}

impl NamespaceStore for InMemoryNamespace {
    fn get(&self, path: &str) -> Result<Bytes> {
        self.read()?.get(path)
    }

    fn put(&self, path: &str, value: Bytes) -> Result<()> {
        self.write()?.put(path, value)
    }

    fn list(&self, path: &str) -> Result<Vec<String>> {
        self.read()?.list(path)
    }

    fn delete(&self, path: &str) -> Result<()> {
        self.write()?.delete(path)
    }
}
