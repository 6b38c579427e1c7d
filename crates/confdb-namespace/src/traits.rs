//! The [`NamespaceStore`] trait defining the namespace interface.
//!
//! The request adapter only ever talks to the namespace through this trait,
//! so any backend that keeps the semantics of [`Tree`](crate::Tree) can be
//! swapped in behind the server.

use bytes::Bytes;

use crate::error::{NamespaceError, Result};

/// Path-addressed namespace of directories and objects.
///
/// Implementations must be thread-safe (`Send + Sync`). Each call is atomic
/// with respect to the others: it either completes its whole mutation or
/// fails before changing anything.
pub trait NamespaceStore: Send + Sync {
    /// Read the value of the object at `path`.
    ///
    /// Returns `NotFound` if the path is missing or names a directory.
    fn get(&self, path: &str) -> Result<Bytes>;

    /// Store `value` at `path`, creating missing directories and replacing
    /// whatever was there.
    fn put(&self, path: &str, value: Bytes) -> Result<()>;

    /// Full paths of the immediate children of the directory at `path`.
    ///
    /// `"/"` names the root. Returns `NotFound` if the path is missing or
    /// names an object.
    fn list(&self, path: &str) -> Result<Vec<String>>;

    /// Remove `path` and everything beneath it.
    fn delete(&self, path: &str) -> Result<()>;

    /// Whether any node (directory or object) exists at `path`.
    fn exists(&self, path: &str) -> Result<bool> {
        match self.get(path) {
            Ok(_) => return Ok(true),
            Err(NamespaceError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }
        match self.list(path) {
            Ok(_) => Ok(true),
            Err(NamespaceError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
