//! Hierarchical, path-addressed object namespace.
//!
//! This crate is the engine behind confdb. It keeps an in-memory tree in
//! which every node is either a **directory** (owning named children) or an
//! **object** (holding an opaque byte value), addressed by absolute,
//! slash-separated paths such as `/services/api/timeout`.
//!
//! # Semantics
//!
//! - `put` always succeeds for a valid path. Missing intermediate directories
//!   are created, an object standing in the way is promoted to a directory,
//!   and whatever previously occupied the target path is overwritten
//!   (including a whole subtree).
//! - `get` returns an object's value; directories have no value.
//! - `list` returns the full paths of a directory's immediate children.
//! - `delete` detaches a node together with everything beneath it.
//!
//! # Modules
//!
//! - [`error`] — Error types for namespace operations
//! - [`path`] — Path grammar and segment splitting
//! - [`node`] — [`Node`], [`NodeKind`] and arena handles
//! - [`tree`] — The unsynchronised arena [`Tree`]
//! - [`traits`] — The [`NamespaceStore`] trait consumed by the server
//! - [`memory`] — Thread-safe [`InMemoryNamespace`]

pub mod error;
pub mod memory;
pub mod node;
pub mod path;
pub mod traits;
pub mod tree;

pub use error::{NamespaceError, Result};
pub use memory::InMemoryNamespace;
pub use node::{Node, NodeId, NodeKind};
pub use path::{join, segments, validate_path, ROOT_PATH, SEPARATOR};
pub use traits::NamespaceStore;
pub use tree::{Tree, TreeStats};
