//! The namespace tree and its traversal/mutation algorithms.
//!
//! [`Tree`] stores nodes in an arena of slots addressed by [`NodeId`]. A
//! directory owns its children through its `children` map; the `parent`
//! handle on each node is a non-owning back-reference used to rebuild full
//! paths and to find a node's slot in its parent at delete time.
//!
//! # Invariants
//!
//! - Slot 0 always holds the root, which is always a directory.
//! - For every live non-root node `n`: `parent(n).children[n.name] == n`.
//! - Every live slot is reachable from the root. Detached subtrees are
//!   returned to the free list in the same operation that detaches them.
//!
//! `Tree` is not synchronised; see [`InMemoryNamespace`](crate::InMemoryNamespace)
//! for the shared, lock-protected engine.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::debug;

use crate::error::{NamespaceError, Result};
use crate::node::{Node, NodeId, NodeKind};
use crate::path::{join, segments, ROOT_PATH};

/// Node counts and value volume of a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Live directories, including the root.
    pub directories: usize,
    /// Live objects.
    pub objects: usize,
    /// Sum of all object value lengths.
    pub bytes: u64,
}

/// Arena-backed namespace tree.
#[derive(Clone, Debug)]
pub struct Tree {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
}

impl Tree {
    /// Create a tree holding only the empty root directory.
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Node::root())],
            free: Vec::new(),
        }
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns `true` if only the root exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    /// Borrow a live node by handle.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn stats(&self) -> TreeStats {
        self.slots
            .iter()
            .flatten()
            .fold(TreeStats::default(), |mut stats, node| {
                match &node.kind {
                    NodeKind::Directory { .. } => stats.directories += 1,
                    NodeKind::Object { value } => {
                        stats.objects += 1;
                        stats.bytes += value.len() as u64;
                    }
                }
                stats
            })
    }

    // ---------------------------------------------------------------
    // Resolution
    // ---------------------------------------------------------------

    /// Resolve `path` to a node, failing with `NotFound` on the first
    /// segment that does not exist.
    pub fn find(&self, path: &str) -> Result<NodeId> {
        let parts = segments(path)?;
        self.resolve(path, &parts)
    }

    /// Descend as far as `path` exists.
    ///
    /// Returns the deepest node reached and the unresolved trailing
    /// segments, in order. An object reached before the last segment stops
    /// the descent, since it has no children.
    pub fn find_closest<'p>(&self, path: &'p str) -> Result<(NodeId, Vec<&'p str>)> {
        let parts = segments(path)?;
        let mut cur = NodeId::ROOT;
        for (i, part) in parts.iter().enumerate() {
            match self.get_node(cur)?.child(part) {
                Some(next) => cur = next,
                None => return Ok((cur, parts[i..].to_vec())),
            }
        }
        Ok((cur, Vec::new()))
    }

    /// Rebuild the full path of a node by walking its parent chain.
    ///
    /// The root renders as `/`.
    pub fn full_path(&self, id: NodeId) -> Result<String> {
        let mut names = Vec::new();
        let mut cur = self.get_node(id)?;
        while let Some(parent) = cur.parent {
            names.push(cur.name.as_str());
            cur = self.get_node(parent)?;
        }
        if names.is_empty() {
            return Ok(ROOT_PATH.to_string());
        }
        Ok(names.iter().rev().fold(String::new(), |path, name| join(&path, name)))
    }

    // ---------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------

    /// Read the value stored at `path`.
    ///
    /// Fails with `NotFound` if the path does not exist or names a
    /// directory.
    pub fn get(&self, path: &str) -> Result<Bytes> {
        let id = self.find(path)?;
        self.get_node(id)?
            .value()
            .cloned()
            .ok_or_else(|| NamespaceError::not_found(path))
    }

    /// Full paths of the immediate children of the directory at `path`,
    /// sorted.
    ///
    /// Fails with `NotFound` if the path does not exist or names an object.
    /// An empty directory yields an empty list.
    pub fn list(&self, path: &str) -> Result<Vec<String>> {
        let id = self.find(path)?;
        let children = self
            .get_node(id)?
            .children()
            .ok_or_else(|| NamespaceError::not_found(path))?;
        let mut paths = children
            .values()
            .map(|child| self.full_path(*child))
            .collect::<Result<Vec<_>>>()?;
        paths.sort();
        Ok(paths)
    }

    /// Store `value` at `path`, overwriting whatever is there.
    ///
    /// Missing directories along the way are created. An object on the way
    /// is promoted to an empty directory (its value is lost). If the target
    /// was a directory, its whole subtree is dropped.
    pub fn put(&mut self, path: &str, value: Bytes) -> Result<()> {
        let (mut cur, tail) = self.find_closest(path)?;
        if cur == NodeId::ROOT && tail.is_empty() {
            return Err(NamespaceError::invalid(
                path,
                "the root directory cannot hold a value",
            ));
        }

        if !tail.is_empty() {
            if let Some(old) = self.get_node_mut(cur)?.make_directory() {
                debug!(path, discarded = old.len(), "promoted object to directory");
            }
        }

        let created = tail.len();
        for name in tail {
            let id = self.alloc(Node::directory(name, cur));
            self.children_mut(cur)?.insert(name.to_string(), id);
            cur = id;
        }

        let dropped = self.get_node_mut(cur)?.make_object(value);
        let reclaimed: usize = dropped.into_iter().map(|c| self.reclaim(c)).sum();
        debug!(path, created, reclaimed, "put");
        Ok(())
    }

    /// Remove the node at `path` and everything beneath it.
    ///
    /// Fails with `NotFound` if the path does not exist. The root cannot be
    /// deleted.
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let parts = segments(path)?;
        if parts.is_empty() {
            return Err(NamespaceError::invalid(
                path,
                "the root directory cannot be deleted",
            ));
        }
        let id = self.resolve(path, &parts)?;
        let node = self.get_node(id)?;
        let parent = node.parent.ok_or_else(|| {
            NamespaceError::Internal(format!("node {id} at {path} has no parent"))
        })?;
        let name = node.name.clone();

        self.children_mut(parent)?.remove(&name);
        let reclaimed = self.reclaim(id);
        debug!(path, reclaimed, "delete");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Arena internals
    // ---------------------------------------------------------------

    fn resolve(&self, path: &str, parts: &[&str]) -> Result<NodeId> {
        let mut cur = NodeId::ROOT;
        for part in parts {
            cur = self
                .get_node(cur)?
                .child(part)
                .ok_or_else(|| NamespaceError::not_found(path))?;
        }
        Ok(cur)
    }

    fn get_node(&self, id: NodeId) -> Result<&Node> {
        self.node(id)
            .ok_or_else(|| NamespaceError::Internal(format!("dangling node handle {id}")))
    }

    fn get_node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or_else(|| NamespaceError::Internal(format!("dangling node handle {id}")))
    }

    fn children_mut(&mut self, id: NodeId) -> Result<&mut HashMap<String, NodeId>> {
        self.get_node_mut(id)?
            .children_mut()
            .ok_or_else(|| NamespaceError::Internal(format!("node {id} is not a directory")))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId::from_index(self.slots.len() - 1)
            }
        }
    }

    /// Free the slots of the subtree rooted at `id`. The caller must already
    /// have detached it from its parent. Returns the number of nodes freed.
    fn reclaim(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(id) = stack.pop() {
            if id == NodeId::ROOT {
                continue;
            }
            let Some(node) = self.slots.get_mut(id.index()).and_then(Option::take) else {
                continue;
            };
            if let NodeKind::Directory { children } = node.kind {
                stack.extend(children.into_values());
            }
            self.free.push(id);
            freed += 1;
        }
        freed
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
