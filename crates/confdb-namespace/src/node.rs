//! Node model: the single entity in the namespace.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

/// Stable handle to a node slot in a [`Tree`](crate::Tree) arena.
///
/// Handles are only meaningful for the tree that issued them, and a slot may
/// be reused once the node it held has been reclaimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root directory. Always slot 0, never reclaimed.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload of a node. A node is exactly one of these at any time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Owns a mapping from segment name to child handle.
    Directory { children: HashMap<String, NodeId> },
    /// Holds an opaque value.
    Object { value: Bytes },
}

impl NodeKind {
    /// An empty directory payload.
    pub fn empty_directory() -> Self {
        Self::Directory {
            children: HashMap::new(),
        }
    }
}

/// A directory or object in the namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Last path segment; empty only for the root.
    pub name: String,
    /// Owning directory. `None` only for the root.
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    /// The root directory node.
    pub fn root() -> Self {
        Self {
            name: String::new(),
            parent: None,
            kind: NodeKind::empty_directory(),
        }
    }

    /// A new empty directory named `name` under `parent`.
    pub fn directory(name: impl Into<String>, parent: NodeId) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            kind: NodeKind::empty_directory(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, NodeKind::Object { .. })
    }

    /// Child handles, or `None` for an object.
    pub fn children(&self) -> Option<&HashMap<String, NodeId>> {
        match &self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::Object { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut HashMap<String, NodeId>> {
        match &mut self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::Object { .. } => None,
        }
    }

    /// Look up a direct child by segment name.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children().and_then(|c| c.get(name).copied())
    }

    /// The value, or `None` for a directory.
    pub fn value(&self) -> Option<&Bytes> {
        match &self.kind {
            NodeKind::Object { value } => Some(value),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Turn this node into an empty directory, discarding its value.
    ///
    /// A node that is already a directory keeps its children. Returns the
    /// previous value, if any.
    pub fn make_directory(&mut self) -> Option<Bytes> {
        match std::mem::replace(&mut self.kind, NodeKind::empty_directory()) {
            NodeKind::Object { value } => Some(value),
            dir @ NodeKind::Directory { .. } => {
                self.kind = dir;
                None
            }
        }
    }

    /// Turn this node into an object holding `value`.
    ///
    /// Returns the handles of the children that were dropped, so the caller
    /// can reclaim their subtrees.
    pub fn make_object(&mut self, value: Bytes) -> Vec<NodeId> {
        match std::mem::replace(&mut self.kind, NodeKind::Object { value }) {
            NodeKind::Directory { children } => children.into_values().collect(),
            NodeKind::Object { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty_directory() {
        let root = Node::root();
        assert!(root.is_dir());
        assert!(root.name.is_empty());
        assert!(root.parent.is_none());
        assert!(root.children().unwrap().is_empty());
        assert!(root.value().is_none());
    }

    #[test]
    fn object_to_directory_discards_value() {
        let mut node = Node::directory("a", NodeId::ROOT);
        node.make_object(Bytes::from_static(b"v1"));
        assert!(node.is_object());
        assert!(node.children().is_none());

        let old = node.make_directory();
        assert_eq!(old, Some(Bytes::from_static(b"v1")));
        assert!(node.is_dir());
        assert!(node.value().is_none());
        assert!(node.children().unwrap().is_empty());
    }

    #[test]
    fn make_directory_keeps_existing_children() {
        let mut node = Node::directory("a", NodeId::ROOT);
        node.children_mut()
            .unwrap()
            .insert("b".into(), NodeId::from_index(7));
        assert_eq!(node.make_directory(), None);
        assert_eq!(node.child("b"), Some(NodeId::from_index(7)));
    }

    #[test]
    fn directory_to_object_returns_dropped_children() {
        let mut node = Node::directory("a", NodeId::ROOT);
        node.children_mut()
            .unwrap()
            .insert("b".into(), NodeId::from_index(3));
        let dropped = node.make_object(Bytes::from_static(b"x"));
        assert_eq!(dropped, vec![NodeId::from_index(3)]);
        assert_eq!(node.value(), Some(&Bytes::from_static(b"x")));
        assert_eq!(node.child("b"), None);
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId::ROOT.to_string(), "#0");
    }
}
