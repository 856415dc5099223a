//! Topological nodes and the node arena.
//!
//! Nodes carry identity and category only; geometry is attached
//! externally through [`FaceNode`]/[`VolumeNode`] decorations or a
//! coordinate table owned by the caller. All node references in the
//! fragment graph are stable integer ids into a [`NodeArena`], which
//! the caller threads explicitly through every topology operation.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Category of a topological node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// A node of the underlying mesh.
    Permanent,
    /// A provisional node pending resolution into a permanent node.
    Temporary,
    /// A node created where a cut surface crosses a mesh edge.
    Embedded,
    /// A local index placeholder used while converting an element to
    /// element-local numbering.
    LocalIndex,
}

/// A topological point with identity and category but no geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: usize,
    category: NodeCategory,
    /// Merge precursor: set when this node was derived from another
    /// node, cleared once the node is promoted to permanent.
    parent: Option<usize>,
}

impl Node {
    /// Create a node with no parent link.
    pub fn new(id: usize, category: NodeCategory) -> Self {
        Self {
            id,
            category,
            parent: None,
        }
    }

    /// Create a node derived from a merge-precursor node.
    pub fn with_parent(id: usize, category: NodeCategory, parent: usize) -> Self {
        Self {
            id,
            category,
            parent: Some(parent),
        }
    }

    /// Node id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Node category.
    pub fn category(&self) -> NodeCategory {
        self.category
    }

    /// Id of the merge-precursor node, if any.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Clear the parent link, marking this node as no longer derived
    /// from a merge precursor.
    pub fn remove_parent(&mut self) {
        self.parent = None;
    }

    /// Diagnostic string: the id followed by `'e'` for embedded nodes,
    /// `'t'` for temporary nodes, and a space otherwise.
    pub fn id_category_string(&self) -> String {
        let suffix = match self.category {
            NodeCategory::Embedded => 'e',
            NodeCategory::Temporary => 't',
            _ => ' ',
        };
        format!("{}{}", self.id, suffix)
    }
}

/// Ordered arena of nodes keyed by stable id.
///
/// Owned by the enclosing XFEM controller and rebuilt once per
/// mesh-modification step. Fragments, edges, and faces store ids into
/// this arena rather than references, so node merging never leaves a
/// dangling pointer behind.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: BTreeMap<usize, Node>,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh node of the given category, returning its id.
    ///
    /// Ids are allocated as one past the current maximum id.
    pub fn create_node(&mut self, category: NodeCategory) -> usize {
        let id = self.next_id();
        self.nodes.insert(id, Node::new(id, category));
        id
    }

    /// Insert a fresh node derived from a parent node, returning its id.
    pub fn create_child_node(&mut self, category: NodeCategory, parent: usize) -> usize {
        let id = self.next_id();
        self.nodes.insert(id, Node::with_parent(id, category, parent));
        id
    }

    /// Insert a node with an explicit id (e.g. a permanent mesh node).
    /// Replaces any existing node with the same id.
    pub fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id(), node);
    }

    /// Next free id: one past the current maximum.
    pub fn next_id(&self) -> usize {
        self.nodes.keys().next_back().map_or(0, |&max| max + 1)
    }

    /// Look up a node by id.
    pub fn get(&self, id: usize) -> Result<&Node> {
        self.nodes.get(&id).ok_or(Error::NodeNotFound { id })
    }

    /// Look up a node by id, mutably.
    pub fn get_mut(&mut self, id: usize) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(Error::NodeNotFound { id })
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: usize) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Whether a node with this id exists and has the given category.
    pub fn contains_with_category(&self, id: usize, category: NodeCategory) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|n| n.category() == category)
    }

    /// Remove a node by id, returning it if present.
    pub fn remove(&mut self, id: usize) -> Option<Node> {
        self.nodes.remove(&id)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
}

/// A node decorated with 2D parametric coordinates on a parent face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceNode {
    node: usize,
    xi: [f64; 2],
}

impl FaceNode {
    /// Attach a node to a face at the given parametric coordinates.
    pub fn new(node: usize, xi0: f64, xi1: f64) -> Self {
        Self {
            node,
            xi: [xi0, xi1],
        }
    }

    /// Id of the wrapped node.
    pub fn node(&self) -> usize {
        self.node
    }

    /// Parametric coordinate along axis `i` (0 or 1).
    pub fn parametric_coordinate(&self, i: usize) -> Result<f64> {
        self.xi.get(i).copied().ok_or(Error::IndexOutOfRange {
            what: "face node parametric axis",
            index: i,
            len: 2,
        })
    }

    /// Replace the wrapped node id with `new_node` if it currently
    /// equals `old_node`. Returns whether the replacement fired.
    pub fn switch_node(&mut self, new_node: usize, old_node: usize) -> bool {
        if self.node == old_node {
            self.node = new_node;
            true
        } else {
            false
        }
    }
}

/// A node decorated with 3D parametric coordinates in a parent volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeNode {
    node: usize,
    xi: [f64; 3],
}

impl VolumeNode {
    /// Attach a node to a volume at the given parametric coordinates.
    pub fn new(node: usize, xi0: f64, xi1: f64, xi2: f64) -> Self {
        Self {
            node,
            xi: [xi0, xi1, xi2],
        }
    }

    /// Id of the wrapped node.
    pub fn node(&self) -> usize {
        self.node
    }

    /// Parametric coordinate along axis `i` (0, 1, or 2).
    pub fn parametric_coordinate(&self, i: usize) -> Result<f64> {
        self.xi.get(i).copied().ok_or(Error::IndexOutOfRange {
            what: "volume node parametric axis",
            index: i,
            len: 3,
        })
    }

    /// Replace the wrapped node id with `new_node` if it currently
    /// equals `old_node`. Returns whether the replacement fired.
    pub fn switch_node(&mut self, new_node: usize, old_node: usize) -> bool {
        if self.node == old_node {
            self.node = new_node;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_category_string() {
        for id in [0usize, 1, 7, 123, 40000] {
            let embedded = Node::new(id, NodeCategory::Embedded);
            assert_eq!(embedded.id_category_string(), format!("{}e", id));

            let temp = Node::new(id, NodeCategory::Temporary);
            assert_eq!(temp.id_category_string(), format!("{}t", id));

            let perm = Node::new(id, NodeCategory::Permanent);
            assert_eq!(perm.id_category_string(), format!("{} ", id));

            let local = Node::new(id, NodeCategory::LocalIndex);
            assert_eq!(local.id_category_string(), format!("{} ", id));
        }
    }

    #[test]
    fn test_remove_parent() {
        let mut node = Node::with_parent(5, NodeCategory::Temporary, 2);
        assert_eq!(node.parent(), Some(2));
        node.remove_parent();
        assert_eq!(node.parent(), None);
    }

    #[test]
    fn test_arena_id_allocation() {
        let mut arena = NodeArena::new();
        let a = arena.create_node(NodeCategory::Permanent);
        let b = arena.create_node(NodeCategory::Temporary);
        assert_eq!(a, 0);
        assert_eq!(b, 1);

        // ids grow past the maximum, even after removal
        arena.remove(b);
        let c = arena.create_node(NodeCategory::Embedded);
        assert_eq!(c, 1);

        arena.insert(Node::new(10, NodeCategory::Permanent));
        let d = arena.create_node(NodeCategory::Embedded);
        assert_eq!(d, 11);
    }

    #[test]
    fn test_arena_lookup() {
        let mut arena = NodeArena::new();
        let id = arena.create_node(NodeCategory::Embedded);
        assert!(arena.get(id).is_ok());
        assert!(arena.get(id + 1).is_err());
        assert!(arena.contains_with_category(id, NodeCategory::Embedded));
        assert!(!arena.contains_with_category(id, NodeCategory::Permanent));
    }

    #[test]
    fn test_face_node_parametric_bounds() {
        let fnode = FaceNode::new(3, 0.25, -0.5);
        assert_eq!(fnode.parametric_coordinate(0).unwrap(), 0.25);
        assert_eq!(fnode.parametric_coordinate(1).unwrap(), -0.5);
        assert!(fnode.parametric_coordinate(2).is_err());
    }

    #[test]
    fn test_volume_node_parametric_bounds() {
        let vnode = VolumeNode::new(3, 0.1, 0.2, 0.3);
        assert_eq!(vnode.parametric_coordinate(2).unwrap(), 0.3);
        assert!(vnode.parametric_coordinate(3).is_err());
    }

    #[test]
    fn test_switch_node_conditional_replace() {
        let (a, b, c) = (1, 2, 3);
        let mut fnode = FaceNode::new(a, 0.0, 0.0);

        // held node is a, so the replace fires
        assert!(fnode.switch_node(b, a));
        assert_eq!(fnode.node(), b);

        // a is stale now, second switch is a no-op
        assert!(!fnode.switch_node(c, a));
        assert_eq!(fnode.node(), b);

        // switching against the current node works
        assert!(fnode.switch_node(c, b));
        assert_eq!(fnode.node(), c);
    }
}
