//! Cut-aware element edges.
//!
//! An [`Edge`] connects two end nodes and records where cut surfaces
//! cross it: each crossing stores the embedded node created there and
//! its fractional position along the edge. Fragment boundaries are
//! closed loops of edges, so cut counting and embedded-node cleanup
//! both bottom out here.

use crate::error::{Error, Result};

/// Relative tolerance for coincident intersection positions.
pub const POSITION_TOL: f64 = 1e-10;

/// An embedded node on an edge with its fractional position measured
/// from the edge's first node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbeddedPoint {
    /// Arena id of the embedded node.
    pub node: usize,
    /// Position in [0, 1] from the edge's first node.
    pub fraction: f64,
}

/// An element or fragment edge between two nodes, carrying any
/// embedded cut nodes in position order.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    nodes: [usize; 2],
    embedded: Vec<EmbeddedPoint>,
}

impl Edge {
    /// Create an edge between two nodes with no intersections.
    pub fn new(node0: usize, node1: usize) -> Self {
        Self {
            nodes: [node0, node1],
            embedded: Vec::new(),
        }
    }

    /// End node at position `i` (0 or 1).
    pub fn node(&self, i: usize) -> Result<usize> {
        self.nodes.get(i).copied().ok_or(Error::IndexOutOfRange {
            what: "edge end node",
            index: i,
            len: 2,
        })
    }

    /// Both end nodes.
    pub fn end_nodes(&self) -> [usize; 2] {
        self.nodes
    }

    /// The end opposite to `node`, if `node` is one of the ends.
    pub fn other_node(&self, node: usize) -> Option<usize> {
        if node == self.nodes[0] {
            Some(self.nodes[1])
        } else if node == self.nodes[1] {
            Some(self.nodes[0])
        } else {
            None
        }
    }

    /// Whether any cut crosses this edge.
    pub fn has_intersection(&self) -> bool {
        !self.embedded.is_empty()
    }

    /// Number of embedded nodes on this edge.
    pub fn num_embedded_nodes(&self) -> usize {
        self.embedded.len()
    }

    /// Embedded node at slot `i`, in position order.
    pub fn embedded_node(&self, i: usize) -> Result<usize> {
        self.embedded
            .get(i)
            .map(|e| e.node)
            .ok_or(Error::IndexOutOfRange {
                what: "edge embedded node",
                index: i,
                len: self.embedded.len(),
            })
    }

    /// Embedded points in position order.
    pub fn embedded_points(&self) -> &[EmbeddedPoint] {
        &self.embedded
    }

    /// Whether `node` is one of this edge's embedded nodes.
    pub fn is_embedded_node(&self, node: usize) -> bool {
        self.embedded.iter().any(|e| e.node == node)
    }

    /// Whether `node` is an end node or an embedded node of this edge.
    pub fn contains_node(&self, node: usize) -> bool {
        self.nodes.contains(&node) || self.is_embedded_node(node)
    }

    /// Record a cut crossing at `fraction` measured from end `from_node`.
    ///
    /// If an intersection already exists within [`POSITION_TOL`] of the
    /// position, its embedded node is replaced instead of duplicated.
    /// Embedded points are kept sorted by position from the first node.
    pub fn add_intersection(
        &mut self,
        fraction: f64,
        embedded_node: usize,
        from_node: usize,
    ) -> Result<()> {
        let position = self.position_from_node0(fraction, from_node)?;
        if let Some(existing) = self
            .embedded
            .iter_mut()
            .find(|e| (e.fraction - position).abs() < POSITION_TOL)
        {
            existing.node = embedded_node;
            return Ok(());
        }
        self.embedded.push(EmbeddedPoint {
            node: embedded_node,
            fraction: position,
        });
        self.embedded
            .sort_by(|a, b| a.fraction.total_cmp(&b.fraction));
        Ok(())
    }

    /// Whether an intersection exists within tolerance of `fraction`
    /// measured from end `from_node`.
    pub fn has_intersection_at_position(&self, fraction: f64, from_node: usize) -> Result<bool> {
        let position = self.position_from_node0(fraction, from_node)?;
        Ok(self
            .embedded
            .iter()
            .any(|e| (e.fraction - position).abs() < POSITION_TOL))
    }

    /// Fractional distance of `node` from the edge's first node:
    /// 0.0/1.0 for the ends, the stored position for embedded nodes.
    pub fn distance_from_node(&self, node: usize) -> Option<f64> {
        if node == self.nodes[0] {
            return Some(0.0);
        }
        if node == self.nodes[1] {
            return Some(1.0);
        }
        self.embedded
            .iter()
            .find(|e| e.node == node)
            .map(|e| e.fraction)
    }

    /// Interpolation masters for a node on this edge: the two end
    /// nodes with linear weights. Errors if `node` is not embedded
    /// here (the ends are their own masters).
    pub fn node_masters(&self, node: usize) -> Result<[(usize, f64); 2]> {
        let point = self
            .embedded
            .iter()
            .find(|e| e.node == node)
            .ok_or_else(|| {
                Error::InvalidTopology(format!("node {} is not embedded on this edge", node))
            })?;
        Ok([
            (self.nodes[0], 1.0 - point.fraction),
            (self.nodes[1], point.fraction),
        ])
    }

    /// Replace every occurrence of `old_node` (end or embedded) with
    /// `new_node`. Stale `old_node` values are a silent no-op.
    pub fn switch_node(&mut self, new_node: usize, old_node: usize) {
        for n in &mut self.nodes {
            if *n == old_node {
                *n = new_node;
            }
        }
        for e in &mut self.embedded {
            if e.node == old_node {
                e.node = new_node;
            }
        }
    }

    /// Drop the embedded node with the given id, keeping its siblings.
    pub fn remove_embedded_node(&mut self, node: usize) {
        self.embedded.retain(|e| e.node != node);
    }

    /// Drop all embedded nodes.
    pub fn remove_embedded_nodes(&mut self) {
        self.embedded.clear();
    }

    /// Convert a fraction measured from `from_node` to a position
    /// measured from the first node.
    fn position_from_node0(&self, fraction: f64, from_node: usize) -> Result<f64> {
        if from_node == self.nodes[0] {
            Ok(fraction)
        } else if from_node == self.nodes[1] {
            Ok(1.0 - fraction)
        } else {
            Err(Error::InvalidTopology(format!(
                "node {} is not an end of edge ({}, {})",
                from_node, self.nodes[0], self.nodes[1]
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_intersection_orients_position() {
        let mut edge = Edge::new(10, 20);
        edge.add_intersection(0.25, 100, 20).unwrap();
        // 0.25 from node 20 is 0.75 from node 10
        assert_relative_eq!(edge.embedded_points()[0].fraction, 0.75, epsilon = 1e-14);
        assert_eq!(edge.embedded_node(0).unwrap(), 100);
    }

    #[test]
    fn test_add_intersection_replaces_coincident() {
        let mut edge = Edge::new(10, 20);
        edge.add_intersection(0.5, 100, 10).unwrap();
        edge.add_intersection(0.5, 101, 10).unwrap();
        assert_eq!(edge.num_embedded_nodes(), 1);
        assert_eq!(edge.embedded_node(0).unwrap(), 101);
    }

    #[test]
    fn test_embedded_nodes_sorted() {
        let mut edge = Edge::new(1, 2);
        edge.add_intersection(0.8, 100, 1).unwrap();
        edge.add_intersection(0.2, 101, 1).unwrap();
        assert_eq!(edge.embedded_node(0).unwrap(), 101);
        assert_eq!(edge.embedded_node(1).unwrap(), 100);
    }

    #[test]
    fn test_distance_from_node() {
        let mut edge = Edge::new(1, 2);
        edge.add_intersection(0.3, 100, 1).unwrap();
        assert_eq!(edge.distance_from_node(1), Some(0.0));
        assert_eq!(edge.distance_from_node(2), Some(1.0));
        assert_relative_eq!(edge.distance_from_node(100).unwrap(), 0.3);
        assert_eq!(edge.distance_from_node(7), None);
    }

    #[test]
    fn test_node_masters() {
        let mut edge = Edge::new(1, 2);
        edge.add_intersection(0.3, 100, 1).unwrap();
        let masters = edge.node_masters(100).unwrap();
        assert_eq!(masters[0].0, 1);
        assert_relative_eq!(masters[0].1, 0.7, epsilon = 1e-14);
        assert_eq!(masters[1].0, 2);
        assert_relative_eq!(masters[1].1, 0.3, epsilon = 1e-14);
        assert!(edge.node_masters(1).is_err());
    }

    #[test]
    fn test_switch_node_ends_and_embedded() {
        let mut edge = Edge::new(1, 2);
        edge.add_intersection(0.5, 100, 1).unwrap();
        edge.switch_node(5, 1);
        assert_eq!(edge.end_nodes(), [5, 2]);
        edge.switch_node(101, 100);
        assert_eq!(edge.embedded_node(0).unwrap(), 101);
        // stale old node: no-op
        edge.switch_node(9, 1);
        assert_eq!(edge.end_nodes(), [5, 2]);
    }

    #[test]
    fn test_contains_node() {
        let mut edge = Edge::new(1, 2);
        edge.add_intersection(0.5, 100, 1).unwrap();
        assert!(edge.contains_node(1));
        assert!(edge.contains_node(100));
        assert!(!edge.contains_node(3));
    }

    #[test]
    fn test_add_intersection_rejects_foreign_end() {
        let mut edge = Edge::new(1, 2);
        assert!(edge.add_intersection(0.5, 100, 3).is_err());
    }
}
