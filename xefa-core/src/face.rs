//! Element faces with interior cut nodes.
//!
//! A [`Face`] is one tri or quad face of a host element: an ordered
//! ring of corner nodes, the boundary edges between them, and any
//! interior nodes a cut surface has embedded inside the face, each
//! carrying 2D parametric coordinates. The face answers parametric
//! lookups ("where does this node sit in the reference face?") and
//! interpolation-master queries used to place embedded nodes in
//! physical space.

use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::node::FaceNode;
use crate::shape::{linear_quad_shape_2d, linear_tri_shape_2d};

/// A tri or quad element face with cut-aware edges and interior nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    nodes: Vec<usize>,
    edges: Vec<Edge>,
    interior_nodes: Vec<FaceNode>,
}

impl Face {
    /// Build a face from its corner nodes in ring order. Edges are
    /// created between consecutive corners, closing the ring.
    pub fn new(corner_nodes: Vec<usize>) -> Result<Self> {
        if corner_nodes.len() != 3 && corner_nodes.len() != 4 {
            return Err(Error::InvalidTopology(format!(
                "a face requires 3 or 4 corner nodes, got {}",
                corner_nodes.len()
            )));
        }
        let edges = corner_nodes
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let next = corner_nodes[(i + 1) % corner_nodes.len()];
                Edge::new(n, next)
            })
            .collect();
        Ok(Self {
            nodes: corner_nodes,
            edges,
            interior_nodes: Vec::new(),
        })
    }

    /// Number of corner nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Corner node at ring position `i`.
    pub fn node(&self, i: usize) -> Result<usize> {
        self.nodes.get(i).copied().ok_or(Error::IndexOutOfRange {
            what: "face corner node",
            index: i,
            len: self.nodes.len(),
        })
    }

    /// Boundary edges in ring order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable access to the boundary edge at ring position `i`.
    pub fn edge_mut(&mut self, i: usize) -> Result<&mut Edge> {
        let len = self.edges.len();
        self.edges.get_mut(i).ok_or(Error::IndexOutOfRange {
            what: "face boundary edge",
            index: i,
            len,
        })
    }

    /// Attach an interior node with its parametric coordinates.
    pub fn add_interior_node(&mut self, node: FaceNode) {
        self.interior_nodes.push(node);
    }

    /// Interior nodes embedded in this face.
    pub fn interior_nodes(&self) -> &[FaceNode] {
        &self.interior_nodes
    }

    /// Total number of embedded nodes on the boundary edges.
    pub fn num_cuts(&self) -> usize {
        self.edges.iter().map(|e| e.num_embedded_nodes()).sum()
    }

    /// Whether `node` is a corner, edge-embedded, or interior node of
    /// this face.
    pub fn contains_node(&self, node: usize) -> bool {
        self.edges.iter().any(|e| e.contains_node(node))
            || self.interior_nodes.iter().any(|f| f.node() == node)
    }

    /// Replace `old_node` with `new_node`.
    ///
    /// When `old_node` is a corner, the replacement cascades into the
    /// boundary edges and the interior decorations; when it is not, only
    /// the interior decorations are candidates. A stale `old_node` is a
    /// silent no-op.
    pub fn switch_node(&mut self, new_node: usize, old_node: usize) {
        let mut was_corner = false;
        for n in &mut self.nodes {
            if *n == old_node {
                *n = new_node;
                was_corner = true;
            }
        }
        if was_corner {
            for edge in &mut self.edges {
                edge.switch_node(new_node, old_node);
            }
        }
        for fnode in &mut self.interior_nodes {
            fnode.switch_node(new_node, old_node);
        }
    }

    /// Parametric coordinates of a node lying on one of the boundary
    /// edges, or `None` if no edge contains it.
    pub fn edge_node_parametric_coords(&self, node: usize) -> Result<Option<[f64; 2]>> {
        for (edge_id, edge) in self.edges.iter().enumerate() {
            if edge.contains_node(node) {
                let rel_dist = edge.distance_from_node(node).ok_or_else(|| {
                    Error::InvalidTopology(format!(
                        "edge {} claims node {} but has no position for it",
                        edge_id, node
                    ))
                })?;
                // translate to the [-1,1] parent coordinate system
                let xi_1d = 2.0 * rel_dist - 1.0;
                return Ok(Some(self.map_parametric_1d_to_2d(edge_id, xi_1d)?));
            }
        }
        Ok(None)
    }

    /// Parametric coordinates of any node of this face: boundary edges
    /// are searched first, then the interior decorations.
    pub fn face_node_parametric_coords(&self, node: usize) -> Result<Option<[f64; 2]>> {
        if let Some(xi) = self.edge_node_parametric_coords(node)? {
            return Ok(Some(xi));
        }
        for fnode in &self.interior_nodes {
            if fnode.node() == node {
                return Ok(Some([
                    fnode.parametric_coordinate(0)?,
                    fnode.parametric_coordinate(1)?,
                ]));
            }
        }
        Ok(None)
    }

    /// Interpolation masters and weights for a node of this face.
    ///
    /// Corner nodes are their own master with weight one. Edge-embedded
    /// nodes interpolate linearly between the edge ends. Interior nodes
    /// interpolate from all corners with tri/quad shape-function
    /// weights at their parametric position.
    pub fn master_weights(&self, node: usize) -> Result<Vec<(usize, f64)>> {
        if self.nodes.contains(&node) {
            return Ok(vec![(node, 1.0)]);
        }
        for edge in &self.edges {
            if edge.is_embedded_node(node) {
                return Ok(edge.node_masters(node)?.to_vec());
            }
        }
        for fnode in &self.interior_nodes {
            if fnode.node() == node {
                let xi = [
                    fnode.parametric_coordinate(0)?,
                    fnode.parametric_coordinate(1)?,
                ];
                let mut masters = Vec::with_capacity(self.nodes.len());
                for (j, &corner) in self.nodes.iter().enumerate() {
                    let weight = match self.nodes.len() {
                        4 => linear_quad_shape_2d(j, xi)?,
                        _ => linear_tri_shape_2d(j, xi)?,
                    };
                    masters.push((corner, weight));
                }
                return Ok(masters);
            }
        }
        Err(Error::InvalidTopology(format!(
            "node {} does not belong to this face",
            node
        )))
    }

    /// Translate the 1D parent coordinate of a point on boundary edge
    /// `edge_id` to the face's 2D reference coordinates.
    fn map_parametric_1d_to_2d(&self, edge_id: usize, xi_1d: f64) -> Result<[f64; 2]> {
        let out_of_range = Error::IndexOutOfRange {
            what: "face edge id",
            index: edge_id,
            len: self.edges.len(),
        };
        match self.nodes.len() {
            4 => match edge_id {
                0 => Ok([xi_1d, -1.0]),
                1 => Ok([1.0, xi_1d]),
                2 => Ok([-xi_1d, 1.0]),
                3 => Ok([-1.0, -xi_1d]),
                _ => Err(out_of_range),
            },
            3 => match edge_id {
                0 => Ok([0.5 * (1.0 - xi_1d), 0.5 * (1.0 + xi_1d)]),
                1 => Ok([0.0, 0.5 * (1.0 - xi_1d)]),
                2 => Ok([0.5 * (1.0 + xi_1d), 0.0]),
                _ => Err(out_of_range),
            },
            n => Err(Error::InvalidTopology(format!(
                "parametric mapping only works for tri and quad faces, face has {} corners",
                n
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad_face() -> Face {
        Face::new(vec![0, 1, 2, 3]).unwrap()
    }

    #[test]
    fn test_face_requires_tri_or_quad() {
        assert!(Face::new(vec![0, 1]).is_err());
        assert!(Face::new(vec![0, 1, 2]).is_ok());
        assert!(Face::new(vec![0, 1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_edges_close_the_ring() {
        let face = quad_face();
        assert_eq!(face.edges()[0].end_nodes(), [0, 1]);
        assert_eq!(face.edges()[3].end_nodes(), [3, 0]);
    }

    #[test]
    fn test_corner_parametric_coords() {
        let face = quad_face();
        // corner 0 sits at the start of edge 0: xi_1d = -1 on edge 0
        let xi = face.edge_node_parametric_coords(0).unwrap().unwrap();
        assert_relative_eq!(xi[0], -1.0);
        assert_relative_eq!(xi[1], -1.0);
    }

    #[test]
    fn test_embedded_node_parametric_coords() {
        let mut face = quad_face();
        // cut edge 1 (nodes 1->2, the xi=+1 side) at its midpoint
        face.edge_mut(1).unwrap().add_intersection(0.5, 100, 1).unwrap();
        let xi = face.edge_node_parametric_coords(100).unwrap().unwrap();
        assert_relative_eq!(xi[0], 1.0);
        assert_relative_eq!(xi[1], 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_tri_edge_mapping_hits_corners() {
        let face = Face::new(vec![5, 6, 7]).unwrap();
        // start of edge 1 is corner 6: area coords (0, 1)
        let xi = face.map_parametric_1d_to_2d(1, -1.0).unwrap();
        assert_relative_eq!(xi[0], 0.0);
        assert_relative_eq!(xi[1], 1.0);
    }

    #[test]
    fn test_interior_node_parametric_coords() {
        let mut face = quad_face();
        face.add_interior_node(FaceNode::new(200, 0.25, -0.75));
        let xi = face.face_node_parametric_coords(200).unwrap().unwrap();
        assert_relative_eq!(xi[0], 0.25);
        assert_relative_eq!(xi[1], -0.75);
        assert!(face.face_node_parametric_coords(999).unwrap().is_none());
    }

    #[test]
    fn test_master_weights_for_embedded_node() {
        let mut face = quad_face();
        face.edge_mut(0).unwrap().add_intersection(0.25, 100, 0).unwrap();
        let masters = face.master_weights(100).unwrap();
        assert_eq!(masters.len(), 2);
        assert_eq!(masters[0].0, 0);
        assert_relative_eq!(masters[0].1, 0.75, epsilon = 1e-14);
        assert_relative_eq!(masters[1].1, 0.25, epsilon = 1e-14);
    }

    #[test]
    fn test_master_weights_for_interior_node_sum_to_one() {
        let mut face = quad_face();
        face.add_interior_node(FaceNode::new(200, 0.3, 0.4));
        let masters = face.master_weights(200).unwrap();
        assert_eq!(masters.len(), 4);
        let total: f64 = masters.iter().map(|(_, w)| w).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_switch_node_corner_cascades() {
        let mut face = quad_face();
        face.edge_mut(0).unwrap().add_intersection(0.5, 100, 0).unwrap();
        face.switch_node(10, 0);
        assert_eq!(face.node(0).unwrap(), 10);
        assert_eq!(face.edges()[0].end_nodes(), [10, 1]);
        assert_eq!(face.edges()[3].end_nodes(), [3, 10]);
    }

    #[test]
    fn test_switch_node_interior_only() {
        let mut face = quad_face();
        face.add_interior_node(FaceNode::new(200, 0.0, 0.0));
        // 200 is not a corner: only the decoration is replaced
        face.switch_node(300, 200);
        assert_eq!(face.interior_nodes()[0].node(), 300);
        assert_eq!(face.node(0).unwrap(), 0);
    }
}
