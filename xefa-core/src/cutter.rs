//! Per-element cut marking.
//!
//! The entry point of a mesh-update step: every element whose geometry
//! a cut surface crosses gets its crossed edges marked with fractional
//! positions. Elements are independent (no shared mutable state in the
//! fragment graph), so the batch path fans out across elements with
//! Rayon.

use rayon::prelude::*;

use crate::cut::LineSegmentCut;
use crate::types::{CutEdge, Point3};

/// The geometry of one host element handed in by the mesh layer:
/// corner positions in ring order, elements lying in the xy-plane.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementGeometry {
    /// Mesh-level element id.
    pub id: usize,
    /// Corner coordinates in ring order (3 for tri, 4 for quad).
    pub corners: Vec<Point3>,
}

impl ElementGeometry {
    /// Create an element geometry record.
    pub fn new(id: usize, corners: Vec<Point3>) -> Self {
        Self { id, corners }
    }

    /// Physical position of a point at fractional `distance` along the
    /// ring edge `edge_id`, measured from the edge's first corner.
    pub fn point_on_edge(&self, edge_id: usize, distance: f64) -> Option<Point3> {
        let n = self.corners.len();
        if edge_id >= n {
            return None;
        }
        let p1 = self.corners[edge_id];
        let p2 = self.corners[(edge_id + 1) % n];
        Some(p1 + (p2 - p1) * distance)
    }
}

/// Edge crossings found on one element.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedElement {
    /// Mesh-level element id.
    pub element: usize,
    /// All crossings from all cuts, in (cut, edge) scan order.
    pub cut_edges: Vec<CutEdge>,
}

/// Apply every cut to one element at the given time.
pub fn mark_element(
    element: &ElementGeometry,
    cuts: &[LineSegmentCut],
    time: f64,
) -> Option<MarkedElement> {
    let mut cut_edges = Vec::new();
    for cut in cuts {
        cut_edges.extend(cut.cut_elem_by_geometry(&element.corners, time));
    }
    if cut_edges.is_empty() {
        None
    } else {
        Some(MarkedElement {
            element: element.id,
            cut_edges,
        })
    }
}

/// Apply every cut to every element in parallel, returning marks for
/// the elements that are crossed. Output is ordered by input position,
/// independent of scheduling.
pub fn mark_cut_edges(
    elements: &[ElementGeometry],
    cuts: &[LineSegmentCut],
    time: f64,
) -> Vec<MarkedElement> {
    elements
        .par_iter()
        .filter_map(|elem| mark_element(elem, cuts, time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::GeometricCut;
    use approx::assert_relative_eq;

    fn unit_quad(id: usize, x_offset: f64) -> ElementGeometry {
        ElementGeometry::new(
            id,
            vec![
                Point3::new(x_offset, 0.0, 0.0),
                Point3::new(x_offset + 1.0, 0.0, 0.0),
                Point3::new(x_offset + 1.0, 1.0, 0.0),
                Point3::new(x_offset, 1.0, 0.0),
            ],
        )
    }

    fn horizontal_cut(x0: f64, x1: f64) -> LineSegmentCut {
        LineSegmentCut::new(
            Point3::new(x0, 0.5, 0.0),
            Point3::new(x1, 0.5, 0.0),
            GeometricCut::new(0.0, 1.0).unwrap(),
        )
    }

    #[test]
    fn test_mark_element_uncut() {
        let elem = unit_quad(0, 5.0);
        let cuts = vec![horizontal_cut(-0.5, 1.5)];
        assert!(mark_element(&elem, &cuts, 1.0).is_none());
    }

    #[test]
    fn test_mark_cut_edges_selects_crossed_elements() {
        // a row of three quads, the cut spans the first two
        let elements = vec![unit_quad(0, 0.0), unit_quad(1, 1.0), unit_quad(2, 2.0)];
        let cuts = vec![horizontal_cut(-0.5, 1.5)];

        let marked = mark_cut_edges(&elements, &cuts, 1.0);
        assert_eq!(marked.len(), 2);
        assert_eq!(marked[0].element, 0);
        assert_eq!(marked[1].element, 1);
        // quad 0 is traversed fully: two crossed edges
        assert_eq!(marked[0].cut_edges.len(), 2);
        // the cut tip stops inside quad 1: one crossed edge
        assert_eq!(marked[1].cut_edges.len(), 1);
    }

    #[test]
    fn test_mark_cut_edges_respects_growth() {
        let elements = vec![unit_quad(0, 0.0), unit_quad(1, 1.0)];
        // full extent spans both quads, growing over [0, 2]
        let cuts = vec![LineSegmentCut::new(
            Point3::new(-0.5, 0.5, 0.0),
            Point3::new(1.5, 0.5, 0.0),
            GeometricCut::new(0.0, 2.0).unwrap(),
        )];

        // at t=1 only half the extent is active: tip at x=0.5
        let marked = mark_cut_edges(&elements, &cuts, 1.0);
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].element, 0);
    }

    #[test]
    fn test_marked_element_to_fragment() {
        // full pipeline for one quad: mark crossings, create embedded
        // nodes at the marked positions, rebuild the fragment, and
        // check the resulting topology
        use crate::edge::Edge;
        use crate::fragment::{FaceFragment, Fragment};
        use crate::node::{NodeArena, NodeCategory};

        let elem = unit_quad(0, 0.0);
        let cuts = vec![horizontal_cut(-0.5, 1.5)];
        let marked = mark_element(&elem, &cuts, 1.0).unwrap();
        assert_eq!(marked.cut_edges.len(), 2);

        let mut arena = NodeArena::new();
        let corners: Vec<usize> = (0..4)
            .map(|_| arena.create_node(NodeCategory::Permanent))
            .collect();
        let mut edges: Vec<Edge> = (0..4)
            .map(|i| Edge::new(corners[i], corners[(i + 1) % 4]))
            .collect();
        for ce in &marked.cut_edges {
            let emb = arena.create_node(NodeCategory::Embedded);
            edges[ce.edge_id]
                .add_intersection(ce.distance, emb, corners[ce.edge_id])
                .unwrap();
        }

        let frag = Fragment::from_face(FaceFragment::new(edges).unwrap()).unwrap();
        assert!(matches!(frag, Fragment::DoubleCutFace(_)));
        assert_eq!(frag.num_cuts(), 2);

        // the embedded positions land where the cut crossed
        let p = elem
            .point_on_edge(marked.cut_edges[0].edge_id, marked.cut_edges[0].distance)
            .unwrap();
        assert_relative_eq!(p.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_point_on_edge() {
        let elem = unit_quad(0, 0.0);
        let p = elem.point_on_edge(1, 0.5).unwrap();
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 0.5);
        assert!(elem.point_on_edge(4, 0.5).is_none());
    }
}
