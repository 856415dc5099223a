//! Fragments of cut elements.
//!
//! A fragment is a closed piece of a cut element's boundary: a loop of
//! edges in 2D, a set of boundary faces in 3D. The fragment kinds form
//! a small closed set, so they are modeled as a tagged variant rather
//! than an open class hierarchy:
//! - [`Fragment::UncutFace`] - a face loop no cut has touched
//! - [`Fragment::SingleCutFace`] - a face loop with one intersected edge
//! - [`Fragment::DoubleCutFace`] - a face loop with two intersected edges
//! - [`Fragment::Volume`] - a 3D fragment bounded by face loops
//!
//! The shared operations (node enumeration, connectivity, conditional
//! node replacement, embedded-node cleanup) are implemented once over
//! the variant's node-set accessor.

use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::node::{NodeArena, NodeCategory};

/// A closed loop of edges bounding a 2D fragment or one face of a 3D
/// fragment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceFragment {
    edges: Vec<Edge>,
}

impl FaceFragment {
    /// Build a face fragment from a loop of edges.
    ///
    /// Consecutive edges (including last-to-first) must share a node.
    pub fn new(edges: Vec<Edge>) -> Result<Self> {
        if edges.len() >= 2 {
            for i in 0..edges.len() {
                let next = (i + 1) % edges.len();
                let [a0, a1] = edges[i].end_nodes();
                if !edges[next].contains_node(a0) && !edges[next].contains_node(a1) {
                    return Err(Error::InvalidTopology(format!(
                        "fragment boundary is not a closed loop: edge {} does not touch edge {}",
                        i, next
                    )));
                }
            }
        }
        Ok(Self { edges })
    }

    /// Number of boundary edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Boundary edge at index `i`.
    pub fn edge(&self, i: usize) -> Result<&Edge> {
        self.edges.get(i).ok_or(Error::IndexOutOfRange {
            what: "fragment boundary edge",
            index: i,
            len: self.edges.len(),
        })
    }

    /// All boundary edges in loop order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable access to a boundary edge.
    pub fn edge_mut(&mut self, i: usize) -> Result<&mut Edge> {
        let len = self.edges.len();
        self.edges.get_mut(i).ok_or(Error::IndexOutOfRange {
            what: "fragment boundary edge",
            index: i,
            len,
        })
    }

    /// Number of intersected boundary edges.
    pub fn num_cut_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.has_intersection()).count()
    }

    /// End nodes of the boundary loop, in loop order, each listed once
    /// at its first occurrence.
    pub fn nodes(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            for n in edge.end_nodes() {
                if !out.contains(&n) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Whether `node` is an end node or embedded node of any boundary
    /// edge.
    pub fn contains_node(&self, node: usize) -> bool {
        self.edges.iter().any(|e| e.contains_node(node))
    }

    /// Replace `old_node` with `new_node` throughout the boundary.
    /// Returns the number of edges touched.
    pub fn switch_node(&mut self, new_node: usize, old_node: usize) -> usize {
        let mut touched = 0;
        for edge in &mut self.edges {
            if edge.contains_node(old_node) {
                edge.switch_node(new_node, old_node);
                touched += 1;
            }
        }
        touched
    }

    /// Drop embedded-node references that no longer name a valid
    /// embedded node in the arena.
    pub fn remove_invalid_embedded_nodes(&mut self, arena: &NodeArena) {
        for edge in &mut self.edges {
            let stale: Vec<usize> = edge
                .embedded_points()
                .iter()
                .map(|e| e.node)
                .filter(|&id| !arena.contains_with_category(id, NodeCategory::Embedded))
                .collect();
            for id in stale {
                edge.remove_embedded_node(id);
            }
        }
    }
}

/// A 3D fragment bounded by a set of face loops.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VolumeFragment {
    faces: Vec<FaceFragment>,
}

impl VolumeFragment {
    /// Build a volume fragment from its boundary faces.
    pub fn new(faces: Vec<FaceFragment>) -> Self {
        Self { faces }
    }

    /// Number of boundary faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Boundary face at index `i`.
    pub fn face(&self, i: usize) -> Result<&FaceFragment> {
        self.faces.get(i).ok_or(Error::IndexOutOfRange {
            what: "fragment boundary face",
            index: i,
            len: self.faces.len(),
        })
    }

    /// Number of intersected boundary faces.
    pub fn num_cut_faces(&self) -> usize {
        self.faces.iter().filter(|f| f.num_cut_edges() > 0).count()
    }

    /// Node ids over all boundary faces, each listed once at its first
    /// occurrence.
    pub fn nodes(&self) -> Vec<usize> {
        let mut out = Vec::new();
        for face in &self.faces {
            for n in face.nodes() {
                if !out.contains(&n) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Whether `node` appears on any boundary face.
    pub fn contains_node(&self, node: usize) -> bool {
        self.faces.iter().any(|f| f.contains_node(node))
    }

    /// Replace `old_node` with `new_node` throughout the boundary.
    /// Returns the number of edges touched.
    pub fn switch_node(&mut self, new_node: usize, old_node: usize) -> usize {
        self.faces
            .iter_mut()
            .map(|f| f.switch_node(new_node, old_node))
            .sum()
    }

    /// Drop embedded-node references that no longer name a valid
    /// embedded node in the arena.
    pub fn remove_invalid_embedded_nodes(&mut self, arena: &NodeArena) {
        for face in &mut self.faces {
            face.remove_invalid_embedded_nodes(arena);
        }
    }
}

/// A piece of a cut element's boundary, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A 2D face loop no cut has touched.
    UncutFace(FaceFragment),
    /// A 2D face loop with exactly one intersected edge.
    SingleCutFace(FaceFragment),
    /// A 2D face loop with exactly two intersected edges.
    DoubleCutFace(FaceFragment),
    /// A 3D fragment bounded by face loops.
    Volume(VolumeFragment),
}

impl Fragment {
    /// Classify a face fragment by its cut count.
    ///
    /// A face loop with more than two intersected edges is not a valid
    /// fragment state (a branching cut must be split first).
    pub fn from_face(face: FaceFragment) -> Result<Self> {
        match face.num_cut_edges() {
            0 => Ok(Fragment::UncutFace(face)),
            1 => Ok(Fragment::SingleCutFace(face)),
            2 => Ok(Fragment::DoubleCutFace(face)),
            n => Err(Error::InvalidTopology(format!(
                "face fragment has {} cut edges, at most 2 are allowed",
                n
            ))),
        }
    }

    /// Wrap a volume fragment.
    pub fn from_volume(volume: VolumeFragment) -> Self {
        Fragment::Volume(volume)
    }

    /// Number of cuts carried by this fragment's boundary: intersected
    /// edges for face fragments, intersected faces for volumes.
    pub fn num_cuts(&self) -> usize {
        match self {
            Fragment::UncutFace(_) => 0,
            Fragment::SingleCutFace(_) => 1,
            Fragment::DoubleCutFace(_) => 2,
            Fragment::Volume(v) => v.num_cut_faces(),
        }
    }

    /// All node ids bounding this fragment, in deterministic
    /// first-occurrence order.
    pub fn nodes(&self) -> Vec<usize> {
        match self {
            Fragment::UncutFace(f) | Fragment::SingleCutFace(f) | Fragment::DoubleCutFace(f) => {
                f.nodes()
            }
            Fragment::Volume(v) => v.nodes(),
        }
    }

    /// Whether `node` appears anywhere on this fragment's boundary.
    pub fn contains_node(&self, node: usize) -> bool {
        match self {
            Fragment::UncutFace(f) | Fragment::SingleCutFace(f) | Fragment::DoubleCutFace(f) => {
                f.contains_node(node)
            }
            Fragment::Volume(v) => v.contains_node(node),
        }
    }

    /// Nodes shared with `other`, in the order they appear in `self`'s
    /// node set. O(n·m) over the two node sets.
    pub fn common_nodes(&self, other: &Fragment) -> Vec<usize> {
        let other_nodes = other.nodes();
        self.nodes()
            .into_iter()
            .filter(|n| other_nodes.contains(n))
            .collect()
    }

    /// Whether this fragment shares at least one node with `other`.
    /// Symmetric by construction.
    pub fn is_connected(&self, other: &Fragment) -> bool {
        !self.common_nodes(other).is_empty()
    }

    /// Replace `old_node` with `new_node` throughout the boundary.
    ///
    /// A stale `old_node` that matches nothing is a silent no-op; the
    /// returned count lets callers assert on it in debug paths.
    pub fn switch_node(&mut self, new_node: usize, old_node: usize) -> usize {
        match self {
            Fragment::UncutFace(f) | Fragment::SingleCutFace(f) | Fragment::DoubleCutFace(f) => {
                f.switch_node(new_node, old_node)
            }
            Fragment::Volume(v) => v.switch_node(new_node, old_node),
        }
    }

    /// Drop embedded-node references not present as valid embedded
    /// nodes in `arena`, then re-tag the fragment if its cut count
    /// changed (a retracted cut can turn a single-cut face back into
    /// an uncut one).
    pub fn remove_invalid_embedded_nodes(&mut self, arena: &NodeArena) -> Result<()> {
        match self {
            Fragment::UncutFace(f) | Fragment::SingleCutFace(f) | Fragment::DoubleCutFace(f) => {
                f.remove_invalid_embedded_nodes(arena);
                let face = std::mem::take(f);
                *self = Fragment::from_face(face)?;
            }
            Fragment::Volume(v) => v.remove_invalid_embedded_nodes(arena),
        }
        Ok(())
    }
}
