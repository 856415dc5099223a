//! Core data types for geometric cutting.
//!
//! This module defines fundamental types used throughout XEFA:
//! - Geometric primitives (points, vectors)
//! - Cut-edge records produced by the cutting routines

use nalgebra::{Vector2, Vector3};

/// A point in 3D space.
pub type Point3 = Vector3<f64>;

/// A 3D vector.
pub type Vec3 = Vector3<f64>;

/// A point in 2D space.
pub type Point2 = Vector2<f64>;

/// A 2D vector.
pub type Vec2 = Vector2<f64>;

/// A crossing of a cut surface with one edge of a host element.
///
/// Produced by the geometric cutting routines and consumed by the
/// fragment-topology layer, which creates an embedded node at the
/// recorded fractional position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutEdge {
    /// Local edge index within the host element or fragment boundary.
    pub edge_id: usize,
    /// Fractional position of the crossing along the edge, in [0, 1],
    /// measured from the edge's first node.
    pub distance: f64,
}

impl CutEdge {
    /// Create a new cut-edge record.
    pub fn new(edge_id: usize, distance: f64) -> Self {
        Self { edge_id, distance }
    }
}
