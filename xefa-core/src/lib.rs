//! XEFA Core - XFEM geometric cutting engine
//!
//! Tracks how a propagating crack or interface surface intersects and
//! topologically splits mesh elements over time:
//! - Node/fragment graph for partially cut elements
//! - Time-growing cut surfaces with edge-crossing tests
//! - Reference-element shape functions for embedded-node placement
//! - Parallel per-element cut marking using Rayon
//!
//! # Architecture
//!
//! The engine is built around these core abstractions:
//!
//! - [`Node`] / [`NodeArena`]: topological points with stable ids; all
//!   graph references are arena ids, never pointers
//! - [`Edge`]: an element or fragment edge carrying embedded cut nodes
//! - [`Fragment`]: a tagged variant over the closed set of fragment
//!   kinds produced by cutting
//! - [`Face`]: a tri/quad element face with parametric node lookups
//! - [`GeometricCut`] / [`LineSegmentCut`]: time-growing cut surfaces
//!
//! The enclosing controller owns the [`NodeArena`] and threads it
//! through every topology operation, so per-element updates never
//! share mutable state and parallelize safely.

pub mod cut;
pub mod cutter;
pub mod edge;
pub mod error;
pub mod face;
pub mod fragment;
pub mod node;
pub mod shape;
pub mod types;

pub use cut::{cross_product_2d, GeometricCut, LineSegmentCut};
pub use cutter::{mark_cut_edges, mark_element, ElementGeometry, MarkedElement};
pub use edge::{Edge, EmbeddedPoint};
pub use error::{Error, Result};
pub use face::Face;
pub use fragment::{FaceFragment, Fragment, VolumeFragment};
pub use node::{FaceNode, Node, NodeArena, NodeCategory, VolumeNode};
pub use shape::{
    linear_hex_shape_3d, linear_quad_shape_2d, linear_tet_shape_3d, linear_tri_shape_2d,
};
pub use types::{CutEdge, Point2, Point3, Vec2, Vec3};
