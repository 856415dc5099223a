//! Reference-element shape function evaluation.
//!
//! This module provides the linear shape functions used to interpolate
//! physical positions of cut points from their parametric coordinates
//! inside a reference element:
//! - Bilinear quadrilateral (4 nodes, ξ,η in [-1,1]²)
//! - Linear triangle (3 nodes, area coordinates)
//! - Trilinear hexahedron (8 nodes, ξ,η,ζ in [-1,1]³)
//! - Linear tetrahedron (4 nodes, volume coordinates)
//!
//! All evaluators bounds-check the local node index and return
//! [`Error::IndexOutOfRange`] for invalid indices.

use crate::error::{Error, Result};
use crate::types::Point3;

/// Corner signs for the bilinear quad reference element.
const QUAD_XI: [[f64; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

/// Corner signs for the trilinear hex reference element.
const HEX_XI: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Evaluate the bilinear quad shape function for local node `node_id`
/// at parametric point `xi`.
pub fn linear_quad_shape_2d(node_id: usize, xi: [f64; 2]) -> Result<f64> {
    let signs = QUAD_XI.get(node_id).ok_or(Error::IndexOutOfRange {
        what: "quad shape function node",
        index: node_id,
        len: 4,
    })?;
    Ok(0.25 * (1.0 + signs[0] * xi[0]) * (1.0 + signs[1] * xi[1]))
}

/// Evaluate the linear triangle shape function for local node `node_id`
/// at parametric point `xi`.
///
/// The triangle uses area coordinates: the first two are stored in `xi`,
/// the third is implicit (`1 - xi[0] - xi[1]`).
pub fn linear_tri_shape_2d(node_id: usize, xi: [f64; 2]) -> Result<f64> {
    let area_xi = [xi[0], xi[1], 1.0 - xi[0] - xi[1]];
    area_xi.get(node_id).copied().ok_or(Error::IndexOutOfRange {
        what: "tri shape function node",
        index: node_id,
        len: 3,
    })
}

/// Evaluate the trilinear hex shape function for local node `node_id`
/// at parametric point `xi`.
pub fn linear_hex_shape_3d(node_id: usize, xi: [f64; 3]) -> Result<f64> {
    let signs = HEX_XI.get(node_id).ok_or(Error::IndexOutOfRange {
        what: "hex shape function node",
        index: node_id,
        len: 8,
    })?;
    Ok(0.125
        * (1.0 + signs[0] * xi[0])
        * (1.0 + signs[1] * xi[1])
        * (1.0 + signs[2] * xi[2]))
}

/// Evaluate the linear tet shape function for local node `node_id`
/// at parametric point `xi`.
///
/// The tetrahedron uses volume coordinates: the first three are stored
/// in `xi`, the fourth is implicit (`1 - xi[0] - xi[1] - xi[2]`).
pub fn linear_tet_shape_3d(node_id: usize, xi: [f64; 3]) -> Result<f64> {
    let vol_xi = [xi[0], xi[1], xi[2], 1.0 - xi[0] - xi[1] - xi[2]];
    vol_xi.get(node_id).copied().ok_or(Error::IndexOutOfRange {
        what: "tet shape function node",
        index: node_id,
        len: 4,
    })
}

/// Interpolate a physical position on a tri or quad face from its corner
/// coordinates and a 2D parametric point.
///
/// The face type is inferred from the number of corners (3 or 4).
pub fn interpolate_face_point(corners: &[Point3], xi: [f64; 2]) -> Result<Point3> {
    let mut point = Point3::zeros();
    match corners.len() {
        3 => {
            for (j, corner) in corners.iter().enumerate() {
                point += corner * linear_tri_shape_2d(j, xi)?;
            }
        }
        4 => {
            for (j, corner) in corners.iter().enumerate() {
                point += corner * linear_quad_shape_2d(j, xi)?;
            }
        }
        n => {
            return Err(Error::InvalidTopology(format!(
                "face interpolation requires 3 or 4 corners, got {}",
                n
            )))
        }
    }
    Ok(point)
}

/// Interpolate a physical position inside a tet or hex volume from its
/// corner coordinates and a 3D parametric point.
///
/// The element type is inferred from the number of corners (4 or 8).
pub fn interpolate_volume_point(corners: &[Point3], xi: [f64; 3]) -> Result<Point3> {
    let mut point = Point3::zeros();
    match corners.len() {
        4 => {
            for (j, corner) in corners.iter().enumerate() {
                point += corner * linear_tet_shape_3d(j, xi)?;
            }
        }
        8 => {
            for (j, corner) in corners.iter().enumerate() {
                point += corner * linear_hex_shape_3d(j, xi)?;
            }
        }
        n => {
            return Err(Error::InvalidTopology(format!(
                "volume interpolation requires 4 or 8 corners, got {}",
                n
            )))
        }
    }
    Ok(point)
}
