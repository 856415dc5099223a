//! Time-growing cut surfaces and 2D line cutting.
//!
//! A [`GeometricCut`] describes the pseudo-time interval over which a
//! crack or interface grows from zero extent to its full extent. The
//! growth fraction blends the cut's geometry smoothly across a load
//! step instead of snapping from "no cut" to "full cut", which would
//! put a discontinuity in the residual between timesteps.
//!
//! [`LineSegmentCut`] combines a growth interval with a 2D line
//! segment and produces edge-crossing records for elements and
//! fragment boundaries.

use crate::error::{Error, Result};
use crate::types::{CutEdge, Point3};

/// Tolerance for degenerate (parallel) intersection configurations.
const TOL: f64 = 1e-10;

/// Scalar 2D cross product: `ax*by - bx*ay`.
///
/// Its sign tells which side of the vector `(ax, ay)` the vector
/// `(bx, by)` falls on.
#[inline]
pub fn cross_product_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - bx * ay
}

/// The pseudo-time extent over which a cut grows to full size.
///
/// Immutable after construction; all queries are pure and safe to call
/// concurrently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricCut {
    t_start: f64,
    t_end: f64,
}

impl GeometricCut {
    /// Create a cut growing over `[t_start, t_end]`.
    ///
    /// A reversed interval is rejected with [`Error::InvalidCutExtent`];
    /// an empty interval (`t_start == t_end`) is allowed and behaves as
    /// a step function.
    pub fn new(t_start: f64, t_end: f64) -> Result<Self> {
        if t_start > t_end {
            return Err(Error::InvalidCutExtent { t_start, t_end });
        }
        Ok(Self { t_start, t_end })
    }

    /// Start of the growth interval.
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    /// End of the growth interval.
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// Fraction of the cut's full extent active at `time`: a linear
    /// ramp from 0 at `t_start` to 1 at `t_end`, clamped outside the
    /// interval.
    pub fn cut_fraction(&self, time: f64) -> f64 {
        if time <= self.t_start {
            0.0
        } else if time >= self.t_end {
            1.0
        } else {
            (time - self.t_start) / (self.t_end - self.t_start)
        }
    }
}

/// A 2D line-segment cut with a time-growing extent.
///
/// The active cutting segment at a given time runs from `start` to
/// `start + cut_fraction(time) * (end - start)`. Elements are assumed
/// to lie in the xy-plane; z components are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegmentCut {
    start: Point3,
    end: Point3,
    extent: GeometricCut,
}

impl LineSegmentCut {
    /// Create a line-segment cut growing over the given time extent.
    pub fn new(start: Point3, end: Point3, extent: GeometricCut) -> Self {
        Self { start, end, extent }
    }

    /// The growth extent of this cut.
    pub fn extent(&self) -> &GeometricCut {
        &self.extent
    }

    /// Intersect the active cutting segment at `time` with each side
    /// of the closed polygon defined by `corners`, in ring order.
    ///
    /// Returns one [`CutEdge`] per crossed side, with the fractional
    /// crossing position measured from the side's first corner.
    pub fn cut_elem_by_geometry(&self, corners: &[Point3], time: f64) -> Vec<CutEdge> {
        let fraction = self.extent.cut_fraction(time);
        let n = corners.len();
        let mut cut_edges = Vec::new();
        for i in 0..n {
            let p1 = corners[i];
            let p2 = corners[(i + 1) % n];
            if let Some(int_frac) = self.intersect_segment(p1, p2, fraction) {
                cut_edges.push(CutEdge::new(i, int_frac));
            }
        }
        cut_edges
    }

    /// Intersect the active cutting segment at `time` with an explicit
    /// list of boundary segments (a fragment boundary).
    pub fn cut_frag_by_geometry(&self, frag_edges: &[[Point3; 2]], time: f64) -> Vec<CutEdge> {
        let fraction = self.extent.cut_fraction(time);
        let mut cut_edges = Vec::new();
        for (i, seg) in frag_edges.iter().enumerate() {
            if let Some(int_frac) = self.intersect_segment(seg[0], seg[1], fraction) {
                cut_edges.push(CutEdge::new(i, int_frac));
            }
        }
        cut_edges
    }

    /// Intersect one edge segment with the cutting segment grown to
    /// `cut_fraction` of its full length.
    ///
    /// Returns the fractional position along the edge segment, or
    /// `None` when the segments are parallel or do not cross.
    fn intersect_segment(&self, p1: Point3, p2: Point3, cut_fraction: f64) -> Option<f64> {
        let seg_dir = (p2.x - p1.x, p2.y - p1.y);
        let cut_dir = (self.end.x - self.start.x, self.end.y - self.start.y);
        let cut_start_to_seg_start = (p1.x - self.start.x, p1.y - self.start.y);

        let cut_dir_cross_seg_dir =
            cross_product_2d(cut_dir.0, cut_dir.1, seg_dir.0, seg_dir.1);
        if cut_dir_cross_seg_dir.abs() < TOL {
            return None;
        }

        // fraction along the cutting segment where it meets the edge line
        let cut_int_frac = cross_product_2d(
            cut_start_to_seg_start.0,
            cut_start_to_seg_start.1,
            seg_dir.0,
            seg_dir.1,
        ) / cut_dir_cross_seg_dir;
        if !(0.0..=cut_fraction).contains(&cut_int_frac) {
            return None;
        }

        // the cut crosses the edge's infinite line within its active
        // extent; the crossing must also fall inside the edge segment
        let int_frac = cross_product_2d(
            cut_start_to_seg_start.0,
            cut_start_to_seg_start.1,
            cut_dir.0,
            cut_dir.1,
        ) / cut_dir_cross_seg_dir;
        if (0.0..=1.0).contains(&int_frac) {
            Some(int_frac)
        } else {
            None
        }
    }
}
