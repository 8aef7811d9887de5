//! 3x3 projective transforms solved from 4-point correspondences.

use nalgebra::{SMatrix, SVector};

use crate::geometry::Point;

/// A 3x3 projective (homography) matrix.
///
/// Maps planar quadrilaterals onto one another, preserving straight lines
/// but not angles or parallelism. Computed fresh per region, never cached.
#[derive(Clone, Copy, Debug)]
pub struct Homography {
    /// The 3x3 matrix.
    pub h: SMatrix<f64, 3, 3>,
}

impl Homography {
    /// Compute the homography mapping 4 source points onto 4 destination
    /// points via direct linear transform.
    ///
    /// With exactly 4 correspondences the 8 degrees of freedom are solved
    /// exactly: fixing `h[2][2] = 1` turns the DLT system into an 8x8
    /// linear solve (LU). Returns `None` when the correspondences are
    /// degenerate (collinear or coincident points).
    #[must_use]
    pub fn from_pairs(src: &[Point; 4], dst: &[Point; 4]) -> Option<Self> {
        let mut a = SMatrix::<f64, 8, 9>::zeros();

        for i in 0..4 {
            let sx = src[i].x;
            let sy = src[i].y;
            let dx = dst[i].x;
            let dy = dst[i].y;

            a[(i * 2, 0)] = -sx;
            a[(i * 2, 1)] = -sy;
            a[(i * 2, 2)] = -1.0;
            a[(i * 2, 6)] = sx * dx;
            a[(i * 2, 7)] = sy * dx;
            a[(i * 2, 8)] = dx;

            a[(i * 2 + 1, 3)] = -sx;
            a[(i * 2 + 1, 4)] = -sy;
            a[(i * 2 + 1, 5)] = -1.0;
            a[(i * 2 + 1, 6)] = sx * dy;
            a[(i * 2 + 1, 7)] = sy * dy;
            a[(i * 2 + 1, 8)] = dy;
        }

        let mut m = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for i in 0..8 {
            for j in 0..8 {
                m[(i, j)] = a[(i, j)];
            }
            b[i] = -a[(i, 8)];
        }

        let h_vec = m.lu().solve(&b)?;
        let mut h = SMatrix::<f64, 3, 3>::identity();
        h[(0, 0)] = h_vec[0];
        h[(0, 1)] = h_vec[1];
        h[(0, 2)] = h_vec[2];
        h[(1, 0)] = h_vec[3];
        h[(1, 1)] = h_vec[4];
        h[(1, 2)] = h_vec[5];
        h[(2, 0)] = h_vec[6];
        h[(2, 1)] = h_vec[7];
        h[(2, 2)] = 1.0;
        Some(Self { h })
    }

    /// Project a point through the homography.
    #[must_use]
    pub fn project(&self, p: Point) -> Point {
        let res = self.h * SVector::<f64, 3>::new(p.x, p.y, 1.0);
        let w = res[2];
        Point::new(res[0] / w, res[1] / w)
    }

    /// The inverse transform, or `None` when the matrix is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        self.h.try_inverse().map(|h| Self { h })
    }
}
