//! Four-point projective transforms.
//!
//! `perspective_transform` solves for the homography that maps four source
//! points exactly onto four destination points, with `h33` fixed to 1:
//!
//! ```text
//! u = (h11·x + h12·y + h13) / (h31·x + h32·y + 1)
//! v = (h21·x + h22·y + h23) / (h31·x + h32·y + 1)
//! ```
//!
//! Each correspondence contributes two rows to an 8×8 linear system that is
//! solved with an LU decomposition.

use crate::geometry::Point2D;
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

const EPS: f64 = 1e-12;

/// Homography mapping `src[i]` onto `dst[i]` for all four pairs.
///
/// Returns `None` when the system is singular, which happens when three of
/// the points in either set are collinear.
pub fn perspective_transform(src: &[Point2D; 4], dst: &[Point2D; 4]) -> Option<Matrix3<f64>> {
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for i in 0..4 {
        let (x, y) = (src[i].x, src[i].y);
        let (u, v) = (dst[i].x, dst[i].y);
        let r = 2 * i;
        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -x * u;
        a[(r, 7)] = -y * u;
        b[r] = u;

        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -x * v;
        a[(r + 1, 7)] = -y * v;
        b[r + 1] = v;
    }

    let p = a.lu().solve(&b)?;
    if p.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let h = Matrix3::new(p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7], 1.0);
    if h.determinant().abs() <= EPS {
        return None;
    }
    Some(h)
}

/// Maps one point through `h`. `None` if it lands on the line at infinity.
#[inline]
pub fn apply_homography(h: &Matrix3<f64>, p: Point2D) -> Option<Point2D> {
    let v = h * Vector3::new(p.x, p.y, 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some(Point2D::new(v[0] / w, v[1] / w))
}

/// Maps every point through `h`; `None` if any of them cannot be mapped.
pub fn apply_homography_points(h: &Matrix3<f64>, pts: &[Point2D]) -> Option<Vec<Point2D>> {
    pts.iter().map(|&p| apply_homography(h, p)).collect()
}

/// Row-major copy of a 3×3 matrix for serialization.
pub fn to_rows(h: &Matrix3<f64>) -> [[f64; 3]; 3] {
    [
        [h[(0, 0)], h[(0, 1)], h[(0, 2)]],
        [h[(1, 0)], h[(1, 1)], h[(1, 2)]],
        [h[(2, 0)], h[(2, 1)], h[(2, 2)]],
    ]
}
