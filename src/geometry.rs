//! Geometry primitives: implicit line equations, intersections and polygon
//! area.
//!
//! Lines are kept in the implicit form `a·x + b·y + c = 0` built directly from
//! two segment endpoints. The coefficients are not unit-normalised; only
//! [`LineEquation::distance`] divides by `sqrt(a² + b²)`.

use crate::segments::Segment;
use serde::{Deserialize, Serialize};

/// Absolute determinant threshold below which two lines count as parallel.
pub const PARALLEL_EPS: f64 = 1e-6;

/// Floating point image coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Implicit line `a·x + b·y + c = 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LineEquation {
    /// Line through `(x1, y1)` and `(x2, y2)`. Identical points give the
    /// degenerate equation `a = b = 0`.
    pub fn through(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            a: y2 - y1,
            b: x1 - x2,
            c: x2 * y1 - x1 * y2,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }

    /// Signed, unnormalised residual of `(x, y)`.
    #[inline]
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.a * x + self.b * y + self.c
    }

    /// Perpendicular distance from `(x, y)` to the line. Infinite for a
    /// degenerate equation.
    pub fn distance(&self, x: f64, y: f64) -> f64 {
        let norm = self.a.hypot(self.b);
        if norm == 0.0 {
            return f64::INFINITY;
        }
        self.evaluate(x, y).abs() / norm
    }
}

/// Implicit equation of the infinite line carrying `segment`.
pub fn line_equation(segment: &Segment) -> LineEquation {
    LineEquation::through(
        f64::from(segment.p0[0]),
        f64::from(segment.p0[1]),
        f64::from(segment.p1[0]),
        f64::from(segment.p1[1]),
    )
}

/// Intersection of two lines using the default [`PARALLEL_EPS`].
pub fn intersect(l1: &LineEquation, l2: &LineEquation) -> Option<Point2D> {
    intersect_with_eps(l1, l2, PARALLEL_EPS)
}

/// Solves the 2×2 system with Cramer's rule.
///
/// Returns `None` when `|a1·b2 − a2·b1| < eps` (parallel or coincident lines).
pub fn intersect_with_eps(l1: &LineEquation, l2: &LineEquation, eps: f64) -> Option<Point2D> {
    let det = l1.a * l2.b - l2.a * l1.b;
    if det.abs() < eps {
        return None;
    }
    let x = (l2.b * (-l1.c) - l1.b * (-l2.c)) / det;
    let y = (l1.a * (-l2.c) - l2.a * (-l1.c)) / det;
    Some(Point2D::new(x, y))
}

/// Shoelace area of a closed polygon. Winding independent; fewer than three
/// points have zero area.
pub fn polygon_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        twice_area += p.x * q.y - q.x * p.y;
    }
    twice_area.abs() * 0.5
}

/// True when the closed polygon turns consistently in one direction, i.e. it
/// is convex and not self-intersecting (for simple vertex counts such as a
/// quadrilateral).
pub fn is_convex(points: &[Point2D]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
        if cross.abs() < PARALLEL_EPS {
            return false;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn line_equation_matches_endpoint_formula() {
        let seg = Segment::new(1, 2, 4, 8);
        let line = line_equation(&seg);
        assert_eq!(line.a, 6.0);
        assert_eq!(line.b, -3.0);
        assert_eq!(line.c, 4.0 * 2.0 - 1.0 * 8.0);
        assert!(approx_eq(line.evaluate(1.0, 2.0), 0.0));
        assert!(approx_eq(line.evaluate(4.0, 8.0), 0.0));
    }

    #[test]
    fn zero_length_segment_gives_degenerate_equation() {
        let line = line_equation(&Segment::new(5, 5, 5, 5));
        assert!(line.is_degenerate());
        assert!(line.distance(0.0, 0.0).is_infinite());
    }

    #[test]
    fn intersect_perpendicular_lines() {
        let horizontal = line_equation(&Segment::new(0, 10, 100, 10));
        let vertical = line_equation(&Segment::new(30, 0, 30, 100));
        let p = intersect(&horizontal, &vertical).expect("lines cross");
        assert!(approx_eq(p.x, 30.0));
        assert!(approx_eq(p.y, 10.0));
    }

    #[test]
    fn intersect_line_with_itself_is_none() {
        for seg in [
            Segment::new(0, 0, 100, 2),
            Segment::new(3, -7, 12, 40),
            Segment::new(0, 0, 1, 0),
        ] {
            let line = line_equation(&seg);
            assert!(intersect(&line, &line).is_none(), "{seg:?}");
        }
    }

    #[test]
    fn intersect_parallel_lines_is_none() {
        let a = line_equation(&Segment::new(0, 0, 100, 0));
        let b = line_equation(&Segment::new(0, 50, 100, 50));
        assert!(intersect(&a, &b).is_none());
    }

    #[test]
    fn intersect_respects_custom_epsilon() {
        let a = LineEquation { a: 1.0, b: 0.0, c: 0.0 };
        let b = LineEquation { a: 1.0, b: 1e-4, c: -1.0 };
        assert!(intersect(&a, &b).is_some());
        assert!(intersect_with_eps(&a, &b, 1e-3).is_none());
    }

    #[test]
    fn polygon_area_is_winding_independent() {
        let square = [
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 5.0),
            Point2D::new(0.0, 5.0),
        ];
        let mut reversed = square;
        reversed.reverse();
        assert!(approx_eq(polygon_area(&square), 50.0));
        assert!(approx_eq(polygon_area(&reversed), 50.0));
        assert_eq!(polygon_area(&square[..2]), 0.0);
    }

    #[test]
    fn convexity_detects_bow_tie() {
        let convex = [
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ];
        let bow_tie = [
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 10.0),
        ];
        assert!(is_convex(&convex));
        assert!(!is_convex(&bow_tie));
    }
}
