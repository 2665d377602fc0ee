//! Quadrilateral resolution from oriented segment sets.
//!
//! The card outline is bounded by the topmost and bottommost horizontal
//! segments and the leftmost and rightmost vertical segments. Their carrying
//! lines are intersected pairwise, which fixes the clockwise corner order by
//! construction rather than by sorting points afterwards.

use crate::error::CardError;
use crate::geometry::{intersect_with_eps, is_convex, polygon_area, Point2D, PARALLEL_EPS};
use crate::segments::Segment;
use serde::{Deserialize, Serialize};

/// Four corners in clockwise order: top-left, top-right, bottom-right,
/// bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point2D,
    pub top_right: Point2D,
    pub bottom_right: Point2D,
    pub bottom_left: Point2D,
}

impl Quad {
    pub fn new(
        top_left: Point2D,
        top_right: Point2D,
        bottom_right: Point2D,
        bottom_left: Point2D,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Builds a quad from exactly four clockwise corners.
    ///
    /// # Panics
    /// Panics if `corners.len() != 4`; passing any other count is a caller bug.
    pub fn from_slice(corners: &[Point2D]) -> Self {
        assert_eq!(
            corners.len(),
            4,
            "a quad needs exactly 4 corners, got {}",
            corners.len()
        );
        Self::new(corners[0], corners[1], corners[2], corners[3])
    }

    /// Axis-aligned rectangle `[0, width-1] × [0, height-1]`.
    pub fn canonical(width: u32, height: u32) -> Self {
        let w = f64::from(width.saturating_sub(1));
        let h = f64::from(height.saturating_sub(1));
        Self::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(w, 0.0),
            Point2D::new(w, h),
            Point2D::new(0.0, h),
        )
    }

    pub fn points(&self) -> [Point2D; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.points())
    }

    pub fn is_convex(&self) -> bool {
        is_convex(&self.points())
    }

    /// Shifts every corner by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let shift = |p: Point2D| Point2D::new(p.x + dx, p.y + dy);
        Self::new(
            shift(self.top_left),
            shift(self.top_right),
            shift(self.bottom_right),
            shift(self.bottom_left),
        )
    }
}

/// The four segments a quad was resolved from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingSegments {
    pub top: Segment,
    pub bottom: Segment,
    pub left: Segment,
    pub right: Segment,
}

/// Picks the extreme segments of each bucket.
///
/// Horizontals are ordered by `y1 + y2`, verticals by `x1 + x2`, both with a
/// stable sort so equal keys keep their input order.
pub fn select_bounding_segments(
    horizontal: &[Segment],
    vertical: &[Segment],
) -> Result<BoundingSegments, CardError> {
    if horizontal.len() < 2 || vertical.len() < 2 {
        return Err(CardError::InsufficientLines {
            horizontal: horizontal.len(),
            vertical: vertical.len(),
        });
    }

    let mut horiz = horizontal.to_vec();
    horiz.sort_by_key(Segment::y_sum);
    let mut vert = vertical.to_vec();
    vert.sort_by_key(Segment::x_sum);

    // Both vectors hold at least two elements.
    Ok(BoundingSegments {
        top: horiz[0],
        bottom: horiz[horiz.len() - 1],
        left: vert[0],
        right: vert[vert.len() - 1],
    })
}

/// Resolves the card corners with the default parallel epsilon.
pub fn resolve_quad(horizontal: &[Segment], vertical: &[Segment]) -> Result<Quad, CardError> {
    resolve_quad_with_eps(horizontal, vertical, PARALLEL_EPS)
}

/// Resolves the card corners from deduplicated segment sets.
///
/// Fails with [`CardError::InsufficientLines`] when either bucket holds fewer
/// than two segments and with [`CardError::DegenerateGeometry`] when any
/// bounding pair does not intersect. No partial quad is ever returned.
pub fn resolve_quad_with_eps(
    horizontal: &[Segment],
    vertical: &[Segment],
    parallel_eps: f64,
) -> Result<Quad, CardError> {
    let bounds = select_bounding_segments(horizontal, vertical)?;
    let top = bounds.top.line_equation();
    let bottom = bounds.bottom.line_equation();
    let left = bounds.left.line_equation();
    let right = bounds.right.line_equation();

    let corner = |a, b, name: &str| {
        intersect_with_eps(a, b, parallel_eps).ok_or_else(|| {
            CardError::DegenerateGeometry(format!("{name} lines are parallel or coincident"))
        })
    };

    Ok(Quad::new(
        corner(&top, &left, "top/left")?,
        corner(&top, &right, "top/right")?,
        corner(&bottom, &right, "bottom/right")?,
        corner(&bottom, &left, "bottom/left")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_point(p: Point2D, x: f64, y: f64) -> bool {
        (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9
    }

    #[test]
    fn resolves_axis_aligned_card() {
        let horizontal = [Segment::new(0, 0, 100, 0), Segment::new(0, 450, 100, 450)];
        let vertical = [Segment::new(0, 0, 0, 100), Segment::new(300, 0, 300, 100)];
        let quad = resolve_quad(&horizontal, &vertical).expect("quad");
        assert!(approx_point(quad.top_left, 0.0, 0.0));
        assert!(approx_point(quad.top_right, 300.0, 0.0));
        assert!(approx_point(quad.bottom_right, 300.0, 450.0));
        assert!(approx_point(quad.bottom_left, 0.0, 450.0));
    }

    #[test]
    fn picks_extreme_segments_regardless_of_input_order() {
        let horizontal = [
            Segment::new(10, 200, 290, 202),
            Segment::new(10, 441, 290, 439),
            Segment::new(10, 12, 290, 9),
            Segment::new(10, 100, 290, 100),
        ];
        let vertical = [
            Segment::new(150, 10, 151, 440),
            Segment::new(291, 10, 289, 440),
            Segment::new(11, 440, 9, 10),
        ];
        let bounds = select_bounding_segments(&horizontal, &vertical).unwrap();
        assert_eq!(bounds.top, horizontal[2]);
        assert_eq!(bounds.bottom, horizontal[1]);
        assert_eq!(bounds.left, vertical[2]);
        assert_eq!(bounds.right, vertical[1]);

        let quad = resolve_quad(&horizontal, &vertical).unwrap();
        assert!(quad.is_convex());
        assert!(quad.top_left.x < quad.top_right.x);
        assert!(quad.bottom_left.x < quad.bottom_right.x);
        assert!(quad.top_left.y < quad.bottom_left.y);
        assert!(quad.top_right.y < quad.bottom_right.y);
    }

    #[test]
    fn equal_sort_keys_keep_input_order() {
        let first = Segment::new(0, 10, 100, 10);
        let second = Segment::new(0, 12, 100, 8);
        let bottom = Segment::new(0, 90, 100, 90);
        let vertical = [Segment::new(0, 0, 0, 100), Segment::new(100, 0, 100, 100)];
        let bounds = select_bounding_segments(&[first, second, bottom], &vertical).unwrap();
        assert_eq!(bounds.top, first);
        let bounds = select_bounding_segments(&[second, first, bottom], &vertical).unwrap();
        assert_eq!(bounds.top, second);
    }

    #[test]
    fn too_few_vertical_lines_is_an_error() {
        let horizontal = [Segment::new(0, 0, 100, 0), Segment::new(0, 450, 100, 450)];
        let vertical = [Segment::new(0, 0, 0, 100)];
        let err = resolve_quad(&horizontal, &vertical).unwrap_err();
        assert_eq!(
            err,
            CardError::InsufficientLines {
                horizontal: 2,
                vertical: 1
            }
        );
    }

    #[test]
    fn too_few_horizontal_lines_is_an_error() {
        let vertical = [Segment::new(0, 0, 0, 100), Segment::new(300, 0, 300, 100)];
        let err = resolve_quad(&[], &vertical).unwrap_err();
        assert!(matches!(err, CardError::InsufficientLines { horizontal: 0, .. }));
    }

    #[test]
    fn parallel_bounding_lines_are_degenerate() {
        // A "vertical" bucket polluted with horizontal segments.
        let horizontal = [Segment::new(0, 0, 100, 0), Segment::new(0, 450, 100, 450)];
        let vertical = [Segment::new(0, 5, 100, 5), Segment::new(300, 0, 300, 100)];
        let err = resolve_quad(&horizontal, &vertical).unwrap_err();
        assert!(matches!(err, CardError::DegenerateGeometry(_)), "{err:?}");
    }

    #[test]
    fn resolved_quads_are_convex_under_perspective() {
        let cases = [
            (
                [Segment::new(40, 30, 260, 50), Segment::new(20, 420, 290, 400)],
                [Segment::new(40, 30, 20, 420), Segment::new(260, 50, 290, 400)],
            ),
            (
                [Segment::new(0, 0, 300, 10), Segment::new(0, 460, 300, 450)],
                [Segment::new(5, 0, 0, 460), Segment::new(295, 10, 300, 450)],
            ),
        ];
        for (horizontal, vertical) in cases {
            let quad = resolve_quad(&horizontal, &vertical).unwrap();
            assert!(quad.is_convex(), "{quad:?}");
            assert!(quad.area() > 0.0);
        }
    }

    #[test]
    #[should_panic(expected = "exactly 4 corners")]
    fn from_slice_rejects_wrong_corner_count() {
        let _ = Quad::from_slice(&[Point2D::default(); 3]);
    }

    #[test]
    fn canonical_quad_spans_last_pixel() {
        let quad = Quad::canonical(300, 450);
        assert!(approx_point(quad.bottom_right, 299.0, 449.0));
        assert!(approx_point(quad.top_left, 0.0, 0.0));
    }
}
