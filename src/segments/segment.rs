use crate::angle::folded_angle_deg;
use crate::geometry::{line_equation, LineEquation, Point2D};
use serde::{Deserialize, Serialize};

/// Line segment with integer endpoints, as produced by the edge detector.
///
/// Endpoint order carries no meaning beyond identity; no stage reorders it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub p0: [i32; 2],
    pub p1: [i32; 2],
}

impl Segment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            p0: [x1, y1],
            p1: [x2, y2],
        }
    }

    /// Endpoint delta `p1 - p0` as floats.
    pub fn direction(&self) -> [f64; 2] {
        [
            f64::from(self.p1[0]) - f64::from(self.p0[0]),
            f64::from(self.p1[1]) - f64::from(self.p0[1]),
        ]
    }

    pub fn is_degenerate(&self) -> bool {
        self.p0 == self.p1
    }

    pub fn length(&self) -> f64 {
        let [dx, dy] = self.direction();
        dx.hypot(dy)
    }

    pub fn midpoint(&self) -> Point2D {
        Point2D::new(
            (f64::from(self.p0[0]) + f64::from(self.p1[0])) * 0.5,
            (f64::from(self.p0[1]) + f64::from(self.p1[1])) * 0.5,
        )
    }

    /// Angle to the horizontal axis folded into [0°, 90°].
    pub fn folded_angle_deg(&self) -> f64 {
        let [dx, dy] = self.direction();
        folded_angle_deg(dx, dy)
    }

    /// `y1 + y2`, the ordering key for horizontal segments.
    pub fn y_sum(&self) -> i64 {
        i64::from(self.p0[1]) + i64::from(self.p1[1])
    }

    /// `x1 + x2`, the ordering key for vertical segments.
    pub fn x_sum(&self) -> i64 {
        i64::from(self.p0[0]) + i64::from(self.p1[0])
    }

    /// Implicit equation `a·x + b·y + c = 0` of the carrying line.
    pub fn line_equation(&self) -> LineEquation {
        line_equation(self)
    }

    /// Shifts both endpoints by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.p0[0] + dx, self.p0[1] + dy, self.p1[0] + dx, self.p1[1] + dy)
    }
}
