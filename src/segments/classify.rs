use super::Segment;
use serde::{Deserialize, Serialize};

/// Threshold for the horizontal/vertical split.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    /// A segment within this many degrees of the x axis is horizontal; within
    /// this many degrees of the y axis it is vertical.
    pub angle_thresh_deg: f64,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            angle_thresh_deg: 15.0,
        }
    }
}

/// Near-horizontal and near-vertical buckets, each in input order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientedSegments {
    pub horizontal: Vec<Segment>,
    pub vertical: Vec<Segment>,
}

impl OrientedSegments {
    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }
}

/// Splits segments into near-horizontal and near-vertical sets.
///
/// The folded angle `a ∈ [0°, 90°]` goes to `horizontal` when
/// `a < threshold` and to `vertical` when `a > 90° − threshold`. Anything in
/// between is dropped; ambiguous diagonals are never forced into a bucket.
/// With thresholds above 45° the horizontal test wins.
pub fn classify_segments(segments: &[Segment], options: &ClassifyOptions) -> OrientedSegments {
    let low = options.angle_thresh_deg;
    let high = 90.0 - options.angle_thresh_deg;
    let mut out = OrientedSegments::default();
    for seg in segments {
        let angle = seg.folded_angle_deg();
        if angle < low {
            out.horizontal.push(*seg);
        } else if angle > high {
            out.vertical.push(*seg);
        }
    }
    out
}
