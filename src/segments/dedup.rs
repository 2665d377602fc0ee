use super::Segment;
use crate::angle::angle_between_dirless_deg;
use serde::{Deserialize, Serialize};

/// Thresholds deciding when two segments describe the same physical edge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupOptions {
    /// Maximum undirected angle between the two directions, in degrees.
    pub angle_thresh_deg: f64,
    /// Maximum distance from the candidate's first endpoint to the kept
    /// segment's line, in pixels.
    pub dist_thresh_px: f64,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            angle_thresh_deg: 5.0,
            dist_thresh_px: 10.0,
        }
    }
}

/// Returns true when `candidate` is nearly collinear with `kept`.
///
/// Zero-length segments are never collinear with anything. The distance is
/// measured from `candidate.p0` to the infinite line through `kept`.
pub fn is_near_collinear(kept: &Segment, candidate: &Segment, options: &DedupOptions) -> bool {
    if kept.is_degenerate() || candidate.is_degenerate() {
        return false;
    }
    let Some(angle) = angle_between_dirless_deg(kept.direction(), candidate.direction()) else {
        return false;
    };
    if angle > options.angle_thresh_deg {
        return false;
    }
    let dist = kept.line_equation().distance(
        f64::from(candidate.p0[0]),
        f64::from(candidate.p0[1]),
    );
    dist <= options.dist_thresh_px
}

/// Greedy first-seen-wins suppression of near-collinear duplicates.
///
/// Segments are visited in input order and kept only if they are not nearly
/// collinear with any segment kept so far, so the representative of a cluster
/// is always its earliest member. Quadratic in the bucket size.
pub fn dedup_segments(segments: &[Segment], options: &DedupOptions) -> Vec<Segment> {
    let mut kept: Vec<Segment> = Vec::with_capacity(segments.len());
    for seg in segments {
        if !kept
            .iter()
            .any(|existing| is_near_collinear(existing, seg, options))
        {
            kept.push(*seg);
        }
    }
    kept
}
