use serde::{Deserialize, Serialize};

/// Segment counts after each line-finding stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStage {
    /// Segments returned by the extractor.
    pub raw: usize,
    pub horizontal: usize,
    pub vertical: usize,
    /// Bucket sizes after near-collinear duplicates were removed.
    pub horizontal_deduped: usize,
    pub vertical_deduped: usize,
}

impl SegmentStage {
    /// Segments that fell in the dead zone between the two buckets.
    pub fn dropped_diagonal(&self) -> usize {
        self.raw.saturating_sub(self.horizontal + self.vertical)
    }
}
