use crate::classifier::{Rank, Suit};
use crate::diagnostics::{SegmentStage, TimingBreakdown};
use crate::quad::Quad;
use crate::regions::{Rect, RegionMap};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    /// Crop applied before detection, in frame coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi: Option<Rect>,
}

/// Everything known about one processed frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<SegmentStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quad: Option<Quad>,
    /// Source→card homography, row-major.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homography: Option<[[f64; 3]; 3]>,
    pub regions: RegionMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timings: TimingBreakdown,
}

impl DetectionReport {
    pub fn new(input: InputDescriptor) -> Self {
        Self {
            input,
            segments: None,
            quad: None,
            homography: None,
            regions: RegionMap::default(),
            rank: None,
            suit: None,
            error: None,
            timings: TimingBreakdown::default(),
        }
    }

    pub fn found(&self) -> bool {
        self.error.is_none() && self.quad.is_some()
    }
}
