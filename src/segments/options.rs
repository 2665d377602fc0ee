use serde::{Deserialize, Serialize};

/// Options controlling the LSD-like edge segment extractor.
///
/// - `median_radius`: radius of the median pre-filter (3 → 7×7 window) that
///   suppresses sensor noise and card texture before gradients are taken.
/// - `normal_span_limit_px`: cap the perpendicular thickness of a grown
///   region by rejecting segments whose span along the fitted normal exceeds
///   the value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LsdOptions {
    /// Median filter radius in pixels; `0` disables the pre-filter.
    pub median_radius: u32,
    /// Minimum Sobel magnitude (on intensities scaled to [0, 1]) for seed and
    /// member pixels.
    pub magnitude_threshold: f32,
    /// Orientation tolerance around the seed normal in degrees.
    pub angle_tolerance_deg: f32,
    /// Minimum accepted segment length in pixels.
    pub min_length_px: f32,
    /// Minimum number of pixels in a grown region.
    pub min_region_px: usize,
    /// Minimum share of region pixels within half the angle tolerance.
    pub min_aligned_fraction: f32,
    /// Optional maximum span (in pixels) along the segment normal.
    pub normal_span_limit_px: Option<f32>,
}

impl Default for LsdOptions {
    fn default() -> Self {
        Self {
            median_radius: 3,
            magnitude_threshold: 0.25,
            angle_tolerance_deg: 22.5,
            min_length_px: 20.0,
            min_region_px: 12,
            min_aligned_fraction: 0.6,
            normal_span_limit_px: None,
        }
    }
}
