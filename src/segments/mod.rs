//! Edge segments: detection, orientation split and duplicate suppression.
//!
//! The card outline is recovered from straight edge segments. This module
//! provides the three stages that turn a color frame into two clean segment
//! sets:
//!
//! - Detection (`detect_segments`): a lightweight LSD-like extractor. The
//!   frame is converted to grayscale, median filtered, scaled to [0, 1] and
//!   differentiated with Sobel kernels. Pixels are grown into regions whose
//!   gradient orientation stays within a tolerance of the seed orientation; a
//!   PCA fit over each region yields its principal direction, and projecting
//!   the region onto that axis gives the endpoints. Regions that are too
//!   small, too short or poorly aligned are rejected.
//! - Classification (`classify_segments`): near-horizontal and near-vertical
//!   buckets with a dead zone in between.
//! - Deduplication (`dedup_segments`): greedy first-seen-wins removal of
//!   near-collinear duplicates inside one bucket.
//!
//! Notes
//! - Orientation is taken modulo π (180°) everywhere; endpoint order never
//!   matters and is never changed.
//! - Region growing visits each pixel at most once, giving O(W·H) behavior;
//!   deduplication is quadratic in the (small) bucket size.

mod classify;
mod dedup;
mod extractor;
mod options;
mod region;
mod segment;

pub use classify::{classify_segments, ClassifyOptions, OrientedSegments};
pub use dedup::{dedup_segments, is_near_collinear, DedupOptions};
pub use options::LsdOptions;
pub use segment::Segment;

use crate::image::ImageF32;
use image::RgbImage;
use std::time::Instant;

/// Segments found in one frame together with the extraction time.
#[derive(Clone, Debug)]
pub struct LsdResult {
    pub segments: Vec<Segment>,
    pub elapsed_ms: f64,
}

/// Detect straight edge segments in a color frame.
pub fn detect_segments(image: &RgbImage, options: &LsdOptions) -> LsdResult {
    let start = Instant::now();
    let gray = image::imageops::grayscale(image);
    let filtered = if options.median_radius > 0 {
        imageproc::filter::median_filter(&gray, options.median_radius, options.median_radius)
    } else {
        gray
    };
    let l = ImageF32::from_gray(&filtered);
    let segments = lsd_extract_segments(&l, options);
    LsdResult {
        segments,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}

/// Run the extractor on an already prepared intensity image in [0, 1].
pub fn lsd_extract_segments(l: &ImageF32, options: &LsdOptions) -> Vec<Segment> {
    extractor::LsdExtractor::new(l, options).extract()
}
