#![doc = include_str!("../README.md")]

// Public pipeline surface
pub mod classifier;
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod quad;
pub mod rectify;
pub mod regions;

// Building blocks, usable on their own.
pub mod angle;
pub mod edges;
pub mod geometry;
pub mod homography;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{CardDetection, CardDetector, CardParams, Recognition};
pub use crate::error::CardError;

// Geometry values flowing between stages.
pub use crate::geometry::Point2D;
pub use crate::quad::Quad;
pub use crate::regions::{Rect, RegionMap, Role};

// Recognition seam.
pub use crate::classifier::{Classifier, Rank, Suit};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use card_detector::prelude::*;
///
/// # fn main() -> Result<(), CardError> {
/// let frame = load_color_image(std::path::Path::new("frame.png"))?;
/// let detector = CardDetector::new(CardParams::default());
/// let detection = detector.detect(&frame)?;
/// println!("corners={:?} regions={}", detection.corners.quad, detection.regions.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::classifier::{Classifier, Rank, RankClassifier, Suit, SuitClassifier};
    pub use crate::detector::{centered_roi, CardDetection, CardDetector, CardParams, RoiParams};
    pub use crate::error::CardError;
    pub use crate::geometry::Point2D;
    pub use crate::image::io::load_color_image;
    pub use crate::quad::Quad;
    pub use crate::regions::{Rect, RegionMap, Role};
    pub use crate::segments::Segment;
}
