//! Per-frame card pipeline.
//!
//! ```no_run
//! use card_detector::{CardDetector, CardParams};
//!
//! # fn example(frame: image::RgbImage) -> Result<(), card_detector::CardError> {
//! let detector = CardDetector::new(CardParams::default());
//! let detection = detector.detect(&frame)?;
//! println!("corners: {:?}", detection.corners.quad);
//! if let Some(rect) = detection.regions.num {
//!     println!("rank glyph at {rect:?}");
//! }
//! # Ok(())
//! # }
//! ```
//
// Stages
// - LSD: straight edge segments on the median-filtered frame.
// - Classify: horizontal / vertical buckets, diagonals dropped.
// - Dedup: near-collinear duplicates removed per bucket.
// - Resolve: extreme segments intersected into a clockwise quad.
// - Rectify: quad warped onto the canonical card.
// - Regions: rank/suit glyph rectangles and crops.

use super::params::CardParams;
use crate::classifier::Classifier;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{DetectionReport, InputDescriptor, SegmentStage, TimingBreakdown};
use crate::error::CardError;
use crate::homography::to_rows;
use crate::quad::{resolve_quad_with_eps, select_bounding_segments, BoundingSegments, Quad};
use crate::rectify::rectify;
use crate::regions::{crop_rect, extract_regions, Rect, RegionMap};
use crate::segments::{classify_segments, dedup_segments, detect_segments, OrientedSegments, Segment};
use image::RgbImage;
use log::{debug, warn};
use nalgebra::Matrix3;
use rayon::prelude::*;
use std::time::Instant;

/// Line-finding result: the quad plus what it was built from.
#[derive(Clone, Debug)]
pub struct CornerDetection {
    pub quad: Quad,
    pub bounds: BoundingSegments,
    /// Raw extractor output.
    pub segments: Vec<Segment>,
    /// Deduplicated horizontal and vertical buckets.
    pub oriented: OrientedSegments,
    pub stage: SegmentStage,
    pub timings: TimingBreakdown,
}

/// Full detection of one frame.
#[derive(Clone, Debug)]
pub struct CardDetection {
    /// Corners in the coordinates of the image passed to `detect`.
    pub corners: CornerDetection,
    /// Rectified card.
    pub card: RgbImage,
    /// Source→card homography.
    pub homography: Matrix3<f64>,
    pub regions: RegionMap,
    pub num_crop: Option<RgbImage>,
    pub flag_crop: Option<RgbImage>,
    /// Crop the detection ran on, in frame coordinates.
    pub roi: Option<Rect>,
    pub source_size: (u32, u32),
    pub timings: TimingBreakdown,
}

impl CardDetection {
    /// Corners in frame coordinates (undoes the ROI offset).
    pub fn quad_in_frame(&self) -> Quad {
        match self.roi {
            Some(r) => self
                .corners
                .quad
                .translated(f64::from(r.x), f64::from(r.y)),
            None => self.corners.quad,
        }
    }

    pub fn report(&self) -> DetectionReport {
        let (width, height) = self.source_size;
        let mut report = DetectionReport::new(InputDescriptor {
            path: None,
            width,
            height,
            roi: self.roi,
        });
        report.segments = Some(self.corners.stage);
        report.quad = Some(self.quad_in_frame());
        report.homography = Some(to_rows(&self.homography));
        report.regions = self.regions;
        report.timings = self.timings.clone();
        report
    }
}

/// Labels returned by the rank and suit classifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Recognition<R, S> {
    pub rank: Option<R>,
    pub suit: Option<S>,
}

/// Card detector. Holds only immutable parameters, so one instance can serve
/// many threads.
#[derive(Clone, Debug, Default)]
pub struct CardDetector {
    params: CardParams,
}

impl CardDetector {
    pub fn new(params: CardParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CardParams {
        &self.params
    }

    /// Finds the card corners: segments → buckets → dedup → quad.
    pub fn find_corners(&self, image: &RgbImage) -> Result<CornerDetection, CardError> {
        ensure_not_empty(image)?;
        let mut timings = TimingBreakdown::default();

        let lsd = detect_segments(image, &self.params.lsd);
        timings.push("lsd", lsd.elapsed_ms);

        let start = Instant::now();
        let split = classify_segments(&lsd.segments, &self.params.classify);
        let oriented = OrientedSegments {
            horizontal: dedup_segments(&split.horizontal, &self.params.dedup),
            vertical: dedup_segments(&split.vertical, &self.params.dedup),
        };
        timings.push("classify_dedup", elapsed_ms(start));

        let stage = SegmentStage {
            raw: lsd.segments.len(),
            horizontal: split.horizontal.len(),
            vertical: split.vertical.len(),
            horizontal_deduped: oriented.horizontal.len(),
            vertical_deduped: oriented.vertical.len(),
        };
        debug!(
            "CardDetector::find_corners segments raw={} h={}→{} v={}→{}",
            stage.raw,
            stage.horizontal,
            stage.horizontal_deduped,
            stage.vertical,
            stage.vertical_deduped
        );

        let start = Instant::now();
        let bounds = select_bounding_segments(&oriented.horizontal, &oriented.vertical)?;
        let quad = resolve_quad_with_eps(
            &oriented.horizontal,
            &oriented.vertical,
            self.params.parallel_eps,
        )?;
        timings.push("resolve", elapsed_ms(start));
        timings.total_ms = timings.stages.iter().map(|s| s.elapsed_ms).sum();

        Ok(CornerDetection {
            quad,
            bounds,
            segments: lsd.segments,
            oriented,
            stage,
            timings,
        })
    }

    /// Runs the whole pipeline on `image`.
    pub fn detect(&self, image: &RgbImage) -> Result<CardDetection, CardError> {
        let total = Instant::now();
        let corners = self.find_corners(image)?;
        let mut timings = corners.timings.clone();

        let start = Instant::now();
        let rectified = rectify(image, &corners.quad, &self.params.rectify)?;
        timings.push("rectify", elapsed_ms(start));

        let start = Instant::now();
        let regions = extract_regions(&rectified.image, &self.params.regions);
        let num_crop = regions.num.map(|r| crop_rect(&rectified.image, &r));
        let flag_crop = regions.flag.map(|r| crop_rect(&rectified.image, &r));
        timings.push("regions", elapsed_ms(start));
        timings.total_ms = elapsed_ms(total);

        debug!(
            "CardDetector::detect quad={:?} regions={} total_ms={:.3}",
            corners.quad.points(),
            regions.len(),
            timings.total_ms
        );

        Ok(CardDetection {
            corners,
            card: rectified.image,
            homography: rectified.homography,
            regions,
            num_crop,
            flag_crop,
            roi: None,
            source_size: image.dimensions(),
            timings,
        })
    }

    /// Camera variant: crops `roi` out of `frame` and detects inside it.
    pub fn process_frame(&self, frame: &RgbImage, roi: &Rect) -> Result<CardDetection, CardError> {
        ensure_not_empty(frame)?;
        let clipped = roi.clamp_to(frame.width(), frame.height());
        if clipped.is_empty() {
            return Err(CardError::EmptyInput(format!(
                "roi {roi:?} lies outside the {}x{} frame",
                frame.width(),
                frame.height()
            )));
        }
        let view = crop_rect(frame, &clipped);
        let mut detection = self.detect(&view)?;
        detection.roi = Some(clipped);
        detection.source_size = frame.dimensions();
        Ok(detection)
    }

    /// Detects every frame in parallel. Failures stay per frame.
    pub fn detect_batch(&self, frames: &[RgbImage]) -> Vec<Result<CardDetection, CardError>> {
        let results: Vec<_> = frames.par_iter().map(|f| self.detect(f)).collect();
        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(
                "CardDetector::detect_batch {failed} of {} frames failed",
                frames.len()
            );
        }
        results
    }

    /// Classifies whichever glyph crops the detection produced.
    pub fn recognize<R, S>(
        &self,
        detection: &CardDetection,
        rank: &R,
        suit: &S,
    ) -> Recognition<R::Label, S::Label>
    where
        R: Classifier + ?Sized,
        S: Classifier + ?Sized,
    {
        Recognition {
            rank: detection.num_crop.as_ref().and_then(|c| rank.classify(c)),
            suit: detection.flag_crop.as_ref().and_then(|c| suit.classify(c)),
        }
    }
}

fn ensure_not_empty(image: &RgbImage) -> Result<(), CardError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CardError::EmptyInput(format!(
            "image is {}x{}",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}
