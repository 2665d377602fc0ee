//! Card detector orchestrating line finding, rectification and glyph search.
//!
//! Overview
//! - Extracts straight edge segments from the median-filtered frame.
//! - Splits them into near-horizontal and near-vertical buckets and removes
//!   near-collinear duplicates inside each bucket.
//! - Intersects the topmost/bottommost horizontals with the
//!   leftmost/rightmost verticals to obtain four clockwise corners.
//! - Warps the quad onto the canonical card and locates the rank and suit
//!   glyphs in its upper part.
//!
//! Modules
//! - [`params`] – parameter bundle and the camera guide box.
//! - `pipeline` – the [`CardDetector`] implementation.
//!
//! Every failure aborts only the current frame; batch processing returns one
//! `Result` per frame.

pub mod params;
mod pipeline;

pub use params::{centered_roi, CardParams, RoiParams};
pub use pipeline::{CardDetection, CardDetector, CornerDetection, Recognition};
