//! Parameter types configuring the detector stages.
//!
//! Every knob has a documented default and the whole bundle deserializes
//! from partial JSON (`#[serde(default)]`), so a config only needs to name
//! the values it changes.

use crate::geometry::PARALLEL_EPS;
use crate::rectify::RectifyParams;
use crate::regions::{Rect, RegionParams};
use crate::segments::{ClassifyOptions, DedupOptions, LsdOptions};
use serde::{Deserialize, Serialize};

/// Detector-wide parameters, one block per stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CardParams {
    /// Edge segment extraction.
    pub lsd: LsdOptions,
    /// Horizontal/vertical split (default 15°).
    pub classify: ClassifyOptions,
    /// Near-collinear duplicate suppression (default 5° / 10 px).
    pub dedup: DedupOptions,
    /// Determinant magnitude below which bounding lines count as parallel.
    pub parallel_eps: f64,
    /// Canonical card size (default 300×450).
    pub rectify: RectifyParams,
    /// Glyph search on the rectified card.
    pub regions: RegionParams,
}

impl Default for CardParams {
    fn default() -> Self {
        Self {
            lsd: LsdOptions::default(),
            classify: ClassifyOptions::default(),
            dedup: DedupOptions::default(),
            parallel_eps: PARALLEL_EPS,
            rectify: RectifyParams::default(),
            regions: RegionParams::default(),
        }
    }
}

/// Guide box of the camera variant: a centred rectangle with a fixed aspect
/// ratio, inset from the limiting frame dimension by `margin` pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiParams {
    pub aspect_width: f64,
    pub aspect_height: f64,
    pub margin: u32,
}

impl Default for RoiParams {
    fn default() -> Self {
        Self {
            aspect_width: 2.0,
            aspect_height: 3.5,
            margin: 120,
        }
    }
}

/// Centred guide box for a `frame_w × frame_h` frame.
///
/// For frames wider than the target ratio the height is limiting: the box is
/// `frame_h - margin` tall and `floor(frame_h · ratio)` wide. Otherwise the
/// width is limiting: `frame_w - margin` wide and `floor(frame_w / ratio)`
/// tall. `None` when the margin leaves no room or the ratio is unusable.
pub fn centered_roi(frame_w: u32, frame_h: u32, params: &RoiParams) -> Option<Rect> {
    let (aw, ah) = (params.aspect_width, params.aspect_height);
    if frame_w == 0 || frame_h == 0 || !(aw > 0.0 && ah > 0.0) {
        return None;
    }
    let ratio = aw / ah;
    let (box_w, box_h) = if f64::from(frame_w) / f64::from(frame_h) > ratio {
        let h = frame_h.checked_sub(params.margin)?;
        let w = (f64::from(frame_h) * aw / ah).floor() as u32;
        (w, h)
    } else {
        let w = frame_w.checked_sub(params.margin)?;
        let h = (f64::from(frame_w) * ah / aw).floor() as u32;
        (w, h)
    };
    if box_w == 0 || box_h == 0 || box_w > frame_w || box_h > frame_h {
        return None;
    }
    Some(Rect::new(
        (frame_w - box_w) / 2,
        (frame_h - box_h) / 2,
        box_w,
        box_h,
    ))
}
