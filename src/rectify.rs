//! Perspective rectification of the detected card.
//!
//! The quad is mapped onto a fixed canonical rectangle whose size encodes the
//! 2:3 card aspect ratio. Resampling is backward: every output pixel is
//! pulled through the canonical→source homography and bilinearly
//! interpolated; samples falling outside the source are black.

use crate::error::CardError;
use crate::geometry::Point2D;
use crate::homography::{apply_homography, perspective_transform};
use crate::quad::Quad;
use image::{ImageBuffer, Pixel, RgbImage};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Tolerance for samples that land a hair outside the source due to rounding.
const EDGE_SLACK: f64 = 1e-3;

/// Canonical output size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyParams {
    pub width: u32,
    pub height: u32,
}

impl Default for RectifyParams {
    fn default() -> Self {
        Self {
            width: 300,
            height: 450,
        }
    }
}

/// Rectified card together with the source→card homography.
#[derive(Clone, Debug)]
pub struct Rectified {
    pub image: RgbImage,
    pub homography: Matrix3<f64>,
}

/// Warps `quad` from `image` onto a `params.width × params.height` canvas.
///
/// Corners map in order onto `(0,0)`, `(W-1,0)`, `(W-1,H-1)`, `(0,H-1)`.
/// Rectifying the canonical rectangle itself reproduces the source pixels.
pub fn rectify(
    image: &RgbImage,
    quad: &Quad,
    params: &RectifyParams,
) -> Result<Rectified, CardError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CardError::EmptyInput("source image has no pixels".into()));
    }
    if params.width == 0 || params.height == 0 {
        return Err(CardError::DegenerateGeometry(format!(
            "canonical size {}x{} is empty",
            params.width, params.height
        )));
    }
    let src = quad.points();
    let dst = Quad::canonical(params.width, params.height).points();
    let (Some(forward), Some(backward)) = (
        perspective_transform(&src, &dst),
        perspective_transform(&dst, &src),
    ) else {
        return Err(CardError::DegenerateGeometry(
            "card corners do not define a projective transform".into(),
        ));
    };

    let out = warp_backward(image, &backward, params.width, params.height);
    Ok(Rectified {
        image: out,
        homography: forward,
    })
}

/// Fills a `width × height` image by sampling `image` at `h · (x, y)`.
pub fn warp_backward<P>(
    image: &ImageBuffer<P, Vec<u8>>,
    h: &Matrix3<f64>,
    width: u32,
    height: u32,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let mut out: ImageBuffer<P, Vec<u8>> = ImageBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let target = Point2D::new(f64::from(x), f64::from(y));
            if let Some(src) = apply_homography(h, target) {
                if let Some(px) = sample_bilinear(image, src.x, src.y) {
                    out.put_pixel(x, y, px);
                }
            }
        }
    }
    out
}

/// Bilinear sample at a subpixel position; `None` outside the image.
fn sample_bilinear<P>(image: &ImageBuffer<P, Vec<u8>>, x: f64, y: f64) -> Option<P>
where
    P: Pixel<Subpixel = u8>,
{
    let max_x = f64::from(image.width() - 1);
    let max_y = f64::from(image.height() - 1);
    if x < -EDGE_SLACK || y < -EDGE_SLACK || x > max_x + EDGE_SLACK || y > max_y + EDGE_SLACK {
        return None;
    }
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);
    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);
    let fx = x - f64::from(x0);
    let fy = y - f64::from(y0);

    let p00 = image.get_pixel(x0, y0).channels();
    let p10 = image.get_pixel(x1, y0).channels();
    let p01 = image.get_pixel(x0, y1).channels();
    let p11 = image.get_pixel(x1, y1).channels();

    let mut px = *image.get_pixel(x0, y0);
    for (c, out) in px.channels_mut().iter_mut().enumerate() {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bottom = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        let v = top * (1.0 - fy) + bottom * fy;
        *out = v.round().clamp(0.0, 255.0) as u8;
    }
    Some(px)
}
