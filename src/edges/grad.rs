//! Sobel image gradients with magnitude.
//!
//! The 3×3 Sobel pair is applied separably: a central difference along one
//! axis followed by `[1, 2, 1]` smoothing along the other. Borders replicate
//! the nearest pixel.
use crate::image::ImageF32;

/// Per‑pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative.
    pub gx: ImageF32,
    /// Vertical derivative.
    pub gy: ImageF32,
    /// `sqrt(gx² + gy²)`.
    pub mag: ImageF32,
}

/// Compute Sobel gradients on a single‑channel float image.
pub fn sobel_gradients(l: &ImageF32) -> Grad {
    let (w, h) = (l.width, l.height);
    if w == 0 || h == 0 {
        return Grad {
            gx: ImageF32::new(w, h),
            gy: ImageF32::new(w, h),
            mag: ImageF32::new(w, h),
        };
    }

    // Horizontal pass: difference for gx, smoothing for gy.
    let mut diff_x = ImageF32::new(w, h);
    let mut smooth_x = ImageF32::new(w, h);
    for y in 0..h {
        let src = l.row(y);
        let (d, s) = (diff_x.row_mut(y), smooth_x.row_mut(y));
        for x in 0..w {
            let left = src[x.saturating_sub(1)];
            let right = src[(x + 1).min(w - 1)];
            d[x] = right - left;
            s[x] = left + 2.0 * src[x] + right;
        }
    }

    // Vertical pass.
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);
    for y in 0..h {
        let (up, down) = (y.saturating_sub(1), (y + 1).min(h - 1));
        for x in 0..w {
            let sx = diff_x.get(x, up) + 2.0 * diff_x.get(x, y) + diff_x.get(x, down);
            let sy = smooth_x.get(x, down) - smooth_x.get(x, up);
            gx.set(x, y, sx);
            gy.set(x, y, sy);
            mag.set(x, y, sx.hypot(sy));
        }
    }

    Grad { gx, gy, mag }
}
