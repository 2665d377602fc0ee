use crate::geometry::Point2D;
use image::{imageops, RgbImage};
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle. `width`/`height` count pixels, so a single
/// pixel has size 1×1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle holding every `(x, y)`; `None` for an empty input.
    pub fn bounding<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for (x, y) in iter {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn translated(&self, dx: u32, dy: u32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Intersection with a `width × height` image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let w = self.width.min(width - x);
        let h = self.height.min(height - y);
        Self::new(x, y, w, h)
    }
}

/// Copies the pixels under `rect`, clipped to the image.
pub fn crop_rect(image: &RgbImage, rect: &Rect) -> RgbImage {
    let r = rect.clamp_to(image.width(), image.height());
    if r.is_empty() {
        return RgbImage::new(0, 0);
    }
    imageops::crop_imm(image, r.x, r.y, r.width, r.height).to_image()
}

/// Drops `left`/`top`/`right`/`bottom` pixels from the borders.
///
/// Returns an empty image when the margins consume the whole image.
pub fn crop_with_margin(image: &RgbImage, left: u32, top: u32, right: u32, bottom: u32) -> RgbImage {
    let (w, h) = image.dimensions();
    let width = w.saturating_sub(left.saturating_add(right));
    let height = h.saturating_sub(top.saturating_add(bottom));
    if width == 0 || height == 0 {
        return RgbImage::new(0, 0);
    }
    imageops::crop_imm(image, left, top, width, height).to_image()
}

/// Keeps the top `floor(H · fraction)` rows.
pub fn keep_top_fraction(image: &RgbImage, fraction: f64) -> RgbImage {
    let (w, h) = image.dimensions();
    // 450 · (2/3) lands a hair below 300 in binary floating point.
    let rows = (f64::from(h) * fraction.clamp(0.0, 1.0) + 1e-9).floor() as u32;
    let rows = rows.min(h);
    if w == 0 || rows == 0 {
        return RgbImage::new(0, 0);
    }
    imageops::crop_imm(image, 0, 0, w, rows).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    #[test]
    fn bounding_rect_is_inclusive() {
        let r = Rect::bounding([(3, 4), (7, 4), (7, 9), (3, 9)]).unwrap();
        assert_eq!(r, Rect::new(3, 4, 5, 6));
        assert_eq!(Rect::bounding([(2, 2)]).unwrap(), Rect::new(2, 2, 1, 1));
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }

    #[test]
    fn center_is_rect_midpoint() {
        let c = Rect::new(10, 20, 30, 40).center();
        assert_eq!((c.x, c.y), (25.0, 40.0));
    }

    #[test]
    fn crop_rect_clips_to_image() {
        let img = gradient(50, 40);
        let out = crop_rect(&img, &Rect::new(40, 30, 20, 20));
        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(out.get_pixel(0, 0), &Rgb([40, 30, 0]));
        assert_eq!(crop_rect(&img, &Rect::new(60, 0, 5, 5)).dimensions(), (0, 0));
    }

    #[test]
    fn margin_crop_drops_borders() {
        let img = gradient(50, 40);
        let out = crop_with_margin(&img, 5, 4, 3, 2);
        assert_eq!(out.dimensions(), (42, 34));
        assert_eq!(out.get_pixel(0, 0), &Rgb([5, 4, 0]));
        assert_eq!(crop_with_margin(&img, 30, 0, 30, 0).dimensions(), (0, 0));
    }

    #[test]
    fn top_two_thirds_of_canonical_card() {
        let img = gradient(300, 450);
        assert_eq!(keep_top_fraction(&img, 2.0 / 3.0).dimensions(), (300, 300));
        assert_eq!(keep_top_fraction(&gradient(10, 10), 2.0 / 3.0).height(), 6);
    }
}
