use super::rect::Rect;
use crate::geometry::{polygon_area, Point2D};
use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::contrast::otsu_level;
use serde::{Deserialize, Serialize};

/// Summary of one external contour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourInfo {
    pub rect: Rect,
    /// Shoelace area of the traced boundary polygon.
    pub area: f64,
}

impl ContourInfo {
    pub fn center(&self) -> Point2D {
        self.rect.center()
    }
}

/// Inverse binary threshold at the Otsu level: dark ink becomes foreground.
pub fn otsu_inverse(gray: &GrayImage) -> GrayImage {
    let t = otsu_level(gray);
    let mut out = gray.clone();
    for p in out.pixels_mut() {
        *p = if p[0] > t { Luma([0]) } else { Luma([255]) };
    }
    out
}

/// Grayscale + [`otsu_inverse`].
pub fn binarize(image: &RgbImage) -> GrayImage {
    otsu_inverse(&image::imageops::grayscale(image))
}

/// Outermost contours of the foreground of `binary`, in tracing order.
pub fn external_contours(binary: &GrayImage) -> Vec<ContourInfo> {
    if binary.width() == 0 || binary.height() == 0 {
        return Vec::new();
    }
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| {
            let rect = Rect::bounding(c.points.iter().map(|p| (p.x as u32, p.y as u32)))?;
            let poly: Vec<Point2D> = c
                .points
                .iter()
                .map(|p| Point2D::new(f64::from(p.x), f64::from(p.y)))
                .collect();
            Some(ContourInfo {
                rect,
                area: polygon_area(&poly),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn page_with_blocks(blocks: &[Rect]) -> RgbImage {
        let mut img = RgbImage::from_pixel(120, 120, Rgb([250, 250, 250]));
        for r in blocks {
            for y in r.y..r.y + r.height {
                for x in r.x..r.x + r.width {
                    img.put_pixel(x, y, Rgb([10, 10, 10]));
                }
            }
        }
        img
    }

    #[test]
    fn threshold_marks_ink_as_foreground() {
        let img = page_with_blocks(&[Rect::new(10, 10, 5, 5)]);
        let bin = binarize(&img);
        assert_eq!(bin.get_pixel(12, 12)[0], 255);
        assert_eq!(bin.get_pixel(50, 50)[0], 0);
    }

    #[test]
    fn holes_do_not_produce_contours() {
        // Ring: 30×30 block with a 10×10 hole.
        let mut img = page_with_blocks(&[Rect::new(20, 20, 30, 30)]);
        for y in 30..40 {
            for x in 30..40 {
                img.put_pixel(x, y, Rgb([250, 250, 250]));
            }
        }
        let contours = external_contours(&binarize(&img));
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].rect, Rect::new(20, 20, 30, 30));
        assert!((contours[0].area - 29.0 * 29.0).abs() < 1e-9);
    }

    #[test]
    fn separate_blobs_yield_separate_contours() {
        let img = page_with_blocks(&[Rect::new(5, 5, 10, 20), Rect::new(60, 70, 20, 10)]);
        let mut rects: Vec<Rect> = external_contours(&binarize(&img))
            .iter()
            .map(|c| c.rect)
            .collect();
        rects.sort_by_key(|r| (r.y, r.x));
        assert_eq!(rects, vec![Rect::new(5, 5, 10, 20), Rect::new(60, 70, 20, 10)]);
    }
}
