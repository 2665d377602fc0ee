//! Debug overlays drawn with `imageproc`.
use crate::quad::Quad;
use crate::regions::{Rect, RegionMap, Role};
use crate::segments::Segment;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};

pub const QUAD_COLOR: Rgb<u8> = Rgb([0, 200, 255]);
pub const NUM_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const FLAG_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Closed quad outline plus a dot on every corner.
pub fn draw_quad(image: &mut RgbImage, quad: &Quad, color: Rgb<u8>) {
    let pts = quad.points();
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        draw_line_segment_mut(
            image,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            color,
        );
    }
    for p in pts {
        draw_filled_circle_mut(image, (p.x.round() as i32, p.y.round() as i32), 4, color);
    }
}

pub fn draw_segments(image: &mut RgbImage, segments: &[Segment], color: Rgb<u8>) {
    for s in segments {
        draw_line_segment_mut(
            image,
            (s.p0[0] as f32, s.p0[1] as f32),
            (s.p1[0] as f32, s.p1[1] as f32),
            color,
        );
    }
}

/// Rank box in green, suit box in red.
pub fn draw_regions(image: &mut RgbImage, regions: &RegionMap) {
    for (role, rect) in regions.iter() {
        let color = match role {
            Role::Num => NUM_COLOR,
            Role::Flag => FLAG_COLOR,
        };
        draw_rect(image, &rect, color);
    }
}

pub fn draw_rect(image: &mut RgbImage, rect: &Rect, color: Rgb<u8>) {
    if rect.is_empty() {
        return;
    }
    let r = imageproc::rect::Rect::at(rect.x as i32, rect.y as i32).of_size(rect.width, rect.height);
    draw_hollow_rect_mut(image, r, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2D;

    #[test]
    fn regions_are_outlined_in_role_colors() {
        let mut img = RgbImage::new(100, 100);
        let mut map = RegionMap::default();
        map.insert(Role::Num, Rect::new(10, 10, 20, 30));
        map.insert(Role::Flag, Rect::new(50, 50, 20, 20));
        draw_regions(&mut img, &map);
        assert_eq!(img.get_pixel(10, 10), &NUM_COLOR);
        assert_eq!(img.get_pixel(29, 39), &NUM_COLOR);
        assert_eq!(img.get_pixel(20, 20), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(50, 60), &FLAG_COLOR);
    }

    #[test]
    fn quad_outline_touches_corners() {
        let mut img = RgbImage::new(60, 60);
        let quad = Quad::new(
            Point2D::new(10.0, 10.0),
            Point2D::new(50.0, 10.0),
            Point2D::new(50.0, 50.0),
            Point2D::new(10.0, 50.0),
        );
        draw_quad(&mut img, &quad, QUAD_COLOR);
        assert_eq!(img.get_pixel(30, 10), &QUAD_COLOR);
        assert_eq!(img.get_pixel(50, 30), &QUAD_COLOR);
        assert_eq!(img.get_pixel(30, 30), &Rgb([0, 0, 0]));
    }
}
