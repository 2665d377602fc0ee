use image::{Rgb, RgbImage};

pub const BACKGROUND: Rgb<u8> = Rgb([40, 40, 40]);
pub const CARD: Rgb<u8> = Rgb([230, 230, 230]);
pub const INK: Rgb<u8> = Rgb([20, 20, 20]);

const SUPERSAMPLE: u32 = 4;

/// Corners of a `width × height` card centred at `(cx, cy)` and rotated by
/// `angle_deg`, clockwise from top-left.
pub fn rotated_card(cx: f64, cy: f64, width: f64, height: f64, angle_deg: f64) -> [(f64, f64); 4] {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let (hw, hh) = (width / 2.0, height / 2.0);
    [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(x, y)| (cx + x * c - y * s, cy + x * s + y * c))
}

/// Dark frame with a bright convex card, edges anti-aliased by supersampling.
pub fn card_scene(width: u32, height: u32, corners: [(f64, f64); 4]) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    let n = SUPERSAMPLE * SUPERSAMPLE;
    for y in 0..height {
        for x in 0..width {
            let mut inside = 0u32;
            for sy in 0..SUPERSAMPLE {
                for sx in 0..SUPERSAMPLE {
                    let px = f64::from(x) + (f64::from(sx) + 0.5) / f64::from(SUPERSAMPLE);
                    let py = f64::from(y) + (f64::from(sy) + 0.5) / f64::from(SUPERSAMPLE);
                    if inside_convex(&corners, px, py) {
                        inside += 1;
                    }
                }
            }
            if inside > 0 {
                let t = f64::from(inside) / f64::from(n);
                let blend = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t).round() as u8;
                img.put_pixel(
                    x,
                    y,
                    Rgb([
                        blend(BACKGROUND[0], CARD[0]),
                        blend(BACKGROUND[1], CARD[1]),
                        blend(BACKGROUND[2], CARD[2]),
                    ]),
                );
            }
        }
    }
    img
}

/// Axis-aligned card covering pixels `[x, x+w) × [y, y+h)`.
pub fn axis_aligned_scene(width: u32, height: u32, x: u32, y: u32, w: u32, h: u32) -> RgbImage {
    let (x0, y0) = (f64::from(x), f64::from(y));
    let (x1, y1) = (f64::from(x + w), f64::from(y + h));
    card_scene(width, height, [(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

/// Solid ink block covering `[x, x+w) × [y, y+h)`.
pub fn stamp_block(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32) {
    for yy in y..y + h {
        for xx in x..x + w {
            img.put_pixel(xx, yy, INK);
        }
    }
}

fn inside_convex(poly: &[(f64, f64); 4], x: f64, y: f64) -> bool {
    let mut sign = 0.0f64;
    for i in 0..4 {
        let (ax, ay) = poly[i];
        let (bx, by) = poly[(i + 1) % 4];
        let cross = (bx - ax) * (y - ay) - (by - ay) * (x - ax);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}
