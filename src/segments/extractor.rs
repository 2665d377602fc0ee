use super::region::GrownRegion;
use super::{LsdOptions, Segment};
use crate::angle::{angular_difference, normalize_half_pi};
use crate::edges::{sobel_gradients, Grad};
use crate::image::ImageF32;

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const UNUSED: u8 = 0;
const USED: u8 = 1;

pub(super) struct LsdExtractor {
    grad: Grad,
    width: usize,
    height: usize,
    mag_thresh: f32,
    angle_tol: f32,
    half_angle_tol: f32,
    min_len: f64,
    min_region: usize,
    min_aligned_fraction: f64,
    normal_span_limit: Option<f64>,
    used: Vec<u8>,
    angle_cache: Vec<f32>,
    stack: Vec<usize>,
    region: GrownRegion,
    segments: Vec<Segment>,
}

impl LsdExtractor {
    pub(super) fn new(l: &ImageF32, options: &LsdOptions) -> Self {
        let grad = sobel_gradients(l);
        let width = l.width;
        let height = l.height;
        let n = width * height;
        let angle_tol = options.angle_tolerance_deg.to_radians();
        Self {
            grad,
            width,
            height,
            mag_thresh: options.magnitude_threshold,
            angle_tol,
            half_angle_tol: angle_tol * 0.5,
            min_len: f64::from(options.min_length_px),
            min_region: options.min_region_px.max(2),
            min_aligned_fraction: f64::from(options.min_aligned_fraction),
            normal_span_limit: options
                .normal_span_limit_px
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(f64::from),
            used: vec![UNUSED; n],
            angle_cache: vec![f32::NAN; n],
            stack: Vec::with_capacity(64),
            region: GrownRegion::default(),
            segments: Vec::new(),
        }
    }

    pub(super) fn extract(mut self) -> Vec<Segment> {
        for idx in 0..(self.width * self.height) {
            self.process_seed(idx);
        }
        self.segments
    }

    fn process_seed(&mut self, idx: usize) {
        if self.used[idx] != UNUSED {
            return;
        }
        let x = idx % self.width;
        let y = idx / self.width;
        if self.grad.mag.get(x, y) < self.mag_thresh {
            return;
        }

        self.region.clear();
        self.stack.clear();

        let seed_angle = self.angle_at(idx);
        self.used[idx] = USED;
        self.stack.push(idx);

        self.grow_region(seed_angle);

        if let Some(segment) = self.build_segment() {
            self.segments.push(segment);
        } else {
            self.region.mark(&mut self.used, UNUSED);
            // The seed itself stays consumed so rejected regions are not
            // regrown from the same pixel.
            self.used[idx] = USED;
        }
        self.region.clear();
    }

    fn grow_region(&mut self, seed_angle: f32) {
        while let Some(idx) = self.stack.pop() {
            let x = idx % self.width;
            let y = idx / self.width;
            let angle = self.angle_at(idx);
            let aligned = angular_difference(angle, seed_angle) <= self.half_angle_tol;
            self.region.add(idx, x, y, aligned);

            for (dx, dy) in NEIGH_OFFSETS {
                let xn = x as isize + dx;
                let yn = y as isize + dy;
                if xn < 0 || yn < 0 || xn >= self.width as isize || yn >= self.height as isize {
                    continue;
                }
                let nx = xn as usize;
                let ny = yn as usize;
                let neighbor_idx = ny * self.width + nx;
                if self.used[neighbor_idx] != UNUSED {
                    continue;
                }
                if self.grad.mag.get(nx, ny) < self.mag_thresh {
                    continue;
                }
                let neighbor_angle = self.angle_at(neighbor_idx);
                if angular_difference(neighbor_angle, seed_angle) <= self.angle_tol {
                    self.used[neighbor_idx] = USED;
                    self.stack.push(neighbor_idx);
                }
            }
        }
    }

    fn build_segment(&self) -> Option<Segment> {
        if self.region.len() < self.min_region
            || self.region.aligned_fraction() < self.min_aligned_fraction
        {
            return None;
        }
        let fit = self.region.fit()?;
        let len = fit.length();
        if !len.is_finite() || len <= 0.0 || len < self.min_len {
            return None;
        }
        if self.normal_span_limit.is_some_and(|limit| fit.thickness > limit) {
            return None;
        }

        let (p0, p1) = fit.endpoints();
        let segment = Segment::new(
            p0.x.round() as i32,
            p0.y.round() as i32,
            p1.x.round() as i32,
            p1.y.round() as i32,
        );
        (!segment.is_degenerate()).then_some(segment)
    }

    fn angle_at(&mut self, idx: usize) -> f32 {
        let cached = self.angle_cache[idx];
        if cached.is_nan() {
            let x = idx % self.width;
            let y = idx / self.width;
            let angle = normalize_half_pi(self.grad.gy.get(x, y).atan2(self.grad.gx.get(x, y)));
            self.angle_cache[idx] = angle;
            angle
        } else {
            cached
        }
    }
}
