//! Pixel regions grown by the extractor and their principal-axis line fit.
use nalgebra::{Matrix2, SymmetricEigen, Vector2};

/// Pixels accepted into one region, with first and second moments.
#[derive(Debug, Default)]
pub(super) struct GrownRegion {
    /// Linear pixel indices, in acceptance order.
    pub(super) pixels: Vec<usize>,
    points: Vec<Vector2<f64>>,
    aligned: usize,
    sum: Vector2<f64>,
    sum_outer: Matrix2<f64>,
}

/// Line through a region: centroid, unit direction and the extent of the
/// pixels along and across it.
#[derive(Clone, Copy, Debug)]
pub(super) struct LineFit {
    pub centroid: Vector2<f64>,
    pub direction: Vector2<f64>,
    pub along: (f64, f64),
    pub thickness: f64,
}

impl LineFit {
    pub fn length(&self) -> f64 {
        self.along.1 - self.along.0
    }

    pub fn endpoints(&self) -> (Vector2<f64>, Vector2<f64>) {
        (
            self.centroid + self.direction * self.along.0,
            self.centroid + self.direction * self.along.1,
        )
    }
}

impl GrownRegion {
    pub(super) fn clear(&mut self) {
        self.pixels.clear();
        self.points.clear();
        self.aligned = 0;
        self.sum = Vector2::zeros();
        self.sum_outer = Matrix2::zeros();
    }

    pub(super) fn add(&mut self, idx: usize, x: usize, y: usize, aligned: bool) {
        let p = Vector2::new(x as f64, y as f64);
        self.pixels.push(idx);
        self.points.push(p);
        self.sum += p;
        self.sum_outer += p * p.transpose();
        if aligned {
            self.aligned += 1;
        }
    }

    pub(super) fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Share of pixels whose orientation stayed close to the seed's.
    pub(super) fn aligned_fraction(&self) -> f64 {
        if self.pixels.is_empty() {
            0.0
        } else {
            self.aligned as f64 / self.pixels.len() as f64
        }
    }

    /// Writes `state` into `mask` for every pixel of the region.
    pub(super) fn mark(&self, mask: &mut [u8], state: u8) {
        for &idx in &self.pixels {
            mask[idx] = state;
        }
    }

    /// PCA fit: the dominant eigenvector of the pixel covariance is the line
    /// direction. `None` for regions without a dominant axis.
    pub(super) fn fit(&self) -> Option<LineFit> {
        if self.points.len() < 2 {
            return None;
        }
        let n = self.points.len() as f64;
        let centroid = self.sum / n;
        let cov = self.sum_outer / n - centroid * centroid.transpose();
        let eig = SymmetricEigen::new(cov);
        let major = if eig.eigenvalues[0] >= eig.eigenvalues[1] { 0 } else { 1 };
        let lambda = eig.eigenvalues[major];
        if !lambda.is_finite() || lambda <= 0.0 {
            return None;
        }
        let direction = eig.eigenvectors.column(major).into_owned();
        let norm = direction.norm();
        if !norm.is_finite() || norm < 1e-9 {
            return None;
        }
        let direction = direction / norm;
        let normal = Vector2::new(-direction.y, direction.x);

        let (mut smin, mut smax) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut nmin, mut nmax) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &self.points {
            let d = p - centroid;
            let s = d.dot(&direction);
            let t = d.dot(&normal);
            smin = smin.min(s);
            smax = smax.max(s);
            nmin = nmin.min(t);
            nmax = nmax.max(t);
        }
        Some(LineFit {
            centroid,
            direction,
            along: (smin, smax),
            thickness: nmax - nmin,
        })
    }
}
