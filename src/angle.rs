//! Angle utilities shared by the segment extractor, the classifier and the
//! deduplicator.
//!
//! All angles handled here are undirected: a segment and its reverse have the
//! same orientation, so results are folded modulo 180°.

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let norm = angle.rem_euclid(std::f32::consts::PI);
    if norm >= std::f32::consts::PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Smallest unsigned difference between two angles in [0, π), treating
/// antipodal directions as equivalent.
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let mut diff = (a - b).abs();
    if diff > std::f32::consts::PI {
        diff = diff.rem_euclid(std::f32::consts::PI);
    }
    if diff > std::f32::consts::FRAC_PI_2 {
        std::f32::consts::PI - diff
    } else {
        diff
    }
}

/// Folds the direction `(dx, dy)` into the range [0°, 90°].
///
/// `0°` means horizontal, `90°` vertical. The angle is `|atan2(dy, dx)|`
/// reflected over 90° so that a segment and its reverse fold to the same
/// value. A zero vector folds to `0°`.
#[inline]
pub fn folded_angle_deg(dx: f64, dy: f64) -> f64 {
    let angle = dy.atan2(dx).to_degrees().abs();
    if angle > 90.0 {
        180.0 - angle
    } else {
        angle
    }
}

/// Computes the orientation difference between two 2D vectors in degrees,
/// treating antipodal directions as equivalent. Returns a value in [0°, 90°].
///
/// The cosine is clamped to [-1, 1] before `acos` so rounding on nearly
/// parallel vectors never produces NaN. Returns `None` when either vector has
/// zero length.
#[inline]
pub fn angle_between_dirless_deg(a: [f64; 2], b: [f64; 2]) -> Option<f64> {
    let na = a[0].hypot(a[1]);
    let nb = b[0].hypot(b[1]);
    if na == 0.0 || nb == 0.0 {
        return None;
    }
    let dot = a[0] * b[0] + a[1] * b[1];
    let cos = (dot / (na * nb)).clamp(-1.0, 1.0);
    Some(cos.abs().acos().to_degrees())
}
