use crate::regions::Role;

/// Failures of the card pipeline.
///
/// `InsufficientLines` and `DegenerateGeometry` are per-frame failures: the
/// frame should be skipped and the next capture tried. A missing glyph region
/// is normally reported as data (an absent [`RegionMap`](crate::regions::RegionMap)
/// entry); `RegionNotFound` only appears when a caller asks for a role to be
/// present.
#[derive(Clone, Debug, PartialEq)]
pub enum CardError {
    /// The source image is missing, unreadable or has no pixels.
    EmptyInput(String),
    /// Fewer than two horizontal or two vertical segments survived
    /// classification and deduplication.
    InsufficientLines { horizontal: usize, vertical: usize },
    /// Two bounding lines are parallel or the corner set cannot define a
    /// projective transform.
    DegenerateGeometry(String),
    /// A required glyph region was not located.
    RegionNotFound(Role),
    /// A classifier model could not be loaded or does not fit its input.
    Model(String),
}

impl std::fmt::Display for CardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardError::EmptyInput(reason) => write!(f, "empty input: {reason}"),
            CardError::InsufficientLines {
                horizontal,
                vertical,
            } => write!(
                f,
                "not enough lines to bound a quadrilateral (horizontal={horizontal}, vertical={vertical}, need ≥2 each)"
            ),
            CardError::DegenerateGeometry(reason) => write!(f, "degenerate geometry: {reason}"),
            CardError::RegionNotFound(role) => write!(f, "region '{role}' not found"),
            CardError::Model(reason) => write!(f, "classifier model: {reason}"),
        }
    }
}

impl std::error::Error for CardError {}
