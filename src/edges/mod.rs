//! Edge processing: image gradients feeding the segment extractor.
//!
//! - Gradient computation with Sobel kernels returning `gx`, `gy` and the
//!   magnitude.
//! - Borders are handled by clamping indices (replicate).

pub mod grad;

/// Per‑pixel gradients and magnitude.
pub use grad::{sobel_gradients, Grad};
