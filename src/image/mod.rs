//! Image buffers and image-level helpers.
//!
//! - [`ImageF32`]: float intensity plane feeding the gradient stage.
//! - [`io`]: loading frames, saving images and JSON reports.
//! - [`overlay`]: debug drawings of segments, quads and glyph boxes.
pub mod f32;
pub mod io;
pub mod overlay;

pub use self::f32::ImageF32;
