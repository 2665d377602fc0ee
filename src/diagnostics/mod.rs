//! Serializable diagnostics produced by the card detector.
//!
//! `DetectionReport` is the JSON document written by the CLI: the input
//! descriptor, per-stage segment counts, the resolved quad and homography, the
//! located glyph regions, recognition labels and a timing breakdown. Failed
//! frames still produce a report with `error` set.

pub mod report;
pub mod segments;
pub mod timing;

pub use report::{DetectionReport, InputDescriptor};
pub use segments::SegmentStage;
pub use timing::{StageTiming, TimingBreakdown};
