//! JSON runtime configuration for the `card_detector` binary.
pub mod card;

pub use card::{load_config, OutputConfig, RoiConfig, RuntimeConfig};
