use crate::detector::{centered_roi, CardParams, RoiParams};
use crate::regions::Rect;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the rectified card, glyph crops and overlays.
    pub dir: PathBuf,
    /// Report path; defaults to `<dir>/report.json`.
    #[serde(default)]
    pub json: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub overlays: bool,
}

impl OutputConfig {
    pub fn json_path(&self) -> PathBuf {
        self.json
            .clone()
            .unwrap_or_else(|| self.dir.join("report.json"))
    }
}

/// Region of the frame to search. An explicit `rect` wins over the centred
/// `guide` box.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    pub rect: Option<Rect>,
    pub guide: Option<RoiParams>,
}

impl RoiConfig {
    pub fn resolve(&self, frame_w: u32, frame_h: u32) -> Option<Rect> {
        self.rect
            .or_else(|| self.guide.and_then(|g| centered_roi(frame_w, frame_h, &g)))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub roi: Option<RoiConfig>,
    #[serde(default)]
    pub params: CardParams,
    #[serde(default)]
    pub rank_model: Option<PathBuf>,
    #[serde(default)]
    pub suit_model: Option<PathBuf>,
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(contents)
}
