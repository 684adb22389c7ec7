use crate::detector::FretboardParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Batch run: every input image goes through one detector built from
/// `params`.
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub inputs: Vec<PathBuf>,
    #[serde(default)]
    pub params: FretboardParams,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Accepted crops are written here as `<input stem>.png`.
    pub crops_dir: PathBuf,
    /// Per-frame detection reports as one JSON array.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
    /// When set, the string and fret edge masks of each derotated frame are
    /// dumped here.
    #[serde(default)]
    pub edges_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<RunConfig, serde_json::Error> {
    serde_json::from_str(data)
}
