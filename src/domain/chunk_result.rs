use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output of the per-chunk pipeline. Immutable once written to the manifest,
/// except that resynthesis may point `audio_path` at a freshly synthesized
/// file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkResult {
    pub index: u32,
    pub start: f64,
    pub end: f64,
    pub text_original: String,
    pub text_translated: String,
    pub audio_path: PathBuf,
    pub srt_path: PathBuf,
}

impl ChunkResult {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
