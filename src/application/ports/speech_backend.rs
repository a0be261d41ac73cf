use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

/// One entry of a neural voice catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceInfo {
    #[serde(rename = "ShortName")]
    pub short_name: String,
    #[serde(rename = "Locale")]
    pub locale: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "DisplayName", default)]
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub locale: String,
    /// Speaking rate delta in percent, 0 for the voice default.
    pub rate_pct: i32,
    /// Pitch delta in percent, 0 for the voice default.
    pub pitch_pct: i32,
    pub out_path: PathBuf,
}

/// Primary neural TTS backend. Produces MP3 files.
#[async_trait]
pub trait NeuralSpeechBackend: Send + Sync {
    async fn voices(&self) -> Result<Vec<VoiceInfo>, SpeechError>;

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<(), SpeechError>;
}

/// Offline-grade fallback used when the neural backend is unavailable.
#[async_trait]
pub trait BasicSpeechBackend: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        lang_code: &str,
        out_path: &Path,
    ) -> Result<(), SpeechError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("voice catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("missing credentials: {0}")]
    MissingCredentials(String),
    #[error("no voice available for {0}")]
    NoVoice(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
