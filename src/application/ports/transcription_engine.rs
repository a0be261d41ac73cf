use std::path::Path;

use async_trait::async_trait;

use crate::domain::Transcript;

/// Speech recognition over one audio file. Segment timestamps are relative to
/// the audio passed in, not to the global media timeline.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
        initial_prompt: &str,
    ) -> Result<Transcript, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
}
