use std::path::Path;

use async_trait::async_trait;

/// Thin seam over the external ffmpeg/ffprobe binaries. Every failure here is
/// fatal for the job that triggered it.
#[async_trait]
pub trait MediaToolkit: Send + Sync {
    /// Container duration in seconds.
    async fn probe_duration(&self, path: &Path) -> Result<f64, MediaError>;

    async fn has_video_stream(&self, path: &Path) -> Result<bool, MediaError>;

    /// Stream-copied window of the input, `start`/`duration` in seconds.
    async fn extract_segment(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        out: &Path,
    ) -> Result<(), MediaError>;

    /// 16 kHz mono s16le WAV of the input's audio.
    async fn extract_audio(&self, input: &Path, out: &Path) -> Result<(), MediaError>;

    /// Stream-copy concatenation driven by a concat-demuxer list file.
    async fn concat(&self, list_path: &Path, out: &Path) -> Result<(), MediaError>;

    /// Apply an atempo filter chain; each stage must lie in [0.5, 2.0].
    /// Output codec follows the output extension.
    async fn apply_atempo(
        &self,
        input: &Path,
        stages: &[f64],
        out: &Path,
    ) -> Result<(), MediaError>;

    /// Copy the video stream from `video_input`, replace the audio track with
    /// an AAC encode of `audio_input`, stop at the shorter stream.
    async fn mux(
        &self,
        video_input: &Path,
        audio_input: &Path,
        out: &Path,
    ) -> Result<(), MediaError>;

    async fn synthesize_silence(&self, seconds: f64, out: &Path) -> Result<(), MediaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("failed to spawn {0}: {1}")]
    Spawn(String, String),
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("unreadable probe output: {0}")]
    ProbeParse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
