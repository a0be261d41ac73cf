use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{MediaError, MediaToolkit};
use crate::domain::Chunk;

pub const DEFAULT_CHUNK_LENGTH: f64 = 30.0;
pub const DEFAULT_OVERLAP: f64 = 0.0;

/// Windows that are effectively empty are not worth a chunk.
const MIN_TAIL_SECS: f64 = 0.05;

/// Splits input media into fixed-length windows and extracts per-window
/// artifacts: a stream-copied MP4 and a 16 kHz mono WAV derived from it.
pub struct Chunker {
    media: Arc<dyn MediaToolkit>,
    chunk_length: f64,
    overlap: f64,
}

impl Chunker {
    pub fn new(media: Arc<dyn MediaToolkit>) -> Self {
        Self::with_windows(media, DEFAULT_CHUNK_LENGTH, DEFAULT_OVERLAP)
    }

    pub fn with_windows(media: Arc<dyn MediaToolkit>, chunk_length: f64, overlap: f64) -> Self {
        Self {
            media,
            chunk_length,
            overlap,
        }
    }

    /// Any extraction failure aborts the whole split; a partially filled
    /// chunk directory is never treated as valid.
    pub async fn split(&self, input_path: &Path, out_dir: &Path) -> Result<Vec<Chunk>, ChunkerError> {
        let duration = self.media.probe_duration(input_path).await?;
        if duration <= 0.0 {
            return Err(ChunkerError::InvalidDuration(duration));
        }

        tokio::fs::create_dir_all(out_dir).await?;

        let step = (self.chunk_length - self.overlap).max(0.1);
        let mut chunks = Vec::new();
        let mut index: u32 = 0;

        loop {
            let start = index as f64 * step;
            if start >= duration || duration - start < MIN_TAIL_SECS {
                break;
            }
            let end = (start + self.chunk_length).min(duration);

            let video_path = out_dir.join(format!("chunk_{index:04}.mp4"));
            let audio_path = out_dir.join(format!("chunk_{index:04}.wav"));

            self.media
                .extract_segment(input_path, start, end - start, &video_path)
                .await?;
            self.media.extract_audio(&video_path, &audio_path).await?;

            chunks.push(Chunk::new(index, start, end, video_path, audio_path));
            index += 1;
        }

        tracing::info!(
            input = %input_path.display(),
            duration,
            chunk_count = chunks.len(),
            chunk_length = self.chunk_length,
            overlap = self.overlap,
            "Input split into chunks"
        );

        Ok(chunks)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChunkerError {
    #[error("media: {0}")]
    Media(#[from] MediaError),
    #[error("input has non-positive duration: {0}")]
    InvalidDuration(f64),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
