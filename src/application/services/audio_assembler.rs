use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{MediaError, MediaToolkit};

use super::stretch_plan::StretchPlan;

const CONCAT_LIST_NAME: &str = "concat_list.txt";
// Keeps the chunk codec so the concat demuxer can stream-copy.
const INTERMEDIATE_NAME: &str = "full_tts_audio.mp3";

/// Tolerance on the final duration match, in seconds.
const DURATION_TOLERANCE: f64 = 0.05;

/// Joins per-chunk audio into one track and stretches it globally so its
/// duration matches the source media. The stretch runs once on the full
/// track; stretching per chunk would leave audible seams at boundaries.
pub struct AudioAssembler {
    media: Arc<dyn MediaToolkit>,
}

impl AudioAssembler {
    pub fn new(media: Arc<dyn MediaToolkit>) -> Self {
        Self { media }
    }

    /// `audio_paths` must already be in timeline order. Scratch files are
    /// created next to `out_path` and removed before return.
    pub async fn assemble(
        &self,
        audio_paths: &[PathBuf],
        target_duration: f64,
        out_path: &Path,
    ) -> Result<PathBuf, AssemblyError> {
        if audio_paths.is_empty() {
            return Err(AssemblyError::NoInputs);
        }

        let work_dir = out_path.parent().map(Path::to_path_buf).unwrap_or_default();
        let list_path = work_dir.join(CONCAT_LIST_NAME);
        let intermediate_path = work_dir.join(INTERMEDIATE_NAME);

        let mut list = String::new();
        for path in audio_paths {
            list.push_str(&format!("file '{}'\n", path.display()));
        }
        tokio::fs::write(&list_path, list).await?;

        let result = self
            .concat_and_stretch(&list_path, &intermediate_path, target_duration, out_path)
            .await;

        let _ = tokio::fs::remove_file(&list_path).await;
        let _ = tokio::fs::remove_file(&intermediate_path).await;

        result?;
        Ok(out_path.to_path_buf())
    }

    async fn concat_and_stretch(
        &self,
        list_path: &Path,
        intermediate_path: &Path,
        target_duration: f64,
        out_path: &Path,
    ) -> Result<(), AssemblyError> {
        self.media.concat(list_path, intermediate_path).await?;

        let source_duration = self.media.probe_duration(intermediate_path).await?;
        let plan = StretchPlan::for_ratio(source_duration / target_duration);

        tracing::info!(
            source_duration,
            target_duration,
            ratio = plan.ratio(),
            stages = ?plan.stages(),
            "Stretching assembled audio"
        );

        self.media
            .apply_atempo(intermediate_path, plan.stages(), out_path)
            .await?;

        let final_duration = self.media.probe_duration(out_path).await?;
        let drift = (final_duration - target_duration).abs();
        // Drift past tolerance warns instead of failing: mp3 frame padding
        // and the unity dead-band of the stretch plan can both push the
        // probed duration out by tens of milliseconds on a usable track.
        if drift > DURATION_TOLERANCE {
            tracing::warn!(
                final_duration,
                target_duration,
                drift,
                "Assembled audio drifted outside tolerance"
            );
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("no audio inputs to assemble")]
    NoInputs,
    #[error("media: {0}")]
    Media(#[from] MediaError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
