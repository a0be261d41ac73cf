use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{MediaError, MediaToolkit};

/// In-process stand-in for ffmpeg. Tracks a duration per path so that
/// segment extraction, concatenation and tempo changes stay arithmetically
/// consistent, and writes placeholder files wherever the real toolkit would
/// produce output.
pub struct MockMediaToolkit {
    durations: Mutex<HashMap<PathBuf, f64>>,
    calls: Mutex<Vec<String>>,
    default_duration: f64,
    has_video: bool,
}

impl MockMediaToolkit {
    pub fn new() -> Self {
        Self {
            durations: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            default_duration: 30.0,
            has_video: true,
        }
    }

    pub fn audio_only() -> Self {
        Self {
            has_video: false,
            ..Self::new()
        }
    }

    pub fn with_default_duration(mut self, seconds: f64) -> Self {
        self.default_duration = seconds;
        self
    }

    pub async fn set_duration(&self, path: impl Into<PathBuf>, seconds: f64) {
        self.durations.lock().await.insert(path.into(), seconds);
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: impl Into<String>) {
        self.calls.lock().await.push(call.into());
    }

    async fn duration_of(&self, path: &Path) -> f64 {
        self.durations
            .lock()
            .await
            .get(path)
            .copied()
            .unwrap_or(self.default_duration)
    }

    async fn write_output(&self, out: &Path, seconds: f64) -> Result<(), MediaError> {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(out, b"mock media")?;
        self.durations.lock().await.insert(out.to_path_buf(), seconds);
        Ok(())
    }
}

impl Default for MockMediaToolkit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaToolkit for MockMediaToolkit {
    async fn probe_duration(&self, path: &Path) -> Result<f64, MediaError> {
        self.record(format!("probe:{}", path.display())).await;
        Ok(self.duration_of(path).await)
    }

    async fn has_video_stream(&self, _path: &Path) -> Result<bool, MediaError> {
        Ok(self.has_video)
    }

    async fn extract_segment(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        out: &Path,
    ) -> Result<(), MediaError> {
        self.record(format!("segment:{start:.3}+{duration:.3}")).await;
        let available = (self.duration_of(input).await - start).max(0.0);
        self.write_output(out, duration.min(available)).await
    }

    async fn extract_audio(&self, input: &Path, out: &Path) -> Result<(), MediaError> {
        self.record("extract_audio".to_string()).await;
        let duration = self.duration_of(input).await;
        self.write_output(out, duration).await
    }

    async fn concat(&self, list_path: &Path, out: &Path) -> Result<(), MediaError> {
        self.record("concat".to_string()).await;
        let list = std::fs::read_to_string(list_path)?;
        let mut total = 0.0;
        for line in list.lines() {
            let Some(entry) = line
                .trim()
                .strip_prefix("file '")
                .and_then(|rest| rest.strip_suffix('\''))
            else {
                continue;
            };
            total += self.duration_of(Path::new(entry)).await;
        }
        self.write_output(out, total).await
    }

    async fn apply_atempo(
        &self,
        input: &Path,
        stages: &[f64],
        out: &Path,
    ) -> Result<(), MediaError> {
        self.record(format!("atempo:{stages:?}")).await;
        let factor: f64 = stages.iter().product();
        if factor <= 0.0 {
            return Err(MediaError::CommandFailed(
                "atempo factor must be positive".to_string(),
            ));
        }
        let duration = self.duration_of(input).await / factor;
        self.write_output(out, duration).await
    }

    async fn mux(
        &self,
        video_input: &Path,
        _audio_input: &Path,
        out: &Path,
    ) -> Result<(), MediaError> {
        self.record("mux".to_string()).await;
        let duration = self.duration_of(video_input).await;
        self.write_output(out, duration).await
    }

    async fn synthesize_silence(&self, seconds: f64, out: &Path) -> Result<(), MediaError> {
        self.record(format!("silence:{seconds:.3}")).await;
        self.write_output(out, seconds).await
    }
}
