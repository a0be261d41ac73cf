use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::TranscriptionEngine;
use crate::domain::AsrProfile;

use super::candle_whisper_engine::CandleWhisperEngine;

pub struct WhisperEngineFactory;

impl WhisperEngineFactory {
    /// Builds a recognition engine for the given profile. Construction never
    /// touches the network; weights are fetched on first use.
    pub fn create(profile: AsrProfile, model_dir: Option<PathBuf>) -> Arc<dyn TranscriptionEngine> {
        Arc::new(CandleWhisperEngine::new(profile, model_dir))
    }
}
