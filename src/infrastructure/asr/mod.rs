mod audio_decoder;
mod candle_whisper_engine;
mod energy_vad;
mod engine_factory;
mod mock_engine;

pub use audio_decoder::decode_to_pcm;
pub use candle_whisper_engine::CandleWhisperEngine;
pub use energy_vad::EnergyVad;
pub use engine_factory::WhisperEngineFactory;
pub use mock_engine::MockTranscriptionEngine;
