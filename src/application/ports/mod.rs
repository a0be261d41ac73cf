mod context_repository;
mod media_toolkit;
mod publisher;
mod speech_backend;
mod transcription_engine;
mod translation_backend;

pub use context_repository::{ContextError, ContextRepository, PronunciationOverrides};
pub use media_toolkit::{MediaError, MediaToolkit};
pub use publisher::{Publisher, PublisherError};
pub use speech_backend::{
    BasicSpeechBackend, NeuralSpeechBackend, SpeechError, SynthesisRequest, VoiceInfo,
};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use translation_backend::{TranslationBackend, TranslationError, TranslationRequest};
