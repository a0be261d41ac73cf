pub mod asr;
pub mod context;
pub mod media;
pub mod observability;
pub mod publish;
pub mod translation;
pub mod tts;
