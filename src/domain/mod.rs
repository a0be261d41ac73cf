mod artifact_kind;
mod asr_mode;
mod chunk;
mod chunk_result;
mod job;
mod job_context;
mod job_id;
mod job_status;
mod language_tag;
mod manifest;
mod transcript;
mod translation_model;
mod voice_gender;

pub use artifact_kind::ArtifactKind;
pub use asr_mode::{AsrMode, AsrProfile, ComputeType, WhisperModel};
pub use chunk::Chunk;
pub use chunk_result::ChunkResult;
pub use job::JobRequest;
pub use job_context::JobContext;
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use language_tag::LanguageTag;
pub use manifest::Manifest;
pub use transcript::{Transcript, TranscriptSegment};
pub use translation_model::TranslationModel;
pub use voice_gender::VoiceGender;
