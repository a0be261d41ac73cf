mod audio_assembler;
mod chunk_pipeline;
mod chunker;
mod cultural_adapter;
mod dialect_rewriter;
mod glossary_normalizer;
mod job_orchestrator;
mod stretch_plan;
mod subtitle_writer;
mod token_counter;
mod translation_router;
mod tts_router;

pub use audio_assembler::{AssemblyError, AudioAssembler};
pub use chunk_pipeline::{ChunkPipeline, ChunkPipelineError};
pub use chunker::{Chunker, ChunkerError, DEFAULT_CHUNK_LENGTH, DEFAULT_OVERLAP};
pub use cultural_adapter::CulturalAdapter;
pub use dialect_rewriter::{rewrite_hindi_to_bhojpuri, rule_count};
pub use glossary_normalizer::GlossaryNormalizer;
pub use job_orchestrator::{JobOrchestrator, OrchestratorError};
pub use stretch_plan::StretchPlan;
pub use subtitle_writer::{write_srt, write_vtt};
pub use token_counter::{count_tokens, prompt_payload_tokens};
pub use translation_router::TranslationRouter;
pub use tts_router::TtsRouter;
