use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{SpeechError, TranscriptionEngine, TranscriptionError};
use crate::domain::{Chunk, ChunkResult, JobContext, LanguageTag, TranscriptSegment, TranslationModel};

use super::cultural_adapter::CulturalAdapter;
use super::glossary_normalizer::GlossaryNormalizer;
use super::subtitle_writer::write_srt;
use super::translation_router::TranslationRouter;
use super::tts_router::TtsRouter;

/// Runs one chunk through ASR, glossary normalization, translation, cultural
/// adaptation, TTS and the per-chunk caption file. Stateless across chunks;
/// the orchestrator fans instances of this call out across workers.
pub struct ChunkPipeline {
    asr: Arc<dyn TranscriptionEngine>,
    translator: Arc<TranslationRouter>,
    tts: Arc<TtsRouter>,
    normalizer: GlossaryNormalizer,
    adapter: CulturalAdapter,
}

impl ChunkPipeline {
    pub fn new(
        asr: Arc<dyn TranscriptionEngine>,
        translator: Arc<TranslationRouter>,
        tts: Arc<TtsRouter>,
        normalizer: GlossaryNormalizer,
    ) -> Self {
        Self {
            asr,
            translator,
            tts,
            normalizer,
            adapter: CulturalAdapter::new(),
        }
    }

    pub async fn process(
        &self,
        chunk: &Chunk,
        source: &LanguageTag,
        target: &LanguageTag,
        requested_model: Option<TranslationModel>,
        context: &JobContext,
        tts_dir: &Path,
    ) -> Result<ChunkResult, ChunkPipelineError> {
        let transcript = self
            .asr
            .transcribe(&chunk.audio_path, source.base(), &context.initial_prompt)
            .await?;

        let text_original = self.normalizer.clean(&transcript.text, &context.glossary);
        tracing::debug!(
            index = chunk.index,
            chars = text_original.chars().count(),
            segments = transcript.segments.len(),
            "Chunk transcribed"
        );

        let style_guide = (!context.style_guide.trim().is_empty())
            .then_some(context.style_guide.as_str());
        let translated = self
            .translator
            .translate(
                &text_original,
                target,
                requested_model,
                style_guide,
                &context.target_pairs(target.base()),
            )
            .await;
        let text_translated = self
            .adapter
            .adapt(&translated, target, &context.cultural_rules);

        let audio_path = tts_dir.join(format!("chunk_{:04}.mp3", chunk.index));
        self.tts
            .synthesize(&text_translated, target, chunk.duration(), &audio_path)
            .await?;

        // Captions carry the same glossary spelling as the translator input.
        let mut segments = transcript.segments.clone();
        for segment in &mut segments {
            segment.text = self.normalizer.clean(&segment.text, &context.glossary);
        }
        let srt_path = tts_dir.join(format!("chunk_{:04}.srt", chunk.index));
        write_srt(&caption_segments(&segments, &text_original, chunk), &srt_path)?;

        Ok(ChunkResult {
            index: chunk.index,
            start: chunk.start,
            end: chunk.end,
            text_original,
            text_translated,
            audio_path,
            srt_path,
        })
    }
}

/// Captions come from the source-language segments. When the engine returned
/// text but no timestamps, a single cue spanning the chunk stands in.
fn caption_segments(
    segments: &[TranscriptSegment],
    text_original: &str,
    chunk: &Chunk,
) -> Vec<TranscriptSegment> {
    if !segments.is_empty() {
        return segments.to_vec();
    }
    if text_original.trim().is_empty() {
        return Vec::new();
    }
    vec![TranscriptSegment {
        start: 0.0,
        end: chunk.duration(),
        text: text_original.to_string(),
    }]
}

#[derive(Debug, thiserror::Error)]
pub enum ChunkPipelineError {
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("synthesis: {0}")]
    Synthesis(#[from] SpeechError),
    #[error("caption write: {0}")]
    Io(#[from] std::io::Error),
}
