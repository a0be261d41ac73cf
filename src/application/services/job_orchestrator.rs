use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::application::ports::{
    ContextRepository, MediaError, MediaToolkit, Publisher, SpeechError,
};
use crate::domain::{
    ArtifactKind, Chunk, ChunkResult, JobContext, JobId, JobRequest, JobStatus, LanguageTag,
    Manifest,
};

use super::audio_assembler::{AssemblyError, AudioAssembler};
use super::chunk_pipeline::{ChunkPipeline, ChunkPipelineError};
use super::chunker::{Chunker, ChunkerError};
use super::subtitle_writer::write_vtt;
use super::tts_router::TtsRouter;

/// Drives one dubbing job through the state machine
/// Init -> Chunked -> FannedOut -> Assembled -> Muxed -> Published ->
/// ManifestWritten. Owns the job directory; workers only write their own
/// `tts/chunk_{i:04}` files.
pub struct JobOrchestrator {
    media: Arc<dyn MediaToolkit>,
    chunker: Chunker,
    assembler: AudioAssembler,
    pipeline: Arc<ChunkPipeline>,
    tts: Arc<TtsRouter>,
    publisher: Arc<dyn Publisher>,
    context_repo: Arc<dyn ContextRepository>,
    jobs_dir: PathBuf,
}

impl JobOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        media: Arc<dyn MediaToolkit>,
        pipeline: Arc<ChunkPipeline>,
        tts: Arc<TtsRouter>,
        publisher: Arc<dyn Publisher>,
        context_repo: Arc<dyn ContextRepository>,
        jobs_dir: PathBuf,
        chunk_length: f64,
        overlap: f64,
    ) -> Self {
        Self {
            chunker: Chunker::with_windows(Arc::clone(&media), chunk_length, overlap),
            assembler: AudioAssembler::new(Arc::clone(&media)),
            media,
            pipeline,
            tts,
            publisher,
            context_repo,
            jobs_dir,
        }
    }

    pub fn manifest_path(&self, job_id: &JobId) -> PathBuf {
        self.jobs_dir.join(job_id.as_str()).join("manifest.json")
    }

    /// Runs the whole job. A failed run leaves any previous manifest on disk
    /// untouched and logs the state it failed in.
    pub async fn run_job(&self, request: &JobRequest) -> Result<Manifest, OrchestratorError> {
        // Manifests travel across working directories, so every path they
        // record must be absolute.
        let mut request = request.clone();
        request.input_path = std::path::absolute(&request.input_path)?;
        let job_dir = std::path::absolute(self.jobs_dir.join(request.job_id.as_str()))?;
        tokio::fs::create_dir_all(&job_dir).await?;

        let mut status = JobStatus::Init;
        let result = self.run_job_inner(&request, &job_dir, &mut status).await;
        match &result {
            Ok(manifest) => {
                tracing::info!(
                    job_id = %request.job_id,
                    chunk_count = manifest.chunk_count,
                    "Job completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    job_id = %request.job_id,
                    state = %status,
                    error = %e,
                    "Job failed"
                );
                advance(&mut status, JobStatus::Failed);
            }
        }
        result
    }

    async fn run_job_inner(
        &self,
        request: &JobRequest,
        job_dir: &Path,
        status: &mut JobStatus,
    ) -> Result<Manifest, OrchestratorError> {
        let context = match self.context_repo.load_context(&request.course_id).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "Context load failed, continuing with empty context");
                JobContext::default()
            }
        };

        let duration = self.media.probe_duration(&request.input_path).await?;
        if duration <= 0.0 {
            return Err(OrchestratorError::InvalidDuration(duration));
        }

        if request.target_lang.is_single_pass_target() {
            return self
                .run_single_pass(request, job_dir, &context, duration, status)
                .await;
        }

        let chunks = self
            .chunker
            .split(&request.input_path, &job_dir.join("chunks"))
            .await?;
        advance(status, JobStatus::Chunked);

        let tts_dir = job_dir.join("tts");
        tokio::fs::create_dir_all(&tts_dir).await?;

        let workers = worker_count(chunks.len());
        tracing::info!(
            job_id = %request.job_id,
            chunk_count = chunks.len(),
            workers,
            "Fanning out chunk pipeline"
        );
        let semaphore = Arc::new(Semaphore::new(workers));
        let futures: Vec<_> = chunks
            .iter()
            .map(|chunk| {
                let semaphore = Arc::clone(&semaphore);
                let tts_dir = &tts_dir;
                let context = &context;
                let span =
                    tracing::info_span!("chunk", job_id = %request.job_id, index = chunk.index);
                async move {
                    let _permit = semaphore.acquire().await.map_err(|e| {
                        ChunkPipelineError::Io(std::io::Error::other(e.to_string()))
                    })?;
                    self.pipeline
                        .process(
                            chunk,
                            &request.source_lang,
                            &request.target_lang,
                            request.translation_model,
                            context,
                            tts_dir,
                        )
                        .await
                }
                .instrument(span)
            })
            .collect();
        let outcomes = join_all(futures).await;
        advance(status, JobStatus::FannedOut);

        let mut results = Vec::new();
        for (chunk, outcome) in chunks.iter().zip(outcomes) {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!(index = chunk.index, error = %e, "Chunk dropped");
                }
            }
        }
        if results.is_empty() {
            return Err(OrchestratorError::NoChunks);
        }
        results.sort_by_key(|result| result.index);

        self.finalize_outputs(request, job_dir, results, duration, status)
            .await
    }

    /// Degenerate variant for Gemini-preferred targets: the whole input is one
    /// chunk, so a transcription failure here fails the job.
    async fn run_single_pass(
        &self,
        request: &JobRequest,
        job_dir: &Path,
        context: &JobContext,
        duration: f64,
        status: &mut JobStatus,
    ) -> Result<Manifest, OrchestratorError> {
        tracing::info!(
            job_id = %request.job_id,
            target = %request.target_lang,
            "Single-pass mode"
        );

        let audio_path = job_dir.join("full_audio.wav");
        self.media
            .extract_audio(&request.input_path, &audio_path)
            .await?;
        advance(status, JobStatus::Chunked);

        let tts_dir = job_dir.join("tts");
        tokio::fs::create_dir_all(&tts_dir).await?;

        let chunk = Chunk::new(0, 0.0, duration, request.input_path.clone(), audio_path);
        let result = self
            .pipeline
            .process(
                &chunk,
                &request.source_lang,
                &request.target_lang,
                request.translation_model,
                context,
                &tts_dir,
            )
            .await
            .map_err(OrchestratorError::SinglePass)?;
        advance(status, JobStatus::FannedOut);

        self.finalize_outputs(request, job_dir, vec![result], duration, status)
            .await
    }

    /// Common tail of both modes: assemble, write global captions, mux when
    /// the input has video, publish, write the manifest atomically.
    async fn finalize_outputs(
        &self,
        request: &JobRequest,
        job_dir: &Path,
        results: Vec<ChunkResult>,
        duration: f64,
        status: &mut JobStatus,
    ) -> Result<Manifest, OrchestratorError> {
        let audio_paths: Vec<PathBuf> = results.iter().map(|r| r.audio_path.clone()).collect();
        let final_audio = job_dir.join("final_audio.wav");
        self.assembler
            .assemble(&audio_paths, duration, &final_audio)
            .await?;
        advance(status, JobStatus::Assembled);

        let vtt_path = job_dir.join("captions.vtt");
        write_vtt(&results, &vtt_path)?;

        let final_video = if self.media.has_video_stream(&request.input_path).await? {
            let out = job_dir.join("final_video.mp4");
            self.media.mux(&request.input_path, &final_audio, &out).await?;
            Some(out)
        } else {
            None
        };
        advance(status, JobStatus::Muxed);

        let media_url = match &final_video {
            Some(video) => {
                self.publish_quietly(video, ArtifactKind::Video, &request.job_id, &request.target_lang)
                    .await
            }
            None => {
                self.publish_quietly(
                    &final_audio,
                    ArtifactKind::Audio,
                    &request.job_id,
                    &request.target_lang,
                )
                .await
            }
        };
        let subtitle_url = self
            .publish_quietly(
                &vtt_path,
                ArtifactKind::Subtitle,
                &request.job_id,
                &request.target_lang,
            )
            .await;
        advance(status, JobStatus::Published);

        let mut manifest = Manifest::new(
            request.job_id.to_string(),
            request.mode.to_string(),
            request.source_lang.to_string(),
            request.target_lang.to_string(),
            request.course_id.clone(),
            request.input_path.clone(),
            results,
        );
        manifest.final_audio = Some(final_audio);
        manifest.final_video = final_video;
        manifest.cloudinary_url = media_url;
        manifest.subtitle_url = subtitle_url;

        self.save_manifest(&manifest, &job_dir.join("manifest.json"))
            .await?;
        advance(status, JobStatus::ManifestWritten);
        Ok(manifest)
    }

    /// Re-runs only TTS for every chunk, leaving `text_translated` untouched.
    /// New audio lands in `out_dir` when given, else back in the job's `tts/`.
    pub async fn resynthesize(
        &self,
        manifest_path: &Path,
        out_dir: Option<&Path>,
    ) -> Result<Manifest, OrchestratorError> {
        let manifest_path = std::path::absolute(manifest_path)?;
        let mut manifest = self.load_manifest(&manifest_path).await?;
        let target = LanguageTag::new(manifest.target_lang.clone());
        let dir = match out_dir {
            Some(dir) => std::path::absolute(dir)?,
            None => manifest_path
                .parent()
                .map(|parent| parent.join("tts"))
                .unwrap_or_else(|| PathBuf::from("tts")),
        };
        tokio::fs::create_dir_all(&dir).await?;

        tracing::info!(
            job_id = %manifest.job_id,
            chunk_count = manifest.chunk_count,
            out_dir = %dir.display(),
            "Resynthesizing chunk audio"
        );
        for chunk in &mut manifest.chunks {
            let out = dir.join(format!("chunk_{:04}.mp3", chunk.index));
            self.tts
                .synthesize(&chunk.text_translated, &target, chunk.duration(), &out)
                .await
                .map_err(OrchestratorError::Synthesis)?;
            chunk.audio_path = out;
        }

        manifest.touch();
        self.save_manifest(&manifest, &manifest_path).await?;
        Ok(manifest)
    }

    /// Rebuilds the final artifacts from the manifest's chunk audio,
    /// rewriting `final_audio`/`final_video` and the publish URLs.
    pub async fn finalize_resynthesis(
        &self,
        manifest_path: &Path,
    ) -> Result<Manifest, OrchestratorError> {
        let manifest_path = std::path::absolute(manifest_path)?;
        let mut manifest = self.load_manifest(&manifest_path).await?;
        let job_id = JobId::new(manifest.job_id.clone()).map_err(OrchestratorError::BadManifest)?;
        let target = LanguageTag::new(manifest.target_lang.clone());
        let job_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        manifest.chunks.sort_by_key(|chunk| chunk.index);
        let audio_paths: Vec<PathBuf> =
            manifest.chunks.iter().map(|c| c.audio_path.clone()).collect();
        let duration = self.media.probe_duration(&manifest.input_path).await?;

        let final_audio = job_dir.join("final_audio.wav");
        self.assembler
            .assemble(&audio_paths, duration, &final_audio)
            .await?;

        let final_video = if self.media.has_video_stream(&manifest.input_path).await? {
            let out = job_dir.join("final_video.mp4");
            self.media.mux(&manifest.input_path, &final_audio, &out).await?;
            Some(out)
        } else {
            None
        };

        manifest.cloudinary_url = match &final_video {
            Some(video) => {
                self.publish_quietly(video, ArtifactKind::Video, &job_id, &target)
                    .await
            }
            None => {
                self.publish_quietly(&final_audio, ArtifactKind::Audio, &job_id, &target)
                    .await
            }
        };
        manifest.final_audio = Some(final_audio);
        manifest.final_video = final_video;
        manifest.touch();

        self.save_manifest(&manifest, &manifest_path).await?;
        Ok(manifest)
    }

    /// Deletes per-chunk scratch (`chunks/`, `tts/`, the single-pass WAV),
    /// never the manifest or the final artifacts.
    pub async fn cleanup(&self, manifest: &Manifest) {
        let job_dir = self.jobs_dir.join(&manifest.job_id);
        for scratch_dir in ["chunks", "tts"] {
            let path = job_dir.join(scratch_dir);
            if let Err(e) = tokio::fs::remove_dir_all(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "Cleanup failed");
                }
            }
        }
        let full_audio = job_dir.join("full_audio.wav");
        if let Err(e) = tokio::fs::remove_file(&full_audio).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %full_audio.display(), error = %e, "Cleanup failed");
            }
        }
    }

    async fn publish_quietly(
        &self,
        path: &Path,
        kind: ArtifactKind,
        job_id: &JobId,
        lang: &LanguageTag,
    ) -> Option<String> {
        match self.publisher.publish(path, kind, job_id, lang).await {
            Ok(url) => {
                tracing::info!(kind = %kind, url, "Artifact published");
                Some(url)
            }
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Publish failed, continuing");
                None
            }
        }
    }

    async fn load_manifest(&self, path: &Path) -> Result<Manifest, OrchestratorError> {
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| OrchestratorError::BadManifest(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&data)
            .map_err(|e| OrchestratorError::BadManifest(format!("{}: {}", path.display(), e)))
    }

    /// Write-then-rename so a crash mid-write can never corrupt a previously
    /// good manifest.
    async fn save_manifest(
        &self,
        manifest: &Manifest,
        path: &Path,
    ) -> Result<(), OrchestratorError> {
        let json = serde_json::to_string_pretty(manifest)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

fn advance(status: &mut JobStatus, next: JobStatus) {
    *status = next;
    tracing::debug!(status = %next, "Job status transition");
}

fn worker_count(chunk_count: usize) -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2);
    cpus.saturating_sub(1).max(1).min(chunk_count.max(1))
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("chunking: {0}")]
    Chunking(#[from] ChunkerError),
    #[error("assembly: {0}")]
    Assembly(#[from] AssemblyError),
    #[error("media: {0}")]
    Media(#[from] MediaError),
    #[error("single-pass pipeline: {0}")]
    SinglePass(ChunkPipelineError),
    #[error("synthesis: {0}")]
    Synthesis(SpeechError),
    #[error("no audio chunks generated")]
    NoChunks,
    #[error("input has non-positive duration: {0}")]
    InvalidDuration(f64),
    #[error("bad manifest: {0}")]
    BadManifest(String),
    #[error("manifest encoding: {0}")]
    ManifestEncode(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
