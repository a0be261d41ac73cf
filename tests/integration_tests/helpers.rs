use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use malacca::application::services::{
    ChunkPipeline, GlossaryNormalizer, JobOrchestrator, TranslationRouter, TtsRouter,
    DEFAULT_CHUNK_LENGTH, DEFAULT_OVERLAP,
};
use malacca::domain::{JobId, JobRequest, LanguageTag, TranslationModel, VoiceGender};
use malacca::infrastructure::asr::MockTranscriptionEngine;
use malacca::infrastructure::context::FileContextRepository;
use malacca::infrastructure::media::MockMediaToolkit;
use malacca::infrastructure::publish::MockPublisher;
use malacca::infrastructure::translation::MockTranslationBackend;
use malacca::infrastructure::tts::{MockBasicBackend, MockNeuralBackend};

/// A fully wired dubbing pipeline running on in-process doubles. Every
/// double stays reachable so tests can inspect what it was asked to do.
pub struct TestPipeline {
    pub media: Arc<MockMediaToolkit>,
    pub asr: Arc<MockTranscriptionEngine>,
    pub google: Arc<MockTranslationBackend>,
    pub gemini: Arc<MockTranslationBackend>,
    pub neural: Arc<MockNeuralBackend>,
    pub basic: Arc<MockBasicBackend>,
    pub publisher: Arc<MockPublisher>,
    pub orchestrator: JobOrchestrator,
    pub jobs_dir: PathBuf,
    pub context_dir: PathBuf,
    _jobs: tempfile::TempDir,
    _context: tempfile::TempDir,
}

pub struct TestPipelineBuilder {
    media: MockMediaToolkit,
    asr: MockTranscriptionEngine,
    google: MockTranslationBackend,
    gemini: MockTranslationBackend,
    publisher: MockPublisher,
}

impl TestPipeline {
    pub fn builder() -> TestPipelineBuilder {
        TestPipelineBuilder {
            media: MockMediaToolkit::new(),
            asr: MockTranscriptionEngine::returning("hello from the lecture"),
            google: MockTranslationBackend::echoing("google"),
            gemini: MockTranslationBackend::echoing("gemini"),
            publisher: MockPublisher::new(),
        }
    }

    pub fn job_dir(&self, job_id: &str) -> PathBuf {
        self.jobs_dir.join(job_id)
    }
}

impl TestPipelineBuilder {
    pub fn media(mut self, media: MockMediaToolkit) -> Self {
        self.media = media;
        self
    }

    pub fn asr(mut self, asr: MockTranscriptionEngine) -> Self {
        self.asr = asr;
        self
    }

    pub fn google(mut self, backend: MockTranslationBackend) -> Self {
        self.google = backend;
        self
    }

    pub fn gemini(mut self, backend: MockTranslationBackend) -> Self {
        self.gemini = backend;
        self
    }

    pub fn publisher(mut self, publisher: MockPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn build(self) -> TestPipeline {
        let jobs = tempfile::TempDir::new().unwrap();
        let context = tempfile::TempDir::new().unwrap();

        let media = Arc::new(self.media);
        let asr = Arc::new(self.asr);
        let google = Arc::new(self.google);
        let gemini = Arc::new(self.gemini);
        let neural = Arc::new(MockNeuralBackend::new());
        let basic = Arc::new(MockBasicBackend::new());
        let publisher = Arc::new(self.publisher);

        let translator = Arc::new(
            TranslationRouter::new(TranslationModel::Google)
                .with_backend(TranslationModel::Google, google.clone())
                .with_backend(TranslationModel::Gemini, gemini.clone()),
        );
        let tts = Arc::new(TtsRouter::new(
            neural.clone(),
            basic.clone(),
            media.clone(),
            BTreeMap::new(),
            BTreeMap::new(),
            VoiceGender::Female,
        ));
        let pipeline = Arc::new(ChunkPipeline::new(
            asr.clone(),
            translator,
            tts.clone(),
            GlossaryNormalizer::new(),
        ));
        let context_repo = Arc::new(FileContextRepository::new(context.path().to_path_buf()));
        let orchestrator = JobOrchestrator::new(
            media.clone(),
            pipeline,
            tts,
            publisher.clone(),
            context_repo,
            jobs.path().to_path_buf(),
            DEFAULT_CHUNK_LENGTH,
            DEFAULT_OVERLAP,
        );

        TestPipeline {
            media,
            asr,
            google,
            gemini,
            neural,
            basic,
            publisher,
            orchestrator,
            jobs_dir: jobs.path().to_path_buf(),
            context_dir: context.path().to_path_buf(),
            _jobs: jobs,
            _context: context,
        }
    }
}

pub fn job_request(job_id: &str, input: &Path, source: &str, target: &str) -> JobRequest {
    JobRequest::new(
        JobId::new(job_id).unwrap(),
        input.to_path_buf(),
        LanguageTag::new(source),
        LanguageTag::new(target),
        String::new(),
    )
}
