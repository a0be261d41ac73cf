use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use malacca::application::ports::{ContextRepository, MediaToolkit};
use malacca::application::services::{
    ChunkPipeline, GlossaryNormalizer, JobOrchestrator, TranslationRouter, TtsRouter,
    DEFAULT_CHUNK_LENGTH, DEFAULT_OVERLAP,
};
use malacca::domain::{AsrMode, JobId, JobRequest, TranslationModel, VoiceGender};
use malacca::infrastructure::asr::WhisperEngineFactory;
use malacca::infrastructure::context::FileContextRepository;
use malacca::infrastructure::media::FfmpegToolkit;
use malacca::infrastructure::observability::{TracingConfig, init_tracing};
use malacca::infrastructure::publish::LocalPublisher;
use malacca::infrastructure::translation::{
    GeminiTranslationBackend, GoogleTranslateBackend, OpenAiCompatBackend,
};
use malacca::infrastructure::tts::{AzureNeuralTts, GoogleBasicTts};
use malacca::presentation::{Cli, Command, FinalizeArgs, ResynthesizeArgs, RunArgs, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(TracingConfig::default());
    let settings = Settings::from_env();

    match cli.command {
        Command::Run(args) => run(args, settings).await,
        Command::Resynthesize(args) => resynthesize(args, settings).await,
        Command::Finalize(args) => finalize(args, settings).await,
    }
}

async fn run(args: RunArgs, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(&settings, args.jobs_dir.clone(), args.mode).await?;

    let job_id = match &args.job {
        Some(id) => JobId::new(id.clone()).map_err(anyhow::Error::msg)?,
        None => JobId::generate(),
    };
    let mut request = JobRequest::new(
        job_id.clone(),
        args.input,
        args.source,
        args.target,
        args.course_id,
    )
    .with_mode(args.mode);
    if let Some(model) = args.model {
        request = request.with_translation_model(model);
    }

    let manifest = orchestrator.run_job(&request).await?;
    if args.cleanup {
        orchestrator.cleanup(&manifest).await;
    }
    println!("{}", orchestrator.manifest_path(&job_id).display());
    Ok(())
}

async fn resynthesize(args: ResynthesizeArgs, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(&settings, None, AsrMode::default()).await?;
    orchestrator
        .resynthesize(&args.manifest, args.out_dir.as_deref())
        .await?;
    println!("{}", args.manifest.display());
    Ok(())
}

async fn finalize(args: FinalizeArgs, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(&settings, None, AsrMode::default()).await?;
    orchestrator.finalize_resynthesis(&args.manifest).await?;
    println!("{}", args.manifest.display());
    Ok(())
}

async fn build_orchestrator(
    settings: &Settings,
    jobs_dir_override: Option<PathBuf>,
    mode: AsrMode,
) -> anyhow::Result<JobOrchestrator> {
    let toolkit = FfmpegToolkit::from_env();
    if !toolkit.is_available().await {
        anyhow::bail!("ffmpeg/ffprobe not found; set FFMPEG_EXE/FFPROBE_EXE or install them");
    }
    let media: Arc<dyn MediaToolkit> = Arc::new(toolkit);

    let mut router = TranslationRouter::new(settings.translation.default_backend)
        .with_backend(TranslationModel::Google, Arc::new(GoogleTranslateBackend::new()))
        .with_backend(
            TranslationModel::Gemini,
            Arc::new(GeminiTranslationBackend::new(
                settings.translation.gemini_api_key.clone(),
                settings.translation.gemini_model.clone(),
            )),
        );
    if let Some(url) = &settings.translation.llm_api_url {
        router = router.with_backend(
            TranslationModel::Llm,
            Arc::new(OpenAiCompatBackend::new(
                url.clone(),
                settings.translation.llm_api_key.clone(),
                settings.translation.llm_model.clone(),
            )),
        );
    }
    let translator = Arc::new(router);

    let context_repo = Arc::new(FileContextRepository::new(
        settings.pipeline.context_dir.clone(),
    ));
    let voice_map = context_repo.voice_map().await.unwrap_or_default();
    let overrides = context_repo.pronunciation_overrides().await.unwrap_or_default();

    let tts = Arc::new(TtsRouter::new(
        Arc::new(AzureNeuralTts::new(
            settings.speech.azure_key.clone(),
            settings.speech.azure_region.clone(),
        )),
        Arc::new(GoogleBasicTts::new()),
        Arc::clone(&media),
        voice_map,
        overrides,
        VoiceGender::default(),
    ));

    let asr = WhisperEngineFactory::create(mode.profile(), settings.asr.model_dir.clone());
    let normalizer = if settings.pipeline.strict_glossary {
        GlossaryNormalizer::strict()
    } else {
        GlossaryNormalizer::new()
    };
    let pipeline = Arc::new(ChunkPipeline::new(
        asr,
        Arc::clone(&translator),
        Arc::clone(&tts),
        normalizer,
    ));

    let jobs_dir = jobs_dir_override.unwrap_or_else(|| settings.pipeline.jobs_dir.clone());
    let publisher = Arc::new(LocalPublisher::new(jobs_dir.join("published"))?);

    Ok(JobOrchestrator::new(
        media,
        pipeline,
        tts,
        publisher,
        context_repo,
        jobs_dir,
        DEFAULT_CHUNK_LENGTH,
        DEFAULT_OVERLAP,
    ))
}
