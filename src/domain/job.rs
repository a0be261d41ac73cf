use std::path::PathBuf;

use super::{AsrMode, JobId, LanguageTag, TranslationModel};

/// Everything the orchestrator needs to run one dubbing job.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub job_id: JobId,
    pub input_path: PathBuf,
    pub source_lang: LanguageTag,
    pub target_lang: LanguageTag,
    pub course_id: String,
    pub mode: AsrMode,
    /// Requested translation backend; target-language policy may override.
    pub translation_model: Option<TranslationModel>,
}

impl JobRequest {
    pub fn new(
        job_id: JobId,
        input_path: PathBuf,
        source_lang: LanguageTag,
        target_lang: LanguageTag,
        course_id: String,
    ) -> Self {
        Self {
            job_id,
            input_path,
            source_lang,
            target_lang,
            course_id,
            mode: AsrMode::default(),
            translation_model: None,
        }
    }

    pub fn with_mode(mut self, mode: AsrMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_translation_model(mut self, model: TranslationModel) -> Self {
        self.translation_model = Some(model);
        self
    }
}
