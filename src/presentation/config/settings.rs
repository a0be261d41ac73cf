use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::TranslationModel;

/// Process configuration, read once at startup. Every knob is an environment
/// variable with a default, so an unconfigured binary still runs; backends
/// whose credentials are absent degrade at call time instead of at boot.
#[derive(Debug, Clone)]
pub struct Settings {
    pub translation: TranslationSettings,
    pub speech: SpeechSettings,
    pub asr: AsrSettings,
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Clone)]
pub struct TranslationSettings {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub llm_api_url: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub default_backend: TranslationModel,
}

#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub azure_key: Option<String>,
    pub azure_region: String,
}

#[derive(Debug, Clone)]
pub struct AsrSettings {
    /// Local weights cache; unset means the default Hugging Face cache.
    pub model_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub jobs_dir: PathBuf,
    pub context_dir: PathBuf,
    pub strict_glossary: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        let default_backend = match env_opt("TRANSLATION_MODEL") {
            Some(raw) => TranslationModel::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring TRANSLATION_MODEL");
                TranslationModel::default()
            }),
            None => TranslationModel::default(),
        };

        Self {
            translation: TranslationSettings {
                gemini_api_key: env_opt("GEMINI_API_KEY"),
                gemini_model: env_or("GEMINI_MODEL", "gemini-2.0-flash"),
                llm_api_url: env_opt("LLM_API_URL"),
                llm_api_key: env_opt("LLM_API_KEY"),
                llm_model: env_or("LLM_MODEL", "gpt-4o-mini"),
                default_backend,
            },
            speech: SpeechSettings {
                azure_key: env_opt("AZURE_SPEECH_KEY"),
                azure_region: env_or("AZURE_SPEECH_REGION", "centralindia"),
            },
            asr: AsrSettings {
                model_dir: env_opt("WHISPER_MODEL_DIR").map(PathBuf::from),
            },
            pipeline: PipelineSettings {
                jobs_dir: PathBuf::from(env_or("MALACCA_JOBS_DIR", "jobs")),
                context_dir: PathBuf::from(env_or("MALACCA_CONTEXT_DIR", "context")),
                strict_glossary: env_flag("MALACCA_STRICT_GLOSSARY"),
            },
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_flag(key: &str) -> bool {
    env_opt(key).is_some_and(|value| matches!(value.trim(), "1" | "true" | "yes"))
}
