use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::application::ports::{TranslationBackend, TranslationError, TranslationRequest};
use crate::domain::{LanguageTag, TranslationModel};

use super::dialect_rewriter::rewrite_hindi_to_bhojpuri;
use super::token_counter::prompt_payload_tokens;

/// Prompt-injected glossaries are capped so a large course glossary cannot
/// crowd out the text being translated.
const MAX_GLOSSARY_PAIRS: usize = 50;

/// Payloads above this are still sent, but flagged; chunked input should
/// never get near it.
const TOKEN_BUDGET_WARN: usize = 8_000;

/// Picks a translation backend per target language and degrades through
/// fallback chains instead of failing. Every call returns a string: when the
/// whole chain is exhausted the original text comes back behind a
/// `[<lang> - <reason>]` marker so downstream stages keep moving.
pub struct TranslationRouter {
    backends: HashMap<TranslationModel, Arc<dyn TranslationBackend>>,
    default_model: TranslationModel,
}

impl TranslationRouter {
    pub fn new(default_model: TranslationModel) -> Self {
        Self {
            backends: HashMap::new(),
            default_model,
        }
    }

    pub fn with_backend(
        mut self,
        model: TranslationModel,
        backend: Arc<dyn TranslationBackend>,
    ) -> Self {
        self.backends.insert(model, backend);
        self
    }

    /// Backend selection. Target-language policy wins over the caller's
    /// request: single-pass targets are always Gemini, the extended Google
    /// set always Google.
    pub fn resolve(
        &self,
        target: &LanguageTag,
        requested: Option<TranslationModel>,
    ) -> TranslationModel {
        if target.is_single_pass_target() {
            return TranslationModel::Gemini;
        }
        if target.is_google_extended() {
            return TranslationModel::Google;
        }
        requested.unwrap_or(self.default_model)
    }

    pub async fn translate(
        &self,
        text: &str,
        target: &LanguageTag,
        requested: Option<TranslationModel>,
        style_guide: Option<&str>,
        glossary: &BTreeMap<String, String>,
    ) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let resolved = self.resolve(target, requested);
        let request = TranslationRequest {
            text: text.to_string(),
            target_lang: target.clone(),
            style_guide: style_guide
                .map(str::to_string)
                .filter(|guide| !guide.trim().is_empty()),
            glossary: capped_pairs(glossary),
        };
        if matches!(resolved, TranslationModel::Gemini | TranslationModel::Llm) {
            log_token_budget(&request);
        }
        tracing::debug!(
            target = %target,
            model = %resolved,
            chars = text.chars().count(),
            "Routing translation"
        );

        let outcome = match resolved {
            TranslationModel::Google => self.google_chain(&request).await,
            TranslationModel::Gemini => self.call_backend(TranslationModel::Gemini, &request).await,
            TranslationModel::Llm => self.llm_chain(&request).await,
            TranslationModel::IndicTrans2 => {
                match self.call_backend(TranslationModel::IndicTrans2, &request).await {
                    Ok(translated) => Ok(translated),
                    Err(_) => self.google_chain(&request).await,
                }
            }
        };

        match outcome {
            Ok(translated) => {
                if wants_sentence_per_line(style_guide) {
                    one_sentence_per_line(&translated)
                } else {
                    translated
                }
            }
            Err(reason) => {
                tracing::warn!(target = %target, reason, "Translation exhausted, tagging placeholder");
                format!("[{} - {}] {}", target.as_str(), reason, text)
            }
        }
    }

    /// Google, then Gemini. Google output gets the post-passes a prompt-less
    /// backend cannot do itself: the Bhojpuri dialect rewrite and literal
    /// target-glossary enforcement.
    async fn google_chain(
        &self,
        request: &TranslationRequest,
    ) -> Result<String, &'static str> {
        match self.call_backend(TranslationModel::Google, request).await {
            Ok(raw) => Ok(finish_google(raw, request)),
            Err(_) => self.call_backend(TranslationModel::Gemini, request).await,
        }
    }

    async fn llm_chain(&self, request: &TranslationRequest) -> Result<String, &'static str> {
        match self.call_backend(TranslationModel::Llm, request).await {
            Ok(translated) => Ok(translated),
            Err(_) => self.google_chain(request).await,
        }
    }

    async fn call_backend(
        &self,
        model: TranslationModel,
        request: &TranslationRequest,
    ) -> Result<String, &'static str> {
        let Some(backend) = self.backends.get(&model) else {
            tracing::warn!(model = %model, "Translation backend not registered");
            return Err("backend unavailable");
        };
        match backend.translate(request).await {
            Ok(translated) => Ok(translated),
            Err(e) => {
                tracing::warn!(model = %model, error = %e, "Translation backend failed");
                Err(failure_reason(&e))
            }
        }
    }
}

fn finish_google(raw: String, request: &TranslationRequest) -> String {
    let mut text = raw;
    if request.target_lang.base() == "bho" {
        text = rewrite_hindi_to_bhojpuri(&text);
    }
    for (term, mandated) in &request.glossary {
        if !term.is_empty() {
            text = text.replace(term, mandated);
        }
    }
    text
}

fn failure_reason(err: &TranslationError) -> &'static str {
    match err {
        TranslationError::ApiRequestFailed(_) => "request failed",
        TranslationError::InvalidResponse(_) => "invalid response",
        TranslationError::MissingCredentials(_) => "missing credentials",
        TranslationError::EmptyResult => "empty result",
    }
}

fn capped_pairs(glossary: &BTreeMap<String, String>) -> Vec<(String, String)> {
    if glossary.len() > MAX_GLOSSARY_PAIRS {
        tracing::debug!(
            total = glossary.len(),
            kept = MAX_GLOSSARY_PAIRS,
            "Glossary truncated for prompt injection"
        );
    }
    glossary
        .iter()
        .take(MAX_GLOSSARY_PAIRS)
        .map(|(term, form)| (term.clone(), form.clone()))
        .collect()
}

fn log_token_budget(request: &TranslationRequest) {
    let tokens = prompt_payload_tokens(
        &request.text,
        request.style_guide.as_deref(),
        &request.glossary,
    );
    if tokens > TOKEN_BUDGET_WARN {
        tracing::warn!(tokens, "Prompt payload above token budget");
    } else {
        tracing::debug!(tokens, "Prompt payload tokens");
    }
}

fn wants_sentence_per_line(style_guide: Option<&str>) -> bool {
    style_guide.is_some_and(|guide| {
        let lowered = guide.to_lowercase();
        lowered.contains("concise") || lowered.contains("brief")
    })
}

fn one_sentence_per_line(text: &str) -> String {
    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
