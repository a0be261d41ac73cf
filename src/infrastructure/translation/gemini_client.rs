use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranslationBackend, TranslationError, TranslationRequest};
use crate::infrastructure::observability::{excerpt_for_log, redact_secrets};

use super::prompt::build_translation_prompt;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini generateContent backend. Carries the full prompt with glossary and
/// style guide, which makes it the only viable route for languages Google
/// Translate does not cover.
pub struct GeminiTranslationBackend {
    client: Client,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiTranslationBackend {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TranslationBackend for GeminiTranslationBackend {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            TranslationError::MissingCredentials("GEMINI_API_KEY is not set".to_string())
        })?;

        let prompt = build_translation_prompt(request);
        tracing::debug!(
            model = %self.model,
            target = request.target_lang.as_str(),
            prompt = %excerpt_for_log(&prompt),
            "Sending Gemini translation prompt"
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature: 0.2 },
        };

        let url = format!("{}/{}:generateContent?key={}", BASE_URL, self.model, api_key);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::ApiRequestFailed(redact_secrets(&e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status,
                redact_secrets(&body)
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(redact_secrets(&e.to_string())))?;

        let translated = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text.trim().to_string())
            .ok_or_else(|| TranslationError::InvalidResponse("empty candidates".to_string()))?;

        if translated.is_empty() {
            return Err(TranslationError::EmptyResult);
        }

        tracing::debug!(
            model = %self.model,
            target = request.target_lang.as_str(),
            chars_out = translated.len(),
            "Gemini translation completed"
        );

        Ok(translated)
    }
}
