use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranslationBackend, TranslationError, TranslationRequest};
use crate::infrastructure::observability::excerpt_for_log;

use super::prompt::build_translation_prompt;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SYSTEM_PROMPT: &str =
    "You are a professional localization translator for technical course content.";

/// Chat-completions backend for any OpenAI-compatible endpoint, used when an
/// operator routes translation through their own hosted model.
pub struct OpenAiCompatBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiCompatBackend {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TranslationBackend for OpenAiCompatBackend {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        let prompt = build_translation_prompt(request);
        tracing::debug!(
            model = %self.model,
            target = request.target_lang.as_str(),
            prompt = %excerpt_for_log(&prompt),
            "Sending chat completion prompt"
        );
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: 0.2,
        };

        let mut http_request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(&body);
        if let Some(key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {}", key));
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| TranslationError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        let translated = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| TranslationError::InvalidResponse("empty choices".to_string()))?;

        if translated.is_empty() {
            return Err(TranslationError::EmptyResult);
        }

        Ok(translated)
    }
}
