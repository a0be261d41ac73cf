use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{TranslationBackend, TranslationError, TranslationRequest};

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Keyless Google Translate web endpoint. Takes no prompt, so glossary and
/// style handling happen in the router after the call returns.
pub struct GoogleTranslateBackend {
    client: Client,
}

impl GoogleTranslateBackend {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for GoogleTranslateBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateBackend {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        let target = request.target_lang.google_code();

        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
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

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        // Response shape: [[["translated", "original", ...], ...], ...]
        let sentences = payload
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| TranslationError::InvalidResponse("missing sentence array".to_string()))?;

        let mut translated = String::new();
        for sentence in sentences {
            if let Some(piece) = sentence.get(0).and_then(|v| v.as_str()) {
                translated.push_str(piece);
            }
        }

        let translated = translated.trim().to_string();
        if translated.is_empty() {
            return Err(TranslationError::EmptyResult);
        }

        tracing::debug!(
            target,
            chars_in = request.text.len(),
            chars_out = translated.len(),
            "Google translation completed"
        );

        Ok(translated)
    }
}
