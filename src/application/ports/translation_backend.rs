use async_trait::async_trait;

use crate::domain::LanguageTag;

/// One translation call. Backends that take no prompt (Google) ignore the
/// style guide and glossary; the router applies those as a post-pass.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub target_lang: LanguageTag,
    pub style_guide: Option<String>,
    /// Mandated `source term -> target form` pairs, already capped by the
    /// router.
    pub glossary: Vec<(String, String)>,
}

#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("missing credentials: {0}")]
    MissingCredentials(String),
    #[error("empty translation result")]
    EmptyResult,
}
