use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::JobContext;

/// Per-language pronunciation overrides for TTS. Keys are either plain words
/// (matched on word boundaries, case-insensitive) or regexes prefixed with
/// `re:`; values are the replacement text.
pub type PronunciationOverrides = BTreeMap<String, BTreeMap<String, String>>;

/// Loader for the read-only translation-guidance data of a job. Missing files
/// are treated as empty so a bare deployment still runs.
#[async_trait]
pub trait ContextRepository: Send + Sync {
    async fn load_context(&self, course_id: &str) -> Result<JobContext, ContextError>;

    /// Explicit `base language -> neural voice id` assignments.
    async fn voice_map(&self) -> Result<BTreeMap<String, String>, ContextError>;

    async fn pronunciation_overrides(&self) -> Result<PronunciationOverrides, ContextError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("context read failed: {0}")]
    ReadFailed(String),
}
