use std::path::Path;

use async_trait::async_trait;

use crate::domain::{ArtifactKind, JobId, LanguageTag};

/// Opaque capability that exposes a finished artifact at a remote URL. The
/// pipeline records the returned URL but never depends on it for correctness;
/// publish failures are downgraded to warnings by the orchestrator.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(
        &self,
        local_path: &Path,
        kind: ArtifactKind,
        job_id: &JobId,
        lang: &LanguageTag,
    ) -> Result<String, PublisherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
