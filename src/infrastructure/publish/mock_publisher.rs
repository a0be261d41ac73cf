use std::path::Path;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{Publisher, PublisherError};
use crate::domain::{ArtifactKind, JobId, LanguageTag};

/// Publisher double. Returns a deterministic URL and records what was
/// published, without touching the filesystem.
pub struct MockPublisher {
    fail_reason: Option<String>,
    published: Mutex<Vec<(ArtifactKind, String)>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            fail_reason: None,
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_reason: Some(reason.to_string()),
            published: Mutex::new(Vec::new()),
        }
    }

    /// (artifact kind, file name) pairs, in publish order.
    pub async fn published(&self) -> Vec<(ArtifactKind, String)> {
        self.published.lock().await.clone()
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(
        &self,
        local_path: &Path,
        kind: ArtifactKind,
        job_id: &JobId,
        lang: &LanguageTag,
    ) -> Result<String, PublisherError> {
        if let Some(reason) = &self.fail_reason {
            return Err(PublisherError::UploadFailed(reason.clone()));
        }

        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.published
            .lock()
            .await
            .push((kind, file_name.clone()));

        Ok(format!(
            "mock://{}/{}/{}/{}",
            job_id,
            lang.as_str(),
            kind,
            file_name
        ))
    }
}
