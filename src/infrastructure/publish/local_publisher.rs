use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{Publisher, PublisherError};
use crate::domain::{ArtifactKind, JobId, LanguageTag};

/// Filesystem-backed publisher. Artifacts land under
/// `{base}/{job_id}/{lang}/{kind}/{filename}` and the returned URL is the
/// `file://` form of that location.
pub struct LocalPublisher {
    store: Arc<LocalFileSystem>,
    base_dir: PathBuf,
}

impl LocalPublisher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, PublisherError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir).map_err(PublisherError::Io)?;
        let store = LocalFileSystem::new_with_prefix(&base_dir)
            .map_err(|e| PublisherError::UploadFailed(e.to_string()))?;
        Ok(Self {
            store: Arc::new(store),
            base_dir,
        })
    }
}

#[async_trait]
impl Publisher for LocalPublisher {
    async fn publish(
        &self,
        local_path: &Path,
        kind: ArtifactKind,
        job_id: &JobId,
        lang: &LanguageTag,
    ) -> Result<String, PublisherError> {
        let file_name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                PublisherError::UploadFailed(format!(
                    "no usable file name in {}",
                    local_path.display()
                ))
            })?;

        let contents = tokio::fs::read(local_path).await?;
        let key = format!("{}/{}/{}/{}", job_id, lang.as_str(), kind, file_name);

        self.store
            .put(&StorePath::from(key.as_str()), PutPayload::from(Bytes::from(contents)))
            .await
            .map_err(|e| PublisherError::UploadFailed(e.to_string()))?;

        let base = self
            .base_dir
            .canonicalize()
            .unwrap_or_else(|_| self.base_dir.clone());
        let url = format!("file://{}/{}", base.display(), key);

        tracing::info!(kind = %kind, %url, "Published artifact");
        Ok(url)
    }
}
