use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::application::ports::{ContextError, ContextRepository, PronunciationOverrides};
use crate::domain::JobContext;

/// ASR casing fixes that apply to every course. Course glossaries override
/// any entry they re-declare.
const BUILTIN_TECH_GLOSSARY: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("java script", "JavaScript"),
    ("typescript", "TypeScript"),
    ("python", "Python"),
    ("github", "GitHub"),
    ("git hub", "GitHub"),
    ("nodejs", "Node.js"),
    ("node js", "Node.js"),
    ("sql", "SQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("json", "JSON"),
    ("kubernetes", "Kubernetes"),
    ("docker", "Docker"),
];

/// Reads job guidance from a flat directory:
///
/// ```text
/// {context_dir}/courses/{course_id}.json   per-course JobContext
/// {context_dir}/voice_map.json             base lang -> voice id
/// {context_dir}/pronunciation_overrides.json
/// ```
///
/// Missing files mean empty data; malformed files are logged and treated the
/// same, so a bad edit never takes the pipeline down.
pub struct FileContextRepository {
    context_dir: PathBuf,
}

impl FileContextRepository {
    pub fn new(context_dir: impl Into<PathBuf>) -> Self {
        Self {
            context_dir: context_dir.into(),
        }
    }

    async fn read_json_or_default<T>(&self, path: &Path) -> T
    where
        T: DeserializeOwned + Default,
    {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Context file absent, using defaults");
                return T::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Context file unreadable");
                return T::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Context file malformed");
                T::default()
            }
        }
    }
}

#[async_trait]
impl ContextRepository for FileContextRepository {
    async fn load_context(&self, course_id: &str) -> Result<JobContext, ContextError> {
        let path = self
            .context_dir
            .join("courses")
            .join(format!("{course_id}.json"));
        let mut context: JobContext = self.read_json_or_default(&path).await;

        for (term, canonical) in BUILTIN_TECH_GLOSSARY {
            context
                .glossary
                .entry((*term).to_string())
                .or_insert_with(|| (*canonical).to_string());
        }

        tracing::debug!(
            course_id,
            glossary_terms = context.glossary.len(),
            target_languages = context.target_glossary.len(),
            "Loaded job context"
        );

        Ok(context)
    }

    async fn voice_map(&self) -> Result<BTreeMap<String, String>, ContextError> {
        let path = self.context_dir.join("voice_map.json");
        Ok(self.read_json_or_default(&path).await)
    }

    async fn pronunciation_overrides(&self) -> Result<PronunciationOverrides, ContextError> {
        let path = self.context_dir.join("pronunciation_overrides.json");
        Ok(self.read_json_or_default(&path).await)
    }
}
