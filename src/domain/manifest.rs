use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ChunkResult;

/// The single JSON document that records everything a job produced. Written
/// once per terminal state; resynthesis may rewrite chunk audio paths and
/// the final artifact fields, all other fields are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub job_id: String,
    pub mode: String,
    pub source_lang: String,
    pub target_lang: String,
    pub course_id: String,
    pub input_path: PathBuf,
    pub chunk_count: usize,
    pub chunks: Vec<ChunkResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_audio: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_video: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudinary_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Manifest {
    pub fn new(
        job_id: String,
        mode: String,
        source_lang: String,
        target_lang: String,
        course_id: String,
        input_path: PathBuf,
        chunks: Vec<ChunkResult>,
    ) -> Self {
        let now = Utc::now();
        Self {
            job_id,
            mode,
            source_lang,
            target_lang,
            course_id,
            input_path,
            chunk_count: chunks.len(),
            chunks,
            final_audio: None,
            final_video: None,
            cloudinary_url: None,
            subtitle_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the chunk list, keeping `chunk_count` in lockstep.
    pub fn set_chunks(&mut self, chunks: Vec<ChunkResult>) {
        self.chunk_count = chunks.len();
        self.chunks = chunks;
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
