use std::path::Path;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{Transcript, TranscriptSegment};

/// Scripted recognizer for tests. Returns the same transcript on every call
/// and records the language and prompt it was asked for.
pub struct MockTranscriptionEngine {
    transcript: Transcript,
    fail_reason: Option<String>,
    fail_on_call: Option<usize>,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockTranscriptionEngine {
    pub fn returning(text: &str) -> Self {
        let transcript = Transcript::new(
            text.to_string(),
            vec![TranscriptSegment {
                start: 0.0,
                end: 5.0,
                text: text.to_string(),
            }],
        );
        Self::with_transcript(transcript)
    }

    pub fn with_transcript(transcript: Transcript) -> Self {
        Self {
            transcript,
            fail_reason: None,
            fail_on_call: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self::with_transcript(Transcript::default())
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            transcript: Transcript::default(),
            fail_reason: Some(reason.to_string()),
            fail_on_call: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails only the n-th transcription (0-based), succeeding otherwise.
    pub fn fail_on(mut self, call_index: usize) -> Self {
        self.fail_on_call = Some(call_index);
        self
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        language: &str,
        initial_prompt: &str,
    ) -> Result<Transcript, TranscriptionError> {
        let call_index = {
            let mut requests = self.requests.lock().await;
            requests.push((language.to_string(), initial_prompt.to_string()));
            requests.len() - 1
        };

        if let Some(reason) = &self.fail_reason {
            if self.fail_on_call.is_none() || self.fail_on_call == Some(call_index) {
                return Err(TranscriptionError::TranscriptionFailed(reason.clone()));
            }
        }
        if self.fail_on_call == Some(call_index) {
            return Err(TranscriptionError::TranscriptionFailed(
                "scripted failure".to_string(),
            ));
        }

        Ok(self.transcript.clone())
    }
}
