use std::path::Path;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{
    BasicSpeechBackend, NeuralSpeechBackend, SpeechError, SynthesisRequest, VoiceInfo,
};

fn voice(short_name: &str, locale: &str, gender: &str) -> VoiceInfo {
    VoiceInfo {
        short_name: short_name.to_string(),
        locale: locale.to_string(),
        gender: gender.to_string(),
        display_name: short_name.to_string(),
    }
}

fn default_catalog() -> Vec<VoiceInfo> {
    vec![
        voice("hi-IN-SwaraNeural", "hi-IN", "Female"),
        voice("hi-IN-MadhurNeural", "hi-IN", "Male"),
        voice("ur-IN-GulNeural", "ur-IN", "Female"),
        voice("ne-NP-HemkalaNeural", "ne-NP", "Female"),
        voice("as-IN-YashicaNeural", "as-IN", "Female"),
    ]
}

/// Neural backend double. Writes a placeholder MP3 and remembers every
/// synthesis request so tests can inspect voice and prosody choices.
pub struct MockNeuralBackend {
    catalog: Vec<VoiceInfo>,
    fail_reason: Option<String>,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl MockNeuralBackend {
    pub fn new() -> Self {
        Self {
            catalog: default_catalog(),
            fail_reason: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_reason: Some(reason.to_string()),
            ..Self::new()
        }
    }

    pub fn with_voices(voices: Vec<VoiceInfo>) -> Self {
        Self {
            catalog: voices,
            fail_reason: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockNeuralBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NeuralSpeechBackend for MockNeuralBackend {
    async fn voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        Ok(self.catalog.clone())
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<(), SpeechError> {
        self.requests.lock().await.push(request.clone());

        if let Some(reason) = &self.fail_reason {
            return Err(SpeechError::ApiRequestFailed(reason.clone()));
        }

        if let Some(parent) = request.out_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&request.out_path, b"mock neural audio").await?;
        Ok(())
    }
}

/// Fallback backend double. Records the language codes it was asked for.
pub struct MockBasicBackend {
    fail_reason: Option<String>,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockBasicBackend {
    pub fn new() -> Self {
        Self {
            fail_reason: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_reason: Some(reason.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// (text, lang_code) pairs, in call order.
    pub async fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockBasicBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasicSpeechBackend for MockBasicBackend {
    async fn synthesize(
        &self,
        text: &str,
        lang_code: &str,
        out_path: &Path,
    ) -> Result<(), SpeechError> {
        self.requests
            .lock()
            .await
            .push((text.to_string(), lang_code.to_string()));

        if let Some(reason) = &self.fail_reason {
            return Err(SpeechError::ApiRequestFailed(reason.clone()));
        }

        if let Some(parent) = out_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(out_path, b"mock basic audio").await?;
        Ok(())
    }
}
