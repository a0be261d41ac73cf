use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::RwLock;

use crate::application::ports::{NeuralSpeechBackend, SpeechError, SynthesisRequest, VoiceInfo};

const OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";
const USER_AGENT: &str = "malacca-tts";

/// Azure Cognitive Services neural TTS. The voice catalog is fetched once
/// per process and cached; synthesis posts SSML and writes the MP3 reply.
pub struct AzureNeuralTts {
    client: Client,
    api_key: Option<String>,
    region: String,
    catalog: RwLock<Option<Vec<VoiceInfo>>>,
}

impl AzureNeuralTts {
    pub fn new(api_key: Option<String>, region: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            region: region.into(),
            catalog: RwLock::new(None),
        }
    }

    fn key(&self) -> Result<&str, SpeechError> {
        self.api_key.as_deref().ok_or_else(|| {
            SpeechError::MissingCredentials("AZURE_SPEECH_KEY is not set".to_string())
        })
    }

    fn voices_url(&self) -> String {
        format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/voices/list",
            self.region
        )
    }

    fn synthesis_url(&self) -> String {
        format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            self.region
        )
    }
}

#[async_trait]
impl NeuralSpeechBackend for AzureNeuralTts {
    async fn voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        if let Some(cached) = self.catalog.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let key = self.key()?;
        let response = self
            .client
            .get(self.voices_url())
            .header("Ocp-Apim-Subscription-Key", key)
            .send()
            .await
            .map_err(|e| SpeechError::CatalogUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SpeechError::CatalogUnavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let voices: Vec<VoiceInfo> = response
            .json()
            .await
            .map_err(|e| SpeechError::CatalogUnavailable(e.to_string()))?;

        tracing::info!(count = voices.len(), "Fetched neural voice catalog");
        *self.catalog.write().await = Some(voices.clone());
        Ok(voices)
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<(), SpeechError> {
        let key = self.key()?;
        let ssml = build_ssml(request);

        let response = self
            .client
            .post(self.synthesis_url())
            .header("Ocp-Apim-Subscription-Key", key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .header("User-Agent", USER_AGENT)
            .body(ssml)
            .send()
            .await
            .map_err(|e| SpeechError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::ApiRequestFailed(e.to_string()))?;

        if audio.is_empty() {
            return Err(SpeechError::ApiRequestFailed(
                "empty audio payload".to_string(),
            ));
        }
        if !looks_like_mp3(&audio) {
            tracing::warn!(
                voice = %request.voice,
                bytes = audio.len(),
                "Synthesis reply does not look like MP3"
            );
        }

        if let Some(parent) = request.out_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&request.out_path, &audio).await?;

        tracing::debug!(
            voice = %request.voice,
            bytes = audio.len(),
            out = %request.out_path.display(),
            "Neural synthesis completed"
        );

        Ok(())
    }
}

fn build_ssml(request: &SynthesisRequest) -> String {
    let text = escape_xml(&request.text);
    let body = if request.rate_pct == 0 && request.pitch_pct == 0 {
        text
    } else {
        format!(
            "<prosody rate=\"{:+}%\" pitch=\"{:+}%\">{}</prosody>",
            request.rate_pct, request.pitch_pct, text
        )
    };
    format!(
        "<speak version=\"1.0\" xmlns=\"http://www.w3.org/2001/10/synthesis\" xml:lang=\"{}\">\
         <voice name=\"{}\">{}</voice></speak>",
        request.locale, request.voice, body
    )
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// MP3 starts with an ID3 tag or a frame sync; anything else is probably an
/// error body the service returned with status 200.
fn looks_like_mp3(bytes: &[u8]) -> bool {
    if bytes.len() < 3 {
        return false;
    }
    bytes.starts_with(b"ID3") || (bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0)
}
