use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{BasicSpeechBackend, SpeechError};

const ENDPOINT: &str = "https://translate.google.com/translate_tts";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
const MAX_PIECE_CHARS: usize = 180;
const PIECE_DELAY: Duration = Duration::from_millis(150);

/// Keyless Google TTS endpoint, used when the neural backend fails or has no
/// voice for the requested language. Long text is fetched in pieces split on
/// whitespace and the MP3 frames are concatenated.
pub struct GoogleBasicTts {
    client: Client,
}

impl GoogleBasicTts {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn fetch_piece(&self, text: &str, lang_code: &str) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .get(ENDPOINT)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang_code),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| SpeechError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SpeechError::ApiRequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::ApiRequestFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl Default for GoogleBasicTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasicSpeechBackend for GoogleBasicTts {
    async fn synthesize(
        &self,
        text: &str,
        lang_code: &str,
        out_path: &Path,
    ) -> Result<(), SpeechError> {
        let pieces = split_into_pieces(text, MAX_PIECE_CHARS);
        if pieces.is_empty() {
            return Err(SpeechError::ApiRequestFailed(
                "nothing to synthesize".to_string(),
            ));
        }

        let mut audio: Vec<u8> = Vec::new();
        for (i, piece) in pieces.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(PIECE_DELAY).await;
            }
            audio.extend(self.fetch_piece(piece, lang_code).await?);
        }

        if let Some(parent) = out_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(out_path, &audio).await?;

        tracing::debug!(
            lang = lang_code,
            pieces = pieces.len(),
            bytes = audio.len(),
            out = %out_path.display(),
            "Basic synthesis completed"
        );

        Ok(())
    }
}

/// Splits on whitespace so no piece exceeds `max_chars` characters. A single
/// word longer than the limit is split mid-word.
fn split_into_pieces(text: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if word_chars > max_chars {
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for slab in chars.chunks(max_chars) {
                pieces.push(slab.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_chars
        } else {
            current_chars + 1 + word_chars
        };
        if needed > max_chars && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
