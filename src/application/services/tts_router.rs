use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::ports::{
    BasicSpeechBackend, MediaToolkit, NeuralSpeechBackend, PronunciationOverrides, SpeechError,
    SynthesisRequest, VoiceInfo,
};
use crate::domain::{LanguageTag, VoiceGender};

/// Last-resort voice assignments used when the catalog cannot be fetched.
const DEFAULT_VOICES: &[(&str, &str)] = &[
    ("as", "as-IN-YashicaNeural"),
    ("bn", "bn-IN-TanishaaNeural"),
    ("en", "en-IN-NeerjaNeural"),
    ("gu", "gu-IN-DhwaniNeural"),
    ("hi", "hi-IN-SwaraNeural"),
    ("kn", "kn-IN-SapnaNeural"),
    ("ml", "ml-IN-SobhanaNeural"),
    ("mr", "mr-IN-AarohiNeural"),
    ("ne", "ne-NP-HemkalaNeural"),
    ("or", "or-IN-SubhasiniNeural"),
    ("pa", "pa-IN-VaaniNeural"),
    ("ta", "ta-IN-PallaviNeural"),
    ("te", "te-IN-ShrutiNeural"),
    ("ur", "ur-IN-GulNeural"),
];

/// Synthesizes chunk audio through the neural backend with a per-language
/// voice choice, degrading to the basic backend when the neural side fails.
/// Pronunciation overrides are applied to the spoken text only; manifest text
/// is never touched here.
pub struct TtsRouter {
    neural: Arc<dyn NeuralSpeechBackend>,
    basic: Arc<dyn BasicSpeechBackend>,
    media: Arc<dyn MediaToolkit>,
    voice_map: BTreeMap<String, String>,
    overrides: PronunciationOverrides,
    preferred_gender: VoiceGender,
    voice_cache: RwLock<HashMap<String, String>>,
}

impl TtsRouter {
    pub fn new(
        neural: Arc<dyn NeuralSpeechBackend>,
        basic: Arc<dyn BasicSpeechBackend>,
        media: Arc<dyn MediaToolkit>,
        voice_map: BTreeMap<String, String>,
        overrides: PronunciationOverrides,
        preferred_gender: VoiceGender,
    ) -> Self {
        Self {
            neural,
            basic,
            media,
            voice_map,
            overrides,
            preferred_gender,
            voice_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Renders `text` as speech into `out_path`. Empty text becomes silence of
    /// `duration_hint` seconds so the assembler still gets one file per chunk.
    pub async fn synthesize(
        &self,
        text: &str,
        target: &LanguageTag,
        duration_hint: f64,
        out_path: &Path,
    ) -> Result<PathBuf, SpeechError> {
        let base = target.base();
        let speak_text = self.apply_overrides(text, base);

        if speak_text.trim().is_empty() {
            tracing::debug!(target = %target, "Empty speak text, writing silence");
            self.media
                .synthesize_silence(duration_hint.max(0.1), out_path)
                .await
                .map_err(|e| SpeechError::Io(std::io::Error::other(e.to_string())))?;
            return Ok(out_path.to_path_buf());
        }

        if let Some((voice, locale)) = self.select_voice(target).await {
            let (rate_pct, pitch_pct) = prosody_for(base);
            let request = SynthesisRequest {
                text: speak_text.clone(),
                voice: voice.clone(),
                locale,
                rate_pct,
                pitch_pct,
                out_path: out_path.to_path_buf(),
            };
            match self.neural.synthesize(&request).await {
                Ok(()) => return Ok(out_path.to_path_buf()),
                Err(e) => {
                    tracing::warn!(
                        voice,
                        error = %e,
                        "Neural synthesis failed, falling back to basic TTS"
                    );
                }
            }
        } else {
            tracing::warn!(target = %target, "No neural voice available, using basic TTS");
        }

        self.basic
            .synthesize(&speak_text, target.basic_tts_code(), out_path)
            .await?;
        Ok(out_path.to_path_buf())
    }

    /// Voice resolution order: explicit voice map, process-local cache,
    /// catalog query, fixed defaults.
    async fn select_voice(&self, target: &LanguageTag) -> Option<(String, String)> {
        let base = target.base();
        if let Some(voice) = self.voice_map.get(base) {
            return Some((voice.clone(), locale_of(voice, base)));
        }
        if let Some(voice) = self.voice_cache.read().await.get(base) {
            return Some((voice.clone(), locale_of(voice, base)));
        }

        match self.neural.voices().await {
            Ok(catalog) => {
                if let Some(choice) = pick_from_catalog(&catalog, base, self.preferred_gender) {
                    self.voice_cache
                        .write()
                        .await
                        .insert(base.to_string(), choice.short_name.clone());
                    return Some((choice.short_name.clone(), choice.locale.clone()));
                }
                tracing::debug!(base, "No catalog voice for language");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Voice catalog unavailable, using defaults");
            }
        }

        DEFAULT_VOICES
            .iter()
            .find(|(code, _)| *code == base)
            .map(|(_, voice)| (voice.to_string(), locale_of(voice, base)))
    }

    fn apply_overrides(&self, text: &str, base: &str) -> String {
        let Some(rules) = self.overrides.get(base) else {
            return text.to_string();
        };
        let mut out = text.to_string();
        for (pattern, replacement) in rules {
            let source = match pattern.strip_prefix("re:") {
                Some(raw) => raw.to_string(),
                None => format!(r"(?i)\b{}\b", regex::escape(pattern)),
            };
            match regex::Regex::new(&source) {
                Ok(re) => out = re.replace_all(&out, regex::NoExpand(replacement)).into_owned(),
                Err(e) => {
                    tracing::warn!(pattern, error = %e, "Bad pronunciation override, skipping");
                }
            }
        }
        out
    }
}

/// Bhojpuri voices are borrowed Hindi voices; slowing them down slightly
/// reads more naturally.
fn prosody_for(base: &str) -> (i32, i32) {
    if base == "bho" { (-10, -4) } else { (0, 0) }
}

fn pick_from_catalog<'a>(
    catalog: &'a [VoiceInfo],
    base: &str,
    gender: VoiceGender,
) -> Option<&'a VoiceInfo> {
    let matches: Vec<&VoiceInfo> = catalog
        .iter()
        .filter(|voice| {
            voice
                .locale
                .split('-')
                .next()
                .is_some_and(|code| code.eq_ignore_ascii_case(base))
        })
        .collect();

    matches
        .iter()
        .find(|voice| {
            voice.short_name.to_lowercase().contains("neural") && gender.accepts(&voice.gender)
        })
        .or_else(|| matches.iter().find(|voice| gender.accepts(&voice.gender)))
        .or_else(|| matches.first())
        .copied()
}

/// Azure short names embed the locale: `hi-IN-SwaraNeural` speaks `hi-IN`.
fn locale_of(voice: &str, base: &str) -> String {
    let parts: Vec<&str> = voice.split('-').collect();
    if parts.len() >= 3 {
        format!("{}-{}", parts[0], parts[1])
    } else {
        format!("{}-IN", base)
    }
}
