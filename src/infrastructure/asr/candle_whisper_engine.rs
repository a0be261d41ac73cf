use std::path::{Path, PathBuf};

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::{Api, ApiBuilder};
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{AsrProfile, ComputeType, Transcript, TranscriptSegment};

use super::audio_decoder::{decode_to_pcm, TARGET_SAMPLE_RATE};
use super::energy_vad::EnergyVad;

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";
const QUANTIZED_REPO: &str = "lmz/candle-whisper";
const MAX_NEW_TOKENS: usize = 224;
const TIMESTAMP_STEP_SECS: f64 = 0.02;

/// Local Whisper inference on the CPU via candle. Weights are fetched from
/// the hub and loaded on the first transcription request, so constructing
/// the engine is cheap and flows that never transcribe never download.
pub struct CandleWhisperEngine {
    profile: AsrProfile,
    model_dir: Option<PathBuf>,
    vad: Option<EnergyVad>,
    state: Mutex<Option<LoadedWhisper>>,
}

enum WhisperArch {
    Normal(m::model::Whisper),
    Quantized(m::quantized_model::Whisper),
}

struct LoadedWhisper {
    arch: WhisperArch,
    tokenizer: Tokenizer,
    config: Config,
    mel_filters: Vec<f32>,
    device: Device,
    dtype: DType,
}

struct SpecialTokens {
    sot: u32,
    sot_prev: Option<u32>,
    transcribe: u32,
    eot: u32,
    timestamp_begin: u32,
    language: Option<u32>,
}

impl CandleWhisperEngine {
    pub fn new(profile: AsrProfile, model_dir: Option<PathBuf>) -> Self {
        let vad = profile.vad.then(EnergyVad::new);
        Self {
            profile,
            model_dir,
            vad,
            state: Mutex::new(None),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
        initial_prompt: &str,
    ) -> Result<Transcript, TranscriptionError> {
        let pcm = decode_to_pcm(audio_path)?;

        let (pcm, lead_secs) = match &self.vad {
            Some(vad) => vad.trim_edges(&pcm, TARGET_SAMPLE_RATE),
            None => (pcm.as_slice(), 0.0),
        };

        if pcm.is_empty() {
            tracing::debug!(path = %audio_path.display(), "No voiced audio, skipping inference");
            return Ok(Transcript::default());
        }

        let mut guard = self.state.lock().await;
        if guard.is_none() {
            *guard = Some(LoadedWhisper::load(
                &self.profile,
                self.model_dir.as_deref(),
            )?);
        }
        let loaded = match guard.as_mut() {
            Some(loaded) => loaded,
            None => {
                return Err(TranscriptionError::ModelLoadFailed(
                    "engine state unexpectedly empty".to_string(),
                ));
            }
        };

        let specials = loaded.special_tokens(language)?;

        let mut segments: Vec<TranscriptSegment> = Vec::new();
        let mut prompt = initial_prompt.trim().to_string();

        for (window_idx, window) in pcm.chunks(m::N_SAMPLES).enumerate() {
            let window_secs = window.len() as f64 / TARGET_SAMPLE_RATE as f64;
            let offset = window_idx as f64 * (m::N_SAMPLES as f64 / TARGET_SAMPLE_RATE as f64)
                + lead_secs;

            let samples = if window.len() < m::N_SAMPLES {
                let mut padded = window.to_vec();
                padded.resize(m::N_SAMPLES, 0.0);
                padded
            } else {
                window.to_vec()
            };

            tracing::debug!(window = window_idx, offset, "Transcribing audio window");

            let window_segments =
                loaded.decode_window(&samples, &specials, &prompt, offset, window_secs)?;

            prompt = window_segments
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            segments.extend(window_segments);
        }

        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        tracing::info!(
            path = %audio_path.display(),
            segments = segments.len(),
            chars = text.len(),
            "Transcription completed"
        );

        Ok(Transcript::new(text, segments))
    }
}

impl LoadedWhisper {
    fn load(profile: &AsrProfile, model_dir: Option<&Path>) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(
            model = profile.model.as_str(),
            compute = profile.compute.as_str(),
            "Loading Whisper model"
        );

        let api = match model_dir {
            Some(dir) => ApiBuilder::new()
                .with_cache_dir(dir.to_path_buf())
                .build()
                .map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?,
            None => Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?,
        };

        let quantized = profile.compute == ComputeType::Int8;
        let quantized_suffix = profile.model.quantized_suffix();
        if quantized && quantized_suffix.is_none() {
            tracing::warn!(
                model = profile.model.as_str(),
                "No int8 build for this model size, loading f32 weights instead"
            );
        }

        let (config_path, tokenizer_path, weights_path) = match (quantized, quantized_suffix) {
            (true, Some(suffix)) => {
                let repo = api.repo(Repo::new(QUANTIZED_REPO.to_string(), RepoType::Model));
                (
                    fetch(&repo, &format!("config-{suffix}.json"))?,
                    fetch(&repo, &format!("tokenizer-{suffix}.json"))?,
                    fetch(&repo, &format!("model-{suffix}-q80.gguf"))?,
                )
            }
            _ => {
                let repo = api.repo(Repo::new(
                    profile.model.repo_id().to_string(),
                    RepoType::Model,
                ));
                (
                    fetch(&repo, "config.json")?,
                    fetch(&repo, "tokenizer.json")?,
                    fetch(&repo, "model.safetensors")?,
                )
            }
        };

        let mel_repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
        let mel_bytes_path = fetch(&mel_repo, "melfilters.bytes")?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        let (arch, dtype) = if quantized && quantized_suffix.is_some() {
            let vb = candle_transformers::quantized_var_builder::VarBuilder::from_gguf(
                &weights_path,
                &device,
            )
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("gguf: {}", e)))?;
            let model = m::quantized_model::Whisper::load(&vb, config.clone())
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;
            (WhisperArch::Quantized(model), DType::F32)
        } else {
            let dtype = match profile.compute {
                ComputeType::Float16 => DType::F16,
                _ => DType::F32,
            };
            // SAFETY: safetensors files are memory-mapped read-only
            let vb = unsafe {
                VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                    .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
            };
            let model = m::model::Whisper::load(&vb, config.clone())
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;
            (WhisperArch::Normal(model), dtype)
        };

        tracing::info!("Whisper model loaded");

        Ok(Self {
            arch,
            tokenizer,
            config,
            mel_filters,
            device,
            dtype,
        })
    }

    fn special_tokens(&self, language: &str) -> Result<SpecialTokens, TranscriptionError> {
        let sot = token_id(&self.tokenizer, m::SOT_TOKEN)?;
        let transcribe = token_id(&self.tokenizer, m::TRANSCRIBE_TOKEN)?;
        let eot = token_id(&self.tokenizer, m::EOT_TOKEN)?;
        let no_timestamps = token_id(&self.tokenizer, m::NO_TIMESTAMPS_TOKEN)?;

        let language_token = self.tokenizer.token_to_id(&format!("<|{language}|>"));
        if language_token.is_none() {
            tracing::warn!(language, "Unknown language token, letting the model detect it");
        }

        Ok(SpecialTokens {
            sot,
            sot_prev: self.tokenizer.token_to_id("<|startofprev|>"),
            transcribe,
            eot,
            timestamp_begin: no_timestamps + 1,
            language: language_token,
        })
    }

    /// Greedy decode of one 30 second mel window in timestamp mode, shifted
    /// by `offset` seconds onto the chunk timeline.
    fn decode_window(
        &mut self,
        samples: &[f32],
        specials: &SpecialTokens,
        prompt: &str,
        offset: f64,
        window_secs: f64,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        let mel_data = m::audio::pcm_to_mel(&self.config, samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel_data.len() / n_mel;
        let mel = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
            .map_err(|e| infer_err("mel tensor", e))?
            .to_dtype(self.dtype)
            .map_err(|e| infer_err("mel dtype", e))?;

        let audio_features = self
            .arch
            .encoder_forward(&mel, true)
            .map_err(|e| infer_err("encoder", e))?;

        let mut tokens = self.build_prefix(specials, prompt)?;
        let prefix_len = tokens.len();

        for step in 0..MAX_NEW_TOKENS {
            let token_tensor = Tensor::new(tokens.as_slice(), &self.device)
                .map_err(|e| infer_err("token tensor", e))?
                .unsqueeze(0)
                .map_err(|e| infer_err("token tensor", e))?;

            let decoder_output = self
                .arch
                .decoder_forward(&token_tensor, &audio_features, step == 0)
                .map_err(|e| infer_err("decoder", e))?;

            let hidden = decoder_output
                .squeeze(0)
                .map_err(|e| infer_err("squeeze", e))?;
            let logits = self
                .arch
                .decoder_final_linear(&hidden)
                .map_err(|e| infer_err("linear", e))?;

            let seq_len = logits.dim(0).map_err(|e| infer_err("logits dim", e))?;
            let next_token = logits
                .get(seq_len - 1)
                .map_err(|e| infer_err("logits", e))?
                .argmax(0)
                .map_err(|e| infer_err("argmax", e))?
                .to_scalar::<u32>()
                .map_err(|e| infer_err("scalar", e))?;

            if next_token == specials.eot {
                break;
            }
            tokens.push(next_token);
        }

        self.arch.reset_kv_cache();

        self.collect_segments(&tokens[prefix_len..], specials, offset, window_secs)
    }

    fn build_prefix(
        &self,
        specials: &SpecialTokens,
        prompt: &str,
    ) -> Result<Vec<u32>, TranscriptionError> {
        let mut prefix = Vec::new();

        if !prompt.is_empty() {
            if let Some(sot_prev) = specials.sot_prev {
                let encoding = self
                    .tokenizer
                    .encode(prompt, false)
                    .map_err(|e| infer_err("prompt encode", e))?;
                let ids = encoding.get_ids();
                let budget = (self.config.max_target_positions / 2).saturating_sub(1);
                let tail_start = ids.len().saturating_sub(budget);
                prefix.push(sot_prev);
                prefix.extend_from_slice(&ids[tail_start..]);
            }
        }

        prefix.push(specials.sot);
        if let Some(language) = specials.language {
            prefix.push(language);
        }
        prefix.push(specials.transcribe);

        Ok(prefix)
    }

    /// Walks the decoded tokens splitting on timestamp tokens. Text between
    /// two timestamps becomes one segment; a trailing open segment closes at
    /// the window boundary.
    fn collect_segments(
        &self,
        decoded: &[u32],
        specials: &SpecialTokens,
        offset: f64,
        window_secs: f64,
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        let mut segments = Vec::new();
        let mut current_start: f64 = 0.0;
        let mut current_tokens: Vec<u32> = Vec::new();

        let mut push_segment = |start: f64,
                                end: f64,
                                token_ids: &[u32]|
         -> Result<(), TranscriptionError> {
            if token_ids.is_empty() {
                return Ok(());
            }
            let text = self
                .tokenizer
                .decode(token_ids, true)
                .map_err(|e| infer_err("token decode", e))?
                .trim()
                .to_string();
            if text.is_empty() {
                return Ok(());
            }
            segments.push(TranscriptSegment {
                start: offset + start,
                end: offset + end.max(start),
                text,
            });
            Ok(())
        };

        for &token in decoded {
            if token >= specials.timestamp_begin {
                let ts = (token - specials.timestamp_begin) as f64 * TIMESTAMP_STEP_SECS;
                if current_tokens.is_empty() {
                    current_start = ts;
                } else {
                    push_segment(current_start, ts, &current_tokens)?;
                    current_tokens.clear();
                    current_start = ts;
                }
            } else if token < specials.eot {
                current_tokens.push(token);
            }
        }

        if !current_tokens.is_empty() {
            push_segment(current_start, window_secs, &current_tokens)?;
        }

        Ok(segments)
    }
}

impl WhisperArch {
    fn encoder_forward(&mut self, mel: &Tensor, flush: bool) -> candle_core::Result<Tensor> {
        match self {
            Self::Normal(model) => model.encoder.forward(mel, flush),
            Self::Quantized(model) => model.encoder.forward(mel, flush),
        }
    }

    fn decoder_forward(
        &mut self,
        tokens: &Tensor,
        audio_features: &Tensor,
        flush: bool,
    ) -> candle_core::Result<Tensor> {
        match self {
            Self::Normal(model) => model.decoder.forward(tokens, audio_features, flush),
            Self::Quantized(model) => model.decoder.forward(tokens, audio_features, flush),
        }
    }

    fn decoder_final_linear(&self, hidden: &Tensor) -> candle_core::Result<Tensor> {
        match self {
            Self::Normal(model) => model.decoder.final_linear(hidden),
            Self::Quantized(model) => model.decoder.final_linear(hidden),
        }
    }

    fn reset_kv_cache(&mut self) {
        match self {
            Self::Normal(model) => model.reset_kv_cache(),
            Self::Quantized(model) => model.reset_kv_cache(),
        }
    }
}

fn fetch(repo: &hf_hub::api::sync::ApiRepo, file: &str) -> Result<PathBuf, TranscriptionError> {
    repo.get(file)
        .map_err(|e| TranscriptionError::ModelLoadFailed(format!("{}: {}", file, e)))
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn infer_err(stage: &str, e: impl std::fmt::Display) -> TranscriptionError {
    TranscriptionError::TranscriptionFailed(format!("{stage}: {e}"))
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
