use std::fmt;
use std::str::FromStr;

/// Caller-facing transcription quality mode. Each mode maps to a fixed
/// Whisper model size, weight precision and VAD setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsrMode {
    Fast,
    Balanced,
    Quality,
    HighAccuracy,
    MaxAccuracy,
    LowMemory,
    GpuOptimized,
    NoisyAudio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputeType {
    Int8,
    Float16,
    Float32,
}

/// Resolved transcription configuration for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsrProfile {
    pub model: WhisperModel,
    pub compute: ComputeType,
    pub vad: bool,
}

impl AsrMode {
    pub fn profile(&self) -> AsrProfile {
        use ComputeType::*;
        use WhisperModel::*;
        let (model, compute, vad) = match self {
            AsrMode::Fast => (Tiny, Int8, false),
            AsrMode::Balanced => (Small, Float16, true),
            AsrMode::Quality => (Base, Float32, true),
            AsrMode::HighAccuracy => (Medium, Float16, true),
            AsrMode::MaxAccuracy => (Large, Float32, true),
            AsrMode::LowMemory => (Tiny, Int8, true),
            AsrMode::GpuOptimized => (Small, Float16, false),
            AsrMode::NoisyAudio => (Medium, Float32, true),
        };
        AsrProfile { model, compute, vad }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AsrMode::Fast => "fast",
            AsrMode::Balanced => "balanced",
            AsrMode::Quality => "quality",
            AsrMode::HighAccuracy => "high_accuracy",
            AsrMode::MaxAccuracy => "max_accuracy",
            AsrMode::LowMemory => "low_memory",
            AsrMode::GpuOptimized => "gpu_optimized",
            AsrMode::NoisyAudio => "noisy_audio",
        }
    }
}

impl Default for AsrMode {
    fn default() -> Self {
        AsrMode::Balanced
    }
}

impl FromStr for AsrMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(AsrMode::Fast),
            "balanced" => Ok(AsrMode::Balanced),
            "quality" => Ok(AsrMode::Quality),
            "high_accuracy" => Ok(AsrMode::HighAccuracy),
            "max_accuracy" => Ok(AsrMode::MaxAccuracy),
            "low_memory" => Ok(AsrMode::LowMemory),
            "gpu_optimized" => Ok(AsrMode::GpuOptimized),
            "noisy_audio" => Ok(AsrMode::NoisyAudio),
            other => Err(format!("Invalid ASR mode: {}", other)),
        }
    }
}

impl fmt::Display for AsrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WhisperModel {
    /// Hugging Face repository holding the safetensors weights.
    pub fn repo_id(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "openai/whisper-tiny",
            WhisperModel::Base => "openai/whisper-base",
            WhisperModel::Small => "openai/whisper-small",
            WhisperModel::Medium => "openai/whisper-medium",
            WhisperModel::Large => "openai/whisper-large-v2",
        }
    }

    /// File suffix inside the community quantized-weights repository, for the
    /// sizes that have published q8_0 weights.
    pub fn quantized_suffix(&self) -> Option<&'static str> {
        match self {
            WhisperModel::Tiny => Some("tiny"),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }
}

impl ComputeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputeType::Int8 => "int8",
            ComputeType::Float16 => "float16",
            ComputeType::Float32 => "float32",
        }
    }
}
