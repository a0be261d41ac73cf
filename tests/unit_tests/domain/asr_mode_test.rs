use std::str::FromStr;

use malacca::domain::{AsrMode, ComputeType, WhisperModel};

#[test]
fn given_fast_mode_when_resolving_profile_then_tiny_int8_without_vad() {
    let profile = AsrMode::Fast.profile();
    assert_eq!(profile.model, WhisperModel::Tiny);
    assert_eq!(profile.compute, ComputeType::Int8);
    assert!(!profile.vad);
}

#[test]
fn given_balanced_mode_when_resolving_profile_then_small_float16_with_vad() {
    let profile = AsrMode::Balanced.profile();
    assert_eq!(profile.model, WhisperModel::Small);
    assert_eq!(profile.compute, ComputeType::Float16);
    assert!(profile.vad);
}

#[test]
fn given_max_accuracy_mode_when_resolving_profile_then_large_float32() {
    let profile = AsrMode::MaxAccuracy.profile();
    assert_eq!(profile.model, WhisperModel::Large);
    assert_eq!(profile.compute, ComputeType::Float32);
    assert!(profile.vad);
}

#[test]
fn given_noisy_audio_mode_when_resolving_profile_then_medium_with_vad() {
    let profile = AsrMode::NoisyAudio.profile();
    assert_eq!(profile.model, WhisperModel::Medium);
    assert!(profile.vad);
}

#[test]
fn given_every_mode_when_round_tripping_through_strings_then_same_mode_returns() {
    let modes = [
        AsrMode::Fast,
        AsrMode::Balanced,
        AsrMode::Quality,
        AsrMode::HighAccuracy,
        AsrMode::MaxAccuracy,
        AsrMode::LowMemory,
        AsrMode::GpuOptimized,
        AsrMode::NoisyAudio,
    ];
    for mode in modes {
        let parsed = AsrMode::from_str(mode.as_str()).unwrap();
        assert_eq!(parsed, mode);
    }
}

#[test]
fn given_unknown_string_when_parsing_mode_then_error_is_returned() {
    assert!(AsrMode::from_str("turbo").is_err());
    assert!(AsrMode::from_str("").is_err());
}

#[test]
fn given_no_mode_when_defaulting_then_balanced_is_used() {
    assert_eq!(AsrMode::default(), AsrMode::Balanced);
}

#[test]
fn given_whisper_models_when_asking_repo_then_openai_repos_are_named() {
    assert_eq!(WhisperModel::Tiny.repo_id(), "openai/whisper-tiny");
    assert_eq!(WhisperModel::Large.repo_id(), "openai/whisper-large-v2");
}

#[test]
fn given_tiny_model_when_asking_quantized_suffix_then_present_only_for_tiny() {
    assert_eq!(WhisperModel::Tiny.quantized_suffix(), Some("tiny"));
    assert_eq!(WhisperModel::Small.quantized_suffix(), None);
}
