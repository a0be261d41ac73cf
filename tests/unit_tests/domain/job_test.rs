use std::path::PathBuf;
use std::str::FromStr;

use malacca::domain::{AsrMode, JobId, JobRequest, JobStatus, LanguageTag, TranslationModel};

#[test]
fn given_valid_id_when_creating_job_id_then_trimmed_value_is_kept() {
    let id = JobId::new("  job-42_a  ").unwrap();
    assert_eq!(id.as_str(), "job-42_a");
}

#[test]
fn given_empty_or_unsafe_id_when_creating_job_id_then_error_is_returned() {
    assert!(JobId::new("").is_err());
    assert!(JobId::new("   ").is_err());
    assert!(JobId::new("job/42").is_err());
    assert!(JobId::new("job 42").is_err());
}

#[test]
fn given_two_generated_ids_when_comparing_then_they_differ() {
    assert_ne!(JobId::generate(), JobId::generate());
}

#[test]
fn given_every_status_when_round_tripping_through_strings_then_same_status_returns() {
    let statuses = [
        JobStatus::Init,
        JobStatus::Chunked,
        JobStatus::FannedOut,
        JobStatus::Assembled,
        JobStatus::Muxed,
        JobStatus::Published,
        JobStatus::ManifestWritten,
        JobStatus::Failed,
    ];
    for status in statuses {
        let parsed = JobStatus::from_str(status.as_str()).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn given_unknown_string_when_parsing_status_then_error_is_returned() {
    assert!(JobStatus::from_str("RUNNING").is_err());
}

#[test]
fn given_new_request_when_built_then_defaults_apply() {
    let request = JobRequest::new(
        JobId::new("job-1").unwrap(),
        PathBuf::from("input.mp4"),
        LanguageTag::new("en"),
        LanguageTag::new("hi"),
        "course-9".to_string(),
    );

    assert_eq!(request.mode, AsrMode::Balanced);
    assert!(request.translation_model.is_none());
}

#[test]
fn given_builders_when_applied_then_request_carries_overrides() {
    let request = JobRequest::new(
        JobId::new("job-1").unwrap(),
        PathBuf::from("input.mp4"),
        LanguageTag::new("en"),
        LanguageTag::new("hi"),
        String::new(),
    )
    .with_mode(AsrMode::Fast)
    .with_translation_model(TranslationModel::Gemini);

    assert_eq!(request.mode, AsrMode::Fast);
    assert_eq!(request.translation_model, Some(TranslationModel::Gemini));
}
