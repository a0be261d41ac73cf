use std::path::PathBuf;

use malacca::application::ports::MediaToolkit;
use malacca::application::services::OrchestratorError;
use malacca::domain::{ArtifactKind, JobId, JobRequest, LanguageTag, Manifest};
use malacca::infrastructure::asr::MockTranscriptionEngine;
use malacca::infrastructure::media::MockMediaToolkit;
use malacca::infrastructure::publish::MockPublisher;
use malacca::infrastructure::translation::MockTranslationBackend;

use crate::helpers::{job_request, TestPipeline};

#[tokio::test]
async fn given_65s_video_when_running_job_then_manifest_covers_three_chunks() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder().media(media).build();
    let request = job_request("job-65s", &input, "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert_eq!(manifest.chunk_count, 3);
    assert_eq!(manifest.chunks.len(), 3);
    let starts: Vec<f64> = manifest.chunks.iter().map(|c| c.start).collect();
    assert_eq!(starts, vec![0.0, 30.0, 60.0]);
    assert_eq!(manifest.chunks[2].end, 65.0);
    for chunk in &manifest.chunks {
        assert_eq!(chunk.text_original, "hello from the lecture");
        assert_eq!(chunk.text_translated, "[google:hi] hello from the lecture");
        assert!(chunk.audio_path.exists());
        assert!(chunk.srt_path.exists());
    }
    assert_eq!(pipeline.asr.call_count().await, 3);
}

#[tokio::test]
async fn given_completed_job_when_inspecting_outputs_then_audio_matches_source_length() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder().media(media).build();
    let request = job_request("job-av", &input, "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    let final_audio = manifest.final_audio.clone().unwrap();
    assert!(final_audio.exists());
    let final_duration = pipeline.media.probe_duration(&final_audio).await.unwrap();
    assert!(
        (final_duration - 65.0).abs() <= 0.05,
        "dubbed audio is {final_duration}s for a 65s source"
    );

    let final_video = manifest.final_video.clone().unwrap();
    assert!(final_video.exists());

    let captions = pipeline.job_dir("job-av").join("captions.vtt");
    let vtt = std::fs::read_to_string(&captions).unwrap();
    assert!(vtt.starts_with("WEBVTT\n\n"));
    assert!(vtt.contains("00:01:00.000 --> 00:01:05.000"));
}

#[tokio::test]
async fn given_completed_job_when_publishing_then_video_and_subtitle_urls_land_in_manifest() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder().media(media).build();
    let request = job_request("job-pub", &input, "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert_eq!(
        manifest.cloudinary_url.as_deref(),
        Some("mock://job-pub/hi/video/final_video.mp4")
    );
    assert_eq!(
        manifest.subtitle_url.as_deref(),
        Some("mock://job-pub/hi/subtitle/captions.vtt")
    );
    let published = pipeline.publisher.published().await;
    assert_eq!(
        published,
        vec![
            (ArtifactKind::Video, "final_video.mp4".to_string()),
            (ArtifactKind::Subtitle, "captions.vtt".to_string()),
        ]
    );
}

#[tokio::test]
async fn given_completed_job_when_reading_disk_then_manifest_is_final_and_tmp_free() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder().media(media).build();
    let request = job_request("job-disk", &input, "en", "hi");

    pipeline.orchestrator.run_job(&request).await.unwrap();

    let manifest_path = pipeline
        .orchestrator
        .manifest_path(&JobId::new("job-disk").unwrap());
    let on_disk: Manifest =
        serde_json::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(on_disk.job_id, "job-disk");
    assert_eq!(on_disk.chunk_count, 3);
    assert_eq!(on_disk.mode, "balanced");
    assert_eq!(on_disk.source_lang, "en");
    assert_eq!(on_disk.target_lang, "hi");
    assert!(!pipeline.job_dir("job-disk").join("manifest.json.tmp").exists());
}

#[tokio::test]
async fn given_relative_input_when_running_job_then_manifest_records_absolute_paths() {
    let pipeline = TestPipeline::builder().build();
    let request = job_request("job-relpath", &PathBuf::from("talk.mp4"), "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert!(manifest.input_path.is_absolute());
    assert!(manifest.final_audio.as_ref().unwrap().is_absolute());
    assert!(manifest.final_video.as_ref().unwrap().is_absolute());
    for chunk in &manifest.chunks {
        assert!(chunk.audio_path.is_absolute());
        assert!(chunk.srt_path.is_absolute());
    }

    let manifest_path = pipeline
        .orchestrator
        .manifest_path(&JobId::new("job-relpath").unwrap());
    let on_disk: Manifest =
        serde_json::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(on_disk.input_path, std::path::absolute("talk.mp4").unwrap());
}

#[tokio::test]
async fn given_translation_outage_when_running_job_then_placeholders_keep_job_alive() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder()
        .media(media)
        .google(MockTranslationBackend::failing("quota"))
        .gemini(MockTranslationBackend::failing("quota"))
        .build();
    let request = job_request("job-outage", &input, "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert_eq!(manifest.chunk_count, 3);
    for chunk in &manifest.chunks {
        assert_eq!(
            chunk.text_translated,
            "[hi - request failed] hello from the lecture"
        );
    }
    assert_eq!(pipeline.google.call_count().await, 3);
    assert_eq!(pipeline.gemini.call_count().await, 3);
}

#[tokio::test]
async fn given_one_failing_chunk_when_running_job_then_it_is_dropped_not_fatal() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder()
        .media(media)
        .asr(MockTranscriptionEngine::returning("hello").fail_on(1))
        .build();
    let request = job_request("job-drop", &input, "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert_eq!(manifest.chunk_count, 2);
    let mut indices: Vec<u32> = manifest.chunks.iter().map(|c| c.index).collect();
    let sorted = indices.clone();
    indices.sort_unstable();
    assert_eq!(indices, sorted, "chunks must stay in timeline order");
    assert!(indices.iter().all(|i| *i <= 2));
}

#[tokio::test]
async fn given_transcription_dead_when_running_job_then_no_chunks_error() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder()
        .media(media)
        .asr(MockTranscriptionEngine::failing("model not loaded"))
        .build();
    let request = job_request("job-dead", &input, "en", "hi");

    let result = pipeline.orchestrator.run_job(&request).await;

    assert!(matches!(result, Err(OrchestratorError::NoChunks)));
    assert!(!pipeline.job_dir("job-dead").join("manifest.json").exists());
}

#[tokio::test]
async fn given_zero_length_input_when_running_job_then_invalid_duration_error() {
    let media = MockMediaToolkit::new().with_default_duration(0.0);
    let pipeline = TestPipeline::builder().media(media).build();
    let request = job_request("job-zero", &PathBuf::from("empty.mp4"), "en", "hi");

    let result = pipeline.orchestrator.run_job(&request).await;

    assert!(matches!(result, Err(OrchestratorError::InvalidDuration(_))));
}

#[tokio::test]
async fn given_audio_only_input_when_running_job_then_no_video_is_produced() {
    let media = MockMediaToolkit::audio_only().with_default_duration(45.0);
    let pipeline = TestPipeline::builder().media(media).build();
    let request = job_request("job-audio", &PathBuf::from("podcast.mp3"), "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert_eq!(manifest.chunk_count, 2);
    assert!(manifest.final_video.is_none());
    assert!(manifest.final_audio.is_some());
    assert_eq!(
        manifest.cloudinary_url.as_deref(),
        Some("mock://job-audio/hi/audio/final_audio.wav")
    );
    let published = pipeline.publisher.published().await;
    assert_eq!(published[0].0, ArtifactKind::Audio);
}

#[tokio::test]
async fn given_publisher_down_when_running_job_then_job_completes_without_urls() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder()
        .media(media)
        .publisher(MockPublisher::failing("network down"))
        .build();
    let request = job_request("job-nopub", &input, "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert!(manifest.cloudinary_url.is_none());
    assert!(manifest.subtitle_url.is_none());
    assert!(pipeline.job_dir("job-nopub").join("manifest.json").exists());
}

#[tokio::test]
async fn given_course_context_when_running_job_then_both_glossaries_apply() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 20.0).await;
    let pipeline = TestPipeline::builder()
        .media(media)
        .asr(MockTranscriptionEngine::returning("the data base is here"))
        .google(MockTranslationBackend::returning("database यहाँ है"))
        .build();
    let courses = pipeline.context_dir.join("courses");
    std::fs::create_dir_all(&courses).unwrap();
    std::fs::write(
        courses.join("rust-101.json"),
        r#"{
            "glossary": {"data base": "database"},
            "target_glossary": {"hi": {"database": "डेटाबेस"}}
        }"#,
    )
    .unwrap();
    let request = JobRequest::new(
        JobId::new("job-course").unwrap(),
        input,
        LanguageTag::new("en"),
        LanguageTag::new("hi"),
        "rust-101".to_string(),
    );

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert_eq!(manifest.chunks[0].text_original, "the database is here");
    assert_eq!(manifest.chunks[0].text_translated, "डेटाबेस यहाँ है");
}

#[tokio::test]
async fn given_bhojpuri_target_when_running_job_then_dialect_and_voice_borrowing_apply() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder()
        .media(media)
        .google(MockTranslationBackend::returning("काम हो रहा है"))
        .build();
    let request = job_request("job-bho", &input, "hi", "bho");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert_eq!(manifest.target_lang, "bho");
    for chunk in &manifest.chunks {
        assert_eq!(chunk.text_translated, "काम होत बा");
    }
    // no neural voice covers Bhojpuri, so every chunk goes through the
    // basic backend with the borrowed Hindi voice
    let basic_requests = pipeline.basic.requests().await;
    assert_eq!(basic_requests.len(), 3);
    assert!(basic_requests.iter().all(|(_, lang)| lang == "hi"));
    assert_eq!(pipeline.neural.call_count().await, 0);
}

#[tokio::test]
async fn given_silent_lecture_when_running_job_then_silence_and_empty_captions() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder()
        .media(media)
        .asr(MockTranscriptionEngine::silent())
        .build();
    let request = job_request("job-silent", &input, "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert_eq!(manifest.chunk_count, 3);
    for chunk in &manifest.chunks {
        assert_eq!(chunk.text_original, "");
        assert_eq!(chunk.text_translated, "");
        assert!(chunk.audio_path.exists());
    }
    let vtt = std::fs::read_to_string(pipeline.job_dir("job-silent").join("captions.vtt")).unwrap();
    assert_eq!(vtt, "WEBVTT\n\n");
    let silence_calls = pipeline
        .media
        .calls()
        .await
        .into_iter()
        .filter(|c| c.starts_with("silence:"))
        .count();
    assert_eq!(silence_calls, 3);
}

#[tokio::test]
async fn given_same_job_id_when_running_twice_then_second_run_replaces_the_first() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder().media(media).build();
    let request = job_request("job-rerun", &input, "en", "hi");

    pipeline.orchestrator.run_job(&request).await.unwrap();
    let second = pipeline.orchestrator.run_job(&request).await.unwrap();

    assert_eq!(second.chunk_count, 3);
    assert_eq!(pipeline.asr.call_count().await, 6);
    let manifest_path = pipeline
        .orchestrator
        .manifest_path(&JobId::new("job-rerun").unwrap());
    let on_disk: Manifest =
        serde_json::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(on_disk.chunk_count, 3);
}

#[tokio::test]
async fn given_finished_job_when_cleaning_up_then_scratch_goes_and_outputs_stay() {
    let media = MockMediaToolkit::new();
    let input = std::path::absolute("lecture.mp4").unwrap();
    media.set_duration(&input, 65.0).await;
    let pipeline = TestPipeline::builder().media(media).build();
    let request = job_request("job-clean", &input, "en", "hi");

    let manifest = pipeline.orchestrator.run_job(&request).await.unwrap();
    let job_dir = pipeline.job_dir("job-clean");
    assert!(job_dir.join("chunks").exists());
    assert!(job_dir.join("tts").exists());

    pipeline.orchestrator.cleanup(&manifest).await;

    assert!(!job_dir.join("chunks").exists());
    assert!(!job_dir.join("tts").exists());
    assert!(job_dir.join("manifest.json").exists());
    assert!(job_dir.join("final_audio.wav").exists());
}
