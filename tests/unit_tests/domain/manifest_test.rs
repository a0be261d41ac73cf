use std::path::PathBuf;

use malacca::domain::{ChunkResult, Manifest};

fn chunk_result(index: u32, start: f64, end: f64) -> ChunkResult {
    ChunkResult {
        index,
        start,
        end,
        text_original: format!("original {index}"),
        text_translated: format!("translated {index}"),
        audio_path: PathBuf::from(format!("tts/chunk_{index:04}.mp3")),
        srt_path: PathBuf::from(format!("tts/chunk_{index:04}.srt")),
    }
}

fn manifest_with_chunks(chunks: Vec<ChunkResult>) -> Manifest {
    Manifest::new(
        "job-7".to_string(),
        "balanced".to_string(),
        "en".to_string(),
        "hi".to_string(),
        "course-1".to_string(),
        PathBuf::from("lecture.mp4"),
        chunks,
    )
}

#[test]
fn given_chunks_when_creating_manifest_then_count_matches() {
    let manifest = manifest_with_chunks(vec![chunk_result(0, 0.0, 30.0), chunk_result(1, 30.0, 60.0)]);
    assert_eq!(manifest.chunk_count, 2);
    assert_eq!(manifest.chunks.len(), 2);
    assert_eq!(manifest.created_at, manifest.updated_at);
}

#[test]
fn given_replacement_chunks_when_setting_then_count_stays_in_lockstep() {
    let mut manifest = manifest_with_chunks(vec![chunk_result(0, 0.0, 30.0)]);
    manifest.set_chunks(vec![
        chunk_result(0, 0.0, 30.0),
        chunk_result(1, 30.0, 60.0),
        chunk_result(2, 60.0, 65.0),
    ]);
    assert_eq!(manifest.chunk_count, 3);
}

#[test]
fn given_touch_when_called_then_updated_at_moves_forward() {
    let mut manifest = manifest_with_chunks(vec![chunk_result(0, 0.0, 30.0)]);
    let created = manifest.created_at;
    manifest.touch();
    assert!(manifest.updated_at >= created);
    assert_eq!(manifest.created_at, created);
}

#[test]
fn given_manifest_without_finals_when_serializing_then_optional_fields_are_omitted() {
    let manifest = manifest_with_chunks(vec![chunk_result(0, 0.0, 30.0)]);
    let json = serde_json::to_string(&manifest).unwrap();

    assert!(!json.contains("final_audio"));
    assert!(!json.contains("final_video"));
    assert!(!json.contains("cloudinary_url"));
    assert!(!json.contains("subtitle_url"));
}

#[test]
fn given_manifest_with_finals_when_round_tripping_then_fields_survive() {
    let mut manifest = manifest_with_chunks(vec![chunk_result(0, 0.0, 30.0)]);
    manifest.final_audio = Some(PathBuf::from("final_audio.wav"));
    manifest.cloudinary_url = Some("file:///tmp/published/video.mp4".to_string());

    let json = serde_json::to_string_pretty(&manifest).unwrap();
    let decoded: Manifest = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded.job_id, "job-7");
    assert_eq!(decoded.final_audio, Some(PathBuf::from("final_audio.wav")));
    assert_eq!(
        decoded.cloudinary_url.as_deref(),
        Some("file:///tmp/published/video.mp4")
    );
    assert!(decoded.final_video.is_none());
    assert_eq!(decoded.chunks[0].text_translated, "translated 0");
}

#[test]
fn given_chunk_result_when_asking_duration_then_end_minus_start() {
    let chunk = chunk_result(1, 30.0, 65.0);
    assert!((chunk.duration() - 35.0).abs() < f64::EPSILON);
}
