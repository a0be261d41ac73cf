use std::path::PathBuf;

use malacca::application::services::{write_srt, write_vtt};
use malacca::domain::{ChunkResult, TranscriptSegment};

fn segment(start: f64, end: f64, text: &str) -> TranscriptSegment {
    TranscriptSegment {
        start,
        end,
        text: text.to_string(),
    }
}

#[test]
fn given_segments_when_writing_srt_then_cues_use_comma_millis() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("chunk_0000.srt");
    let segments = vec![
        segment(0.0, 2.5, "hello"),
        segment(2.5, 61.25, "world"),
    ];

    write_srt(&segments, &out).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();

    assert!(written.starts_with("1\n00:00:00,000 --> 00:00:02,500\nhello\n\n"));
    assert!(written.contains("2\n00:00:02,500 --> 00:01:01,250\nworld\n\n"));
}

#[test]
fn given_empty_segments_when_writing_srt_then_numbering_stays_dense() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("chunk_0000.srt");
    let segments = vec![
        segment(0.0, 2.0, "first"),
        segment(2.0, 4.0, "   "),
        segment(4.0, 6.0, "third"),
    ];

    write_srt(&segments, &out).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();

    assert!(written.contains("1\n00:00:00,000"));
    assert!(written.contains("2\n00:00:04,000"));
    assert!(!written.contains("3\n"));
}

#[test]
fn given_no_segments_when_writing_srt_then_file_is_empty() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("empty.srt");

    write_srt(&[], &out).unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "");
}

#[test]
fn given_chunks_when_writing_vtt_then_header_and_dot_millis_are_used() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("captions.vtt");
    let chunks = vec![
        chunk_result(0, 0.0, 30.0, "नमस्ते"),
        chunk_result(1, 30.0, 65.0, "दुनिया"),
    ];

    write_vtt(&chunks, &out).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();

    assert!(written.starts_with("WEBVTT\n\n"));
    assert!(written.contains("1\n00:00:00.000 --> 00:00:30.000\nनमस्ते\n\n"));
    assert!(written.contains("2\n00:00:30.000 --> 00:01:05.000\nदुनिया\n\n"));
}

#[test]
fn given_untranslated_chunk_when_writing_vtt_then_it_is_skipped_without_gaps() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("captions.vtt");
    let chunks = vec![
        chunk_result(0, 0.0, 30.0, "पहला"),
        chunk_result(1, 30.0, 60.0, ""),
        chunk_result(2, 60.0, 65.0, "तीसरा"),
    ];

    write_vtt(&chunks, &out).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();

    assert!(written.contains("1\n00:00:00.000"));
    assert!(written.contains("2\n00:01:00.000 --> 00:01:05.000\nतीसरा"));
}

fn chunk_result(index: u32, start: f64, end: f64, translated: &str) -> ChunkResult {
    ChunkResult {
        index,
        start,
        end,
        text_original: String::new(),
        text_translated: translated.to_string(),
        audio_path: PathBuf::new(),
        srt_path: PathBuf::new(),
    }
}
