use std::io;
use std::path::{Path, PathBuf};

use crate::domain::{ChunkResult, TranscriptSegment};

/// Writes one SRT cue per transcript segment. Timestamps are relative to
/// the audio that was transcribed, so per-chunk files start near zero.
pub fn write_srt(segments: &[TranscriptSegment], out: &Path) -> io::Result<PathBuf> {
    let mut body = String::new();
    let mut cue = 0usize;
    for segment in segments {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }
        cue += 1;
        body.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            cue,
            format_timestamp(segment.start, ','),
            format_timestamp(segment.end, ','),
            text
        ));
    }
    std::fs::write(out, body)?;
    Ok(out.to_path_buf())
}

/// Writes a WebVTT file spanning the whole job, one cue per chunk, using
/// the translated text and the chunk's global start/end offsets.
pub fn write_vtt(chunks: &[ChunkResult], out: &Path) -> io::Result<PathBuf> {
    let mut body = String::from("WEBVTT\n\n");
    let mut cue = 0usize;
    for chunk in chunks {
        let text = chunk.text_translated.trim();
        if text.is_empty() {
            continue;
        }
        cue += 1;
        body.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            cue,
            format_timestamp(chunk.start, '.'),
            format_timestamp(chunk.end, '.'),
            text
        ));
    }
    std::fs::write(out, body)?;
    Ok(out.to_path_buf())
}

fn format_timestamp(seconds: f64, millis_separator: char) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    format!("{hours:02}:{mins:02}:{secs:02}{millis_separator}{ms:03}")
}
