use std::ffi::OsString;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{MediaError, MediaToolkit};

const STDERR_TAIL_CHARS: usize = 400;

/// Shells out to ffmpeg/ffprobe. Binaries are resolved once at construction:
/// explicit env override, then a project-local copy, then whatever is on PATH.
pub struct FfmpegToolkit {
    ffmpeg: String,
    ffprobe: String,
}

impl FfmpegToolkit {
    pub fn from_env() -> Self {
        Self {
            ffmpeg: resolve_binary("FFMPEG_EXE", "ffmpeg"),
            ffprobe: resolve_binary("FFPROBE_EXE", "ffprobe"),
        }
    }

    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// True when both binaries answer `-version`. Lets callers skip media
    /// work on hosts without ffmpeg installed.
    pub async fn is_available(&self) -> bool {
        for program in [&self.ffmpeg, &self.ffprobe] {
            let probe = Command::new(program).arg("-version").output().await;
            match probe {
                Ok(output) if output.status.success() => {}
                _ => return false,
            }
        }
        true
    }

    async fn run(&self, program: &str, args: Vec<OsString>) -> Result<String, MediaError> {
        let output = Command::new(program)
            .args(&args)
            .output()
            .await
            .map_err(|e| MediaError::Spawn(program.to_string(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::CommandFailed(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                tail(&stderr, STDERR_TAIL_CHARS)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl MediaToolkit for FfmpegToolkit {
    async fn probe_duration(&self, path: &Path) -> Result<f64, MediaError> {
        let mut args: Vec<OsString> = vec![
            "-v".into(),
            "error".into(),
            "-show_entries".into(),
            "format=duration".into(),
            "-of".into(),
            "default=noprint_wrappers=1:nokey=1".into(),
        ];
        args.push(path.into());

        let stdout = self.run(&self.ffprobe, args).await?;
        let raw = stdout.trim();
        let duration = raw
            .parse::<f64>()
            .map_err(|_| MediaError::ProbeParse(raw.to_string()))?;

        tracing::debug!(path = %path.display(), duration, "Probed media duration");
        Ok(duration)
    }

    async fn has_video_stream(&self, path: &Path) -> Result<bool, MediaError> {
        let mut args: Vec<OsString> = vec![
            "-v".into(),
            "error".into(),
            "-select_streams".into(),
            "v:0".into(),
            "-show_entries".into(),
            "stream=codec_type".into(),
            "-of".into(),
            "csv=p=0".into(),
        ];
        args.push(path.into());

        let stdout = self.run(&self.ffprobe, args).await?;
        Ok(stdout.contains("video"))
    }

    async fn extract_segment(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        out: &Path,
    ) -> Result<(), MediaError> {
        tracing::debug!(
            input = %input.display(),
            start,
            duration,
            out = %out.display(),
            "Extracting media segment"
        );

        let mut args: Vec<OsString> = vec!["-y".into(), "-ss".into(), format_secs(start).into()];
        args.push("-i".into());
        args.push(input.into());
        args.push("-t".into());
        args.push(format_secs(duration).into());
        if is_audio_output(out) {
            args.push("-vn".into());
            args.extend(asr_audio_args());
        } else {
            args.push("-c".into());
            args.push("copy".into());
        }
        args.push(out.into());

        self.run(&self.ffmpeg, args).await?;
        Ok(())
    }

    async fn extract_audio(&self, input: &Path, out: &Path) -> Result<(), MediaError> {
        tracing::debug!(input = %input.display(), out = %out.display(), "Extracting audio track");

        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into(), "-vn".into()];
        args.extend(asr_audio_args());
        args.push(out.into());

        self.run(&self.ffmpeg, args).await?;
        Ok(())
    }

    async fn concat(&self, list_path: &Path, out: &Path) -> Result<(), MediaError> {
        tracing::debug!(list = %list_path.display(), out = %out.display(), "Concatenating audio");

        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-f".into(),
            "concat".into(),
            "-safe".into(),
            "0".into(),
            "-i".into(),
        ];
        args.push(list_path.into());
        args.push("-c".into());
        args.push("copy".into());
        args.push(out.into());

        self.run(&self.ffmpeg, args).await?;
        Ok(())
    }

    async fn apply_atempo(
        &self,
        input: &Path,
        stages: &[f64],
        out: &Path,
    ) -> Result<(), MediaError> {
        let filter = stages
            .iter()
            .map(|s| format!("atempo={s:.6}"))
            .collect::<Vec<_>>()
            .join(",");

        tracing::debug!(input = %input.display(), %filter, "Applying tempo filter chain");

        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into()];
        args.push("-filter:a".into());
        args.push(filter.into());
        args.extend(output_codec_args(out));
        args.push(out.into());

        self.run(&self.ffmpeg, args).await?;
        Ok(())
    }

    async fn mux(
        &self,
        video_input: &Path,
        audio_input: &Path,
        out: &Path,
    ) -> Result<(), MediaError> {
        tracing::debug!(
            video = %video_input.display(),
            audio = %audio_input.display(),
            out = %out.display(),
            "Muxing dubbed audio onto video"
        );

        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into()];
        args.push(video_input.into());
        args.push("-i".into());
        args.push(audio_input.into());
        for flag in [
            "-map", "0:v:0", "-map", "1:a:0", "-c:v", "copy", "-c:a", "aac", "-shortest",
        ] {
            args.push(flag.into());
        }
        args.push(out.into());

        self.run(&self.ffmpeg, args).await?;
        Ok(())
    }

    async fn synthesize_silence(&self, seconds: f64, out: &Path) -> Result<(), MediaError> {
        tracing::debug!(seconds, out = %out.display(), "Synthesizing silence");

        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-f".into(),
            "lavfi".into(),
            "-i".into(),
            "anullsrc=r=24000:cl=mono".into(),
            "-t".into(),
            format_secs(seconds).into(),
        ];
        args.extend(output_codec_args(out));
        args.push(out.into());

        self.run(&self.ffmpeg, args).await?;
        Ok(())
    }
}

fn resolve_binary(env_var: &str, name: &str) -> String {
    if let Ok(configured) = std::env::var(env_var) {
        if !configured.trim().is_empty() {
            return configured;
        }
    }
    let local = Path::new(".").join(name);
    if local.exists() {
        return local.to_string_lossy().into_owned();
    }
    name.to_string()
}

fn is_audio_output(out: &Path) -> bool {
    matches!(
        out.extension().and_then(|e| e.to_str()),
        Some("wav") | Some("mp3") | Some("m4a") | Some("aac")
    )
}

/// 16 kHz mono s16le, the input format the transcription models expect.
fn asr_audio_args() -> Vec<OsString> {
    ["-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1"]
        .into_iter()
        .map(OsString::from)
        .collect()
}

fn output_codec_args(out: &Path) -> Vec<OsString> {
    let codec = match out.extension().and_then(|e| e.to_str()) {
        Some("wav") => ["-acodec", "pcm_s16le"],
        Some("m4a") | Some("aac") => ["-acodec", "aac"],
        _ => ["-acodec", "libmp3lame"],
    };
    codec.into_iter().map(OsString::from).collect()
}

fn format_secs(value: f64) -> String {
    format!("{value:.3}")
}

fn tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    text.chars().skip(count - max_chars).collect()
}
