use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{AsrMode, LanguageTag, TranslationModel};

#[derive(Parser)]
#[command(
    name = "malacca",
    version,
    about = "Dubbing pipeline: chunk, transcribe, translate and re-voice course media"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one dubbing job end to end and print the manifest path.
    Run(RunArgs),
    /// Re-run TTS over an existing manifest, keeping translations intact.
    Resynthesize(ResynthesizeArgs),
    /// Re-assemble and re-mux the final artifacts after a resynthesize.
    Finalize(FinalizeArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Input media file (video or audio).
    #[arg(long)]
    pub input: PathBuf,

    /// Source language tag, e.g. `en` or `hi-IN`.
    #[arg(long)]
    pub source: LanguageTag,

    /// Target language tag, e.g. `hi`, `bho`, `ks`.
    #[arg(long)]
    pub target: LanguageTag,

    /// Job id; a fresh UUID when omitted.
    #[arg(long)]
    pub job: Option<String>,

    /// Course whose glossary, style and pronunciation files apply.
    #[arg(long, default_value = "")]
    pub course_id: String,

    /// Transcription mode (fast, balanced, quality, high_accuracy, ...).
    #[arg(long, default_value = "balanced")]
    pub mode: AsrMode,

    /// Requested translation backend; target-language policy may override.
    #[arg(long)]
    pub model: Option<TranslationModel>,

    /// Where job directories are created; overrides MALACCA_JOBS_DIR.
    #[arg(long)]
    pub jobs_dir: Option<PathBuf>,

    /// Delete chunk scratch directories after a successful run.
    #[arg(long)]
    pub cleanup: bool,
}

#[derive(Args)]
pub struct ResynthesizeArgs {
    /// Path to an existing manifest.json.
    pub manifest: PathBuf,

    /// Directory for the new audio files; defaults to the job's tts/.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct FinalizeArgs {
    /// Path to an existing manifest.json.
    pub manifest: PathBuf,
}
