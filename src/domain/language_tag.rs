use std::fmt;
use std::str::FromStr;

/// BCP-47-like language tag (`en`, `hi`, `hi-IN`, `bho`, ...). Routing policy
/// operates on the base subtag, the text before the first `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag(String);

/// Targets whose chunked MT quality is poor enough that the whole transcript
/// is sent to Gemini in one pass. Bhojpuri is deliberately absent: it goes
/// through Google plus the deterministic dialect rewrite instead.
const GEMINI_PREFERRED: &[&str] = &[
    "brx", "doi", "ks", "kok", "mai", "mni", "sat", "mwr", "bgc",
];

/// Languages the online Google backend can serve only through an explicit
/// code remap.
const GOOGLE_EXTENDED: &[&str] = &["as", "ne", "sa", "sd", "ur"];

const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("as", "Assamese"),
    ("bgc", "Haryanvi"),
    ("bho", "Bhojpuri"),
    ("bn", "Bengali"),
    ("brx", "Bodo"),
    ("de", "German"),
    ("doi", "Dogri"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("gu", "Gujarati"),
    ("hi", "Hindi"),
    ("ja", "Japanese"),
    ("kn", "Kannada"),
    ("kok", "Konkani"),
    ("ks", "Kashmiri"),
    ("mai", "Maithili"),
    ("ml", "Malayalam"),
    ("mni", "Manipuri"),
    ("mr", "Marathi"),
    ("mwr", "Marwari"),
    ("ne", "Nepali"),
    ("or", "Odia"),
    ("pa", "Punjabi"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("sa", "Sanskrit"),
    ("sat", "Santali"),
    ("sd", "Sindhi"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("ur", "Urdu"),
    ("zh", "Chinese"),
];

impl LanguageTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base subtag: `hi-IN` -> `hi`.
    pub fn base(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// English language name for prompt building; falls back to the raw code
    /// when the name is not in the table.
    pub fn display_name(&self) -> &str {
        DISPLAY_NAMES
            .iter()
            .find(|(code, _)| *code == self.base())
            .map(|(_, name)| *name)
            .unwrap_or_else(|| self.as_str())
    }

    /// True when this target bypasses chunking and is translated by Gemini in
    /// a single pass over the whole transcript.
    pub fn is_single_pass_target(&self) -> bool {
        GEMINI_PREFERRED.contains(&self.base())
    }

    /// True when the Google backend must be used via an explicit code remap.
    pub fn is_google_extended(&self) -> bool {
        GOOGLE_EXTENDED.contains(&self.base())
    }

    /// Code handed to the Google backend. Bhojpuri has no Google support and
    /// is translated to Hindi first; the dialect rewriter finishes the job.
    pub fn google_code(&self) -> &str {
        if self.base() == "bho" { "hi" } else { self.base() }
    }

    /// Language code for the offline TTS fallback. Languages without basic
    /// TTS coverage borrow a close relative's voice.
    pub fn basic_tts_code(&self) -> &str {
        match self.base() {
            "mwr" | "bho" | "sa" => "hi",
            "ks" | "sd" => "ur",
            other => other,
        }
    }
}

impl FromStr for LanguageTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("language tag must not be empty".to_string());
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(format!("invalid language tag: {}", trimmed));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
