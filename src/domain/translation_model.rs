use std::fmt;
use std::str::FromStr;

/// Caller-requested translation backend key. The router's target-language
/// policy can override the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationModel {
    Google,
    Gemini,
    Llm,
    IndicTrans2,
}

impl TranslationModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationModel::Google => "google",
            TranslationModel::Gemini => "gemini",
            TranslationModel::Llm => "llm",
            TranslationModel::IndicTrans2 => "indictrans2",
        }
    }
}

impl Default for TranslationModel {
    fn default() -> Self {
        TranslationModel::Google
    }
}

impl FromStr for TranslationModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(TranslationModel::Google),
            "gemini" => Ok(TranslationModel::Gemini),
            "llm" => Ok(TranslationModel::Llm),
            "indictrans2" => Ok(TranslationModel::IndicTrans2),
            other => Err(format!("Invalid translation model: {}", other)),
        }
    }
}

impl fmt::Display for TranslationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
