use std::collections::BTreeMap;

use serde::Deserialize;

/// Read-only translation guidance for one job, loaded once from the course
/// key and shared by every worker. Sorted maps keep replacement passes
/// deterministic across runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobContext {
    #[serde(default)]
    pub initial_prompt: String,
    #[serde(default)]
    pub style_guide: String,
    /// Source-language term -> canonical form, applied after ASR.
    #[serde(default)]
    pub glossary: BTreeMap<String, String>,
    /// Base language -> (term -> mandated target form), injected into MT.
    #[serde(default)]
    pub target_glossary: BTreeMap<String, BTreeMap<String, String>>,
    /// Literal pattern -> replacement applied to translated text.
    #[serde(default)]
    pub cultural_rules: BTreeMap<String, String>,
}

impl JobContext {
    /// Glossary pairs relevant for translating into `base_lang`.
    pub fn target_pairs(&self, base_lang: &str) -> BTreeMap<String, String> {
        self.target_glossary
            .get(base_lang)
            .cloned()
            .unwrap_or_default()
    }
}
