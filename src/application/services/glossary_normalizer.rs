use std::collections::BTreeMap;

use unicode_normalization::UnicodeNormalization;

/// Canonicalizes ASR output against a domain glossary before it reaches the
/// translator and the caption writer.
///
/// The default matcher is a plain substring replacement tried in three case
/// variants (as written, lower-cased, upper-cased), which mirrors how the
/// glossaries are authored. `strict()` switches to word-boundary matching for
/// glossaries where substring hits inside unrelated tokens are a problem.
pub struct GlossaryNormalizer {
    strict: bool,
}

impl GlossaryNormalizer {
    pub fn new() -> Self {
        Self { strict: false }
    }

    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn clean(&self, text: &str, glossary: &BTreeMap<String, String>) -> String {
        let normalized: String = text.nfc().collect();
        let mut result = collapse_whitespace(&normalized);

        for (term, canonical) in glossary {
            if term.is_empty() {
                continue;
            }
            if self.strict {
                result = replace_words(&result, term, canonical);
            } else {
                result = result.replace(term.as_str(), canonical);
                let lower = term.to_lowercase();
                if lower != *term {
                    result = result.replace(&lower, canonical);
                }
                let upper = term.to_uppercase();
                if upper != *term && upper != lower {
                    result = result.replace(&upper, canonical);
                }
            }
        }

        result
    }
}

impl Default for GlossaryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_was_space = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
    out
}

/// Case-insensitive whole-word replacement. Boundary anchors are dropped on
/// a side whose edge character is not a word character, so terms like ".NET"
/// still match.
fn replace_words(text: &str, term: &str, canonical: &str) -> String {
    let starts_word = term.chars().next().is_some_and(|c| c.is_alphanumeric());
    let ends_word = term.chars().last().is_some_and(|c| c.is_alphanumeric());
    let pattern = format!(
        "(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(term),
        if ends_word { r"\b" } else { "" },
    );
    match regex::Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, regex::NoExpand(canonical)).into_owned(),
        Err(_) => text.replace(term, canonical),
    }
}
