use std::sync::LazyLock;
use tiktoken_rs::CoreBPE;

static TOKENIZER: LazyLock<CoreBPE> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base().expect("Failed to initialize cl100k_base tokenizer")
});

/// Approximate token count used to warn before a prompt blows a backend's
/// context window.
pub fn count_tokens(text: &str) -> usize {
    TOKENIZER.encode_with_special_tokens(text).len()
}

/// Estimated payload of one translation prompt: the text plus the style guide
/// and glossary lines that ride along with it.
pub fn prompt_payload_tokens(
    text: &str,
    style_guide: Option<&str>,
    glossary: &[(String, String)],
) -> usize {
    let mut tokens = count_tokens(text);
    if let Some(guide) = style_guide {
        tokens += count_tokens(guide);
    }
    for (term, form) in glossary {
        tokens += count_tokens(term) + count_tokens(form);
    }
    tokens
}
