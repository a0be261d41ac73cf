use crate::application::ports::TranslationRequest;

/// Prompt shared by the instruction-following backends. Google never sees
/// this; its glossary handling is a literal post-pass in the router.
pub fn build_translation_prompt(request: &TranslationRequest) -> String {
    let language = request.target_lang.display_name();

    let mut prompt = format!(
        "Translate the following text into {language}.\n\
         Preserve technical terms, code identifiers, numbers and product names exactly as written.\n\
         Return only the translated text, with no preamble or explanation.\n"
    );

    if !request.glossary.is_empty() {
        prompt.push_str("\nUse these exact target forms for the listed terms:\n");
        for (source, target) in &request.glossary {
            prompt.push_str(&format!("- {source} -> {target}\n"));
        }
    }

    if let Some(style) = request
        .style_guide
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        prompt.push_str(&format!("\nStyle guide: {}\n", style.trim()));
    }

    prompt.push_str(&format!("\nText:\n{}", request.text));
    prompt
}
