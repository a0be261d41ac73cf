const MAX_VISIBLE_CHARS: usize = 120;

/// Shortens pipeline text (transcripts, translations) for log lines.
/// Truncation counts characters, not bytes, so Devanagari and Perso-Arabic
/// content never splits mid-codepoint.
pub fn excerpt_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let char_count = trimmed.chars().count();
    if char_count > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", head, char_count)
    } else {
        trimmed.to_string()
    }
}

/// Strips credential values out of error text before it is logged or stored.
/// Transport errors often embed the full request URL, query string included.
pub fn redact_secrets(text: &str) -> String {
    let patterns = [
        ("key=", "key=[REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
        ("Bearer ", "Bearer [REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(pattern) {
            let idx = search_from + found;
            let value_start = idx + pattern.len();
            if result[value_start..].starts_with("[REDACTED]") {
                search_from = value_start + "[REDACTED]".len();
                continue;
            }
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[value_end..]);
            search_from = idx + replacement.len();
        }
    }

    result
}
