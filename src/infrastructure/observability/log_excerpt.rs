const MAX_VISIBLE_CHARS: usize = 100;

const SECRET_MARKERS: [&str; 6] = [
    "Bearer ",
    "api_key=",
    "api-key: ",
    "x-api-key: ",
    "password=",
    "token=",
];

/// Shortens prompt or completion text for debug logs and masks anything that looks like
/// a credential. Truncation counts characters, not bytes.
pub fn log_excerpt(text: &str) -> String {
    let collapsed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        return String::from("[EMPTY]");
    }

    // Redaction sees the full text; truncation comes after.
    let redacted = redact_secrets(&collapsed);
    let total_chars = redacted.chars().count();

    if total_chars > MAX_VISIBLE_CHARS {
        let head: String = redacted.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{head}... ({total_chars} chars total)")
    } else {
        redacted
    }
}

fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();

    for marker in SECRET_MARKERS {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(marker) {
            let start = search_from + found + marker.len();
            let end = result[start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| start + i)
                .unwrap_or(result.len());
            result.replace_range(start..end, "[REDACTED]");
            search_from = start + "[REDACTED]".len();
        }
    }

    result
}
