use std::collections::HashMap;

use crate::domain::{ClassificationFields, MISSING_FIELD, Verdict};

use super::{REASON_KEY, SUMMARY_KEY, VERDICT_KEY};

/// Builds a map from every `key: value` line. Lines without a colon and blank lines are
/// skipped; on duplicate keys the last occurrence wins. Values are only trimmed, apart
/// from a bold wrapper around the whole value or the closing `**` of a bold label.
pub fn parse_key_values(raw: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let label = strip_decoration(key);
        if label.is_empty() {
            continue;
        }

        fields.insert(label.to_string(), clean_value(key, value).to_string());
    }

    fields
}

/// Reads the three labeled classification fields. Keys match case-sensitively; anything
/// absent falls back to `N/A`, and an absent verdict is [`Verdict::Unknown`].
pub fn parse_labeled_classification(raw: &str) -> ClassificationFields {
    let mut fields = parse_key_values(raw);

    let verdict = fields
        .get(VERDICT_KEY)
        .map(|v| Verdict::from_label(v))
        .unwrap_or(Verdict::Unknown);

    ClassificationFields {
        summary: fields
            .remove(SUMMARY_KEY)
            .unwrap_or_else(|| MISSING_FIELD.to_string()),
        verdict,
        reason: fields
            .remove(REASON_KEY)
            .unwrap_or_else(|| MISSING_FIELD.to_string()),
    }
}

// Models like to wrap labels in markdown ("**Summary:**", "- Reason:").
fn strip_decoration(s: &str) -> &str {
    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("• "))
        .unwrap_or(trimmed);
    trimmed.trim_matches(|c: char| c == '*' || c == '#' || c == '_' || c.is_whitespace())
}

fn clean_value<'a>(raw_key: &str, value: &'a str) -> &'a str {
    let value = value.trim();

    // "**Summary:** text" leaves the closing "**" at the start of the value.
    let value = if raw_key.trim_start_matches(['-', '•', ' ']).starts_with("**") {
        value.strip_prefix("**").map(str::trim_start).unwrap_or(value)
    } else {
        value
    };

    value
        .strip_prefix("**")
        .and_then(|inner| inner.strip_suffix("**"))
        .map(str::trim)
        .unwrap_or(value)
}
