/// Collapses every maximal run of whitespace into a single ASCII space.
///
/// Leading and trailing runs are collapsed too, not trimmed, and nothing else about the
/// text changes.
pub fn normalize_whitespace(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut prev_was_space = false;

    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }

    result
}
