use regex::Regex;
use std::sync::LazyLock;

static HYPHEN_NEWLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)")
        .expect("hyphenation pattern is valid")
});

/// Rejoins words split across lines by typesetting (`crane-\nrail` → `cranerail`).
///
/// Only the hyphen plus the line break are removed; everything else is left for
/// the whitespace normalizer.
pub fn rejoin_hyphenated_lines(raw: &str) -> String {
    HYPHEN_NEWLINE
        .replace_all(raw, "$prefix$suffix")
        .into_owned()
}
