use std::fmt;

use serde::Serialize;

/// Label exported for a page whose verdict could not be determined.
pub const UNKNOWN_VERDICT_LABEL: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    Include,
    Exclude,
    Unknown,
}

impl Verdict {
    /// Interprets a model-written verdict value.
    ///
    /// Matching is done on the lower-cased value with surrounding punctuation removed,
    /// so `"INCLUDE."`, `"**Include**"` and `"include - port expansion"` all resolve to
    /// [`Verdict::Include`]. Anything that is neither label stays [`Verdict::Unknown`].
    pub fn from_label(value: &str) -> Self {
        let lowered = value.to_lowercase();
        let cleaned = lowered.trim_matches(|c: char| !c.is_alphanumeric());

        if cleaned.starts_with("include") {
            Self::Include
        } else if cleaned.starts_with("exclude") {
            Self::Exclude
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Include => "Include",
            Self::Exclude => "Exclude",
            Self::Unknown => UNKNOWN_VERDICT_LABEL,
        }
    }

    pub fn is_include(&self) -> bool {
        matches!(self, Self::Include)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
