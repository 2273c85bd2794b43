use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static PROJECT_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<count>\d+)\s+(?P<kind>.+?)\s+cranes?\s+in\s+(?P<location>.+?)[.\s]*$",
    )
    .expect("project shape regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    pub source_document: String,
    pub page_number: u32,
    pub description: String,
}

impl ProjectRecord {
    pub fn new(
        source_document: impl Into<String>,
        page_number: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source_document: source_document.into(),
            page_number,
            description: description.into(),
        }
    }

    pub fn facts(&self) -> Option<ProjectFacts> {
        ProjectFacts::parse(&self.description)
    }
}

/// Structured view of a description written as `<count> <type> cranes in <location>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFacts {
    pub count: u32,
    pub crane_type: String,
    pub location: String,
}

impl ProjectFacts {
    pub fn parse(description: &str) -> Option<Self> {
        let captures = PROJECT_SHAPE.captures(description.trim())?;
        let count = captures.name("count")?.as_str().parse().ok()?;

        Some(Self {
            count,
            crane_type: captures.name("kind")?.as_str().trim().to_string(),
            location: captures.name("location")?.as_str().trim().to_string(),
        })
    }

    pub fn matches(description: &str) -> bool {
        PROJECT_SHAPE.is_match(description.trim())
    }
}
