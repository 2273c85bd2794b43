use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::application::services::prompt_builder::NO_PROJECTS_SENTINEL;
use crate::domain::ProjectFacts;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•]|\d+[.)])\s+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectLineFilter {
    /// Every non-empty line is a project description.
    #[default]
    Lenient,
    /// Only lines shaped like `<number> ... cranes in ...` are kept.
    Strict,
}

pub fn parse_project_lines(raw: &str, filter: ProjectLineFilter) -> Vec<String> {
    let lines: Vec<String> = raw
        .lines()
        .map(|line| LIST_MARKER.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.iter().any(|line| is_no_match_sentinel(line)) {
        return Vec::new();
    }

    lines
        .into_iter()
        .filter(|line| match filter {
            ProjectLineFilter::Lenient => true,
            ProjectLineFilter::Strict => ProjectFacts::matches(line),
        })
        .collect()
}

fn is_no_match_sentinel(line: &str) -> bool {
    line.trim_end_matches('.')
        .trim()
        .eq_ignore_ascii_case(NO_PROJECTS_SENTINEL)
}
