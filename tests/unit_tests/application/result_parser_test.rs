use cranescope::application::services::result_parser::{
    ParseError, ProjectLineFilter, parse_key_values, parse_labeled_classification,
    parse_project_lines, parse_tool_arguments,
};
use cranescope::domain::{MISSING_FIELD, Verdict};

#[test]
fn given_labeled_answer_when_parsing_then_maps_all_fields() {
    let raw = "Summary: Port of Long Beach orders 4 RTG cranes.\n\
               Include or Exclude: Include\n\
               Reason: New crane purchase";

    let fields = parse_labeled_classification(raw);

    assert_eq!(fields.summary, "Port of Long Beach orders 4 RTG cranes.");
    assert_eq!(fields.verdict, Verdict::Include);
    assert_eq!(fields.reason, "New crane purchase");
}

#[test]
fn given_markdown_decorated_labels_when_parsing_then_strips_decoration() {
    let raw = "**Summary:** Tire shortage\n- **Include or Exclude:** Exclude\n### Reason: Tires";

    let fields = parse_labeled_classification(raw);

    assert_eq!(fields.summary, "Tire shortage");
    assert_eq!(fields.verdict, Verdict::Exclude);
    assert_eq!(fields.reason, "Tires");
}

#[test]
fn given_values_with_markdown_like_characters_when_parsing_then_keeps_them_verbatim() {
    let raw = "Summary: #3 berth gets __init__ cranes *\n\
               Include or Exclude: Include\n\
               Reason: _see_ item #";

    let fields = parse_labeled_classification(raw);

    assert_eq!(fields.summary, "#3 berth gets __init__ cranes *");
    assert_eq!(fields.reason, "_see_ item #");
}

#[test]
fn given_bold_wrapped_value_when_parsing_then_unwraps_it() {
    let fields = parse_labeled_classification("Summary: **New STS cranes**\nReason: - dashes stay");

    assert_eq!(fields.summary, "New STS cranes");
    assert_eq!(fields.reason, "- dashes stay");
}

#[test]
fn given_missing_verdict_when_parsing_then_returns_unknown_and_defaults() {
    let fields = parse_labeled_classification("Summary: Something about ports");

    assert_eq!(fields.verdict, Verdict::Unknown);
    assert_eq!(fields.reason, MISSING_FIELD);
}

#[test]
fn given_unstructured_answer_when_parsing_then_never_fails() {
    let fields = parse_labeled_classification("I cannot help with that");

    assert_eq!(fields.summary, MISSING_FIELD);
    assert_eq!(fields.verdict, Verdict::Unknown);
    assert_eq!(fields.reason, MISSING_FIELD);
}

#[test]
fn given_duplicate_keys_when_parsing_key_values_then_last_wins() {
    let map = parse_key_values("Reason: first\nnoise without colon\n\nReason: second");

    assert_eq!(map.get("Reason").map(String::as_str), Some("second"));
    assert_eq!(map.len(), 1);
}

#[test]
fn given_value_with_colon_when_parsing_key_values_then_splits_on_first_colon() {
    let map = parse_key_values("Reason: Expansion: two new berths");

    assert_eq!(
        map.get("Reason").map(String::as_str),
        Some("Expansion: two new berths")
    );
}

#[test]
fn given_lowercase_key_when_parsing_classification_then_key_is_not_matched() {
    let fields = parse_labeled_classification("summary: lower\nInclude or Exclude: Exclude");

    assert_eq!(fields.summary, MISSING_FIELD);
    assert_eq!(fields.verdict, Verdict::Exclude);
}

#[test]
fn given_bulleted_project_lines_when_parsing_then_strips_markers() {
    let raw = "- 4 RTG cranes in Long Beach\n\n2. 2 STS cranes in Busan\n* Harbour expansion in Gdynia";

    let lines = parse_project_lines(raw, ProjectLineFilter::Lenient);

    assert_eq!(
        lines,
        vec![
            "4 RTG cranes in Long Beach",
            "2 STS cranes in Busan",
            "Harbour expansion in Gdynia",
        ]
    );
}

#[test]
fn given_strict_filter_when_parsing_then_keeps_only_project_shaped_lines() {
    let raw = "Here are the projects:\n4 RTG cranes in Long Beach\nHarbour expansion";

    let lines = parse_project_lines(raw, ProjectLineFilter::Strict);

    assert_eq!(lines, vec!["4 RTG cranes in Long Beach"]);
}

#[test]
fn given_sentinel_answer_when_parsing_then_returns_no_projects() {
    assert!(parse_project_lines("No crane projects found.", ProjectLineFilter::Lenient).is_empty());
    assert!(parse_project_lines("no crane projects found", ProjectLineFilter::Strict).is_empty());
}

#[test]
fn given_sentinel_mixed_with_lines_when_parsing_then_returns_no_projects() {
    let raw = "Nothing matched.\nNo crane projects found";

    assert!(parse_project_lines(raw, ProjectLineFilter::Lenient).is_empty());
}

#[test]
fn given_valid_tool_arguments_when_parsing_then_returns_fields() {
    let raw = r#"{"summary":"Crane order","include_or_exclude":"Include","reason":"Purchase"}"#;

    let fields = parse_tool_arguments(raw).unwrap();

    assert_eq!(fields.summary, "Crane order");
    assert_eq!(fields.verdict, Verdict::Include);
    assert_eq!(fields.reason, "Purchase");
}

#[test]
fn given_fenced_tool_arguments_when_parsing_then_strips_fence() {
    let raw = "```json\n{\"summary\":\"s\",\"include_or_exclude\":\"Exclude\",\"reason\":\"r\"}\n```";

    let fields = parse_tool_arguments(raw).unwrap();

    assert_eq!(fields.verdict, Verdict::Exclude);
}

#[test]
fn given_arguments_missing_field_when_parsing_then_returns_parse_error() {
    let result = parse_tool_arguments(r#"{"summary":"s","reason":"r"}"#);

    assert!(matches!(result, Err(ParseError::MalformedArguments(_))));
}

#[test]
fn given_non_json_arguments_when_parsing_then_returns_parse_error() {
    assert!(parse_tool_arguments("Include").is_err());
}
