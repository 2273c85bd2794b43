use cranescope::domain::{
    ClassificationFields, ClassificationRecord, ERROR_OCCURRED, MANUAL_CHECK_SUMMARY,
    MODEL_UNABLE_REASON, PageOutcome, ProjectRecord, Verdict,
};

fn record(verdict: Verdict) -> ClassificationRecord {
    ClassificationRecord::new(
        "report.pdf",
        2,
        ClassificationFields {
            summary: "Crane order".to_string(),
            verdict,
            reason: "N/A".to_string(),
        },
    )
}

fn projects() -> Vec<ProjectRecord> {
    vec![ProjectRecord::new("report.pdf", 2, "2 STS cranes in Busan")]
}

#[test]
fn given_included_page_when_building_outcome_then_keeps_projects() {
    let outcome = PageOutcome::new(record(Verdict::Include), projects());

    assert_eq!(outcome.projects().len(), 1);
}

#[test]
fn given_excluded_page_when_building_outcome_then_drops_projects() {
    let outcome = PageOutcome::new(record(Verdict::Exclude), projects());

    assert!(outcome.projects().is_empty());
}

#[test]
fn given_unknown_verdict_when_building_outcome_then_drops_projects() {
    let outcome = PageOutcome::new(record(Verdict::Unknown), projects());

    let (classification, projects) = outcome.into_parts();
    assert_eq!(classification.verdict, Verdict::Unknown);
    assert!(projects.is_empty());
}

#[test]
fn given_transport_failure_when_building_record_then_is_excluded_with_error_text() {
    let record = ClassificationRecord::transport_failure("report.pdf", 7);

    assert_eq!(record.verdict, Verdict::Exclude);
    assert_eq!(record.summary, ERROR_OCCURRED);
    assert_eq!(record.reason, ERROR_OCCURRED);
    assert_eq!(record.page_number, 7);
}

#[test]
fn given_unparseable_answer_when_building_record_then_is_included_for_manual_review() {
    let record = ClassificationRecord::unparseable("report.pdf", 1);

    assert_eq!(record.verdict, Verdict::Include);
    assert_eq!(record.summary, MANUAL_CHECK_SUMMARY);
    assert_eq!(record.reason, MODEL_UNABLE_REASON);
}
