use radulator_core::{Field, FieldKind, InputError, Outcome, Report, ScoreRange, Severity};

#[test]
fn report_rows_keep_insertion_order() {
    let report = Report::new()
        .row("ALBI Score", "-2.12")
        .row("ALBI Grade", "Grade 2")
        .row_opt("Note", None::<String>)
        .severity(Severity::Warning);
    let labels: Vec<_> = report.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["ALBI Score", "ALBI Grade"]);
    assert_eq!(report.value("ALBI Grade"), Some("Grade 2"));
}

#[test]
fn legacy_map_uses_reserved_keys() {
    let outcome: Outcome = Report::new()
        .row("Total", "25/25")
        .severity(Severity::Success)
        .into();
    let map = outcome.to_result_map();
    assert_eq!(map.get("Total").map(String::as_str), Some("25/25"));
    assert_eq!(map.get("_severity").map(String::as_str), Some("success"));

    let invalid = Outcome::from(InputError::missing("Please enter DLP."));
    let map = invalid.to_result_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("Error").map(String::as_str), Some("Please enter DLP."));
}

#[test]
fn outcome_serializes_with_status_tag() {
    let outcome: Outcome = Report::new().row("Score", "3").into();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "report");
    assert_eq!(json["rows"][0]["label"], "Score");
    assert!(json["severity"].is_null());

    let json = serde_json::to_value(Outcome::invalid("bad")).unwrap();
    assert_eq!(json, serde_json::json!({ "status": "invalid", "message": "bad" }));
}

#[test]
fn result_conversion_from_validation() {
    let ok: Result<Report, InputError> = Ok(Report::new().row("A", "1"));
    assert_eq!(Outcome::from(ok).value("A"), Some("1"));

    let err: Result<Report, InputError> = Err(InputError::invalid("nope"));
    let outcome = Outcome::from(err);
    assert!(outcome.is_invalid());
    assert_eq!(outcome.error(), Some("nope"));
    assert_eq!(outcome.severity(), None);
}

#[test]
fn score_range_honours_step() {
    let range = ScoreRange::stepped(1.0, 4.0, 0.5);
    assert!(range.contains(1.0));
    assert!(range.contains(2.5));
    assert!(range.contains(4.0));
    assert!(!range.contains(2.25));
    assert!(!range.contains(4.5));
    assert!(!range.contains(f64::NAN));
}

#[test]
fn field_serialization_omits_predicate() {
    let field = Field::select("age", "Age", &[("adult", "Adult")])
        .unit("years")
        .show_if(|_| true);
    assert_eq!(field.kind, FieldKind::Select);
    assert!(field.is_conditional());
    let json = serde_json::to_value(&field).unwrap();
    assert_eq!(json["kind"], "select");
    assert_eq!(json["opts"][0]["value"], "adult");
    assert!(json.get("show_if").is_none());
}
