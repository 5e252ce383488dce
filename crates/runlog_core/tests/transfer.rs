use runlog_core::{export_file_name, parse_runs_json, RunDraft, RunRecord, StoreError};
use chrono::NaiveDate;
use serde_json::Value;

fn run(id: i64, date: &str) -> RunRecord {
    RunDraft {
        date: date.to_string(),
        distance: "10".to_string(),
        time: "00:50:00".to_string(),
        calories: "500".to_string(),
        kind: "Rodaje".to_string(),
        feeling: "5".to_string(),
        notes: "easy".to_string(),
    }
    .validate()
    .unwrap()
    .into_record(id)
}

#[test]
fn export_document_is_pretty_array_that_parses_back() {
    let records = vec![run(2, "2024-01-12"), run(1, "2024-01-10")];
    let text = runlog_core::service::transfer::export_runs_json(&records).unwrap();

    assert!(text.starts_with("[\n  {\n    \"id\": 2,"));
    let parsed = parse_runs_json(&text).unwrap();
    assert_eq!(parsed, records);
}

#[test]
fn parse_accepts_files_written_by_the_browser_app() {
    let text = r#"[
        {
            "id": 1704880000000,
            "date": "2024-01-10",
            "distance": 10,
            "time": "00:50:00",
            "calories": 500,
            "type": "Rodaje",
            "feeling": "4",
            "notes": ""
        }
    ]"#;

    let runs = parse_runs_json(text).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].id, 1_704_880_000_000);
    assert_eq!(runs[0].kind, "Rodaje");
}

#[test]
fn parse_rejects_non_array_payloads() {
    for text in [r#"{"runs": []}"#, "42", "null", "\"runs\""] {
        assert!(
            matches!(parse_runs_json(text), Err(StoreError::Format(_))),
            "payload {text} should be rejected"
        );
    }
}

#[test]
fn parse_reports_index_of_malformed_element() {
    let text = r#"[
        {"id": 1, "date": "2024-01-10", "distance": 5, "time": "00:30:00"},
        {"id": 2, "date": "2024-01-11", "time": "00:30:00"}
    ]"#;

    match parse_runs_json(text).unwrap_err() {
        StoreError::Format(message) => assert!(message.contains("index 1"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parse_rejects_invalid_json() {
    assert!(matches!(parse_runs_json("[{"), Err(StoreError::Format(_))));
}

#[test]
fn export_file_name_uses_export_day() {
    let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    assert_eq!(export_file_name(day), "running_log_2026-10-16.json");
}

#[test]
fn exported_feeling_is_a_digit_string() {
    let text = runlog_core::service::transfer::export_runs_json(&[run(1, "2024-01-10")]).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["feeling"], "5");
    assert_eq!(value[0]["type"], "Rodaje");
}
