use chrono::NaiveDate;
use runlog_core::{filter_by_date_range, DateRange, RunDraft, RunRecord};

fn run(id: i64, date: &str) -> RunRecord {
    RunDraft {
        date: date.to_string(),
        distance: "5".to_string(),
        time: "00:30:00".to_string(),
        ..RunDraft::default()
    }
    .validate()
    .unwrap()
    .into_record(id)
}

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

fn ids(records: &[&RunRecord]) -> Vec<i64> {
    records.iter().map(|record| record.id).collect()
}

fn sample() -> Vec<RunRecord> {
    vec![
        run(1, "2024-03-02"),
        run(2, "2024-03-01"),
        run(3, "2024-03-01"),
        run(4, "2024-02-29"),
        run(5, "2023-12-31"),
    ]
}

#[test]
fn single_day_range_returns_exactly_that_day() {
    let records = sample();
    let filtered = filter_by_date_range(&records, &DateRange::day(day("2024-03-01")));

    assert_eq!(ids(&filtered), vec![2, 3]);
}

#[test]
fn range_is_inclusive_and_keeps_input_order() {
    let records = sample();
    let range = DateRange::new(day("2024-02-29"), day("2024-03-02"));

    assert_eq!(
        ids(&filter_by_date_range(&records, &range)),
        vec![1, 2, 3, 4]
    );
}

#[test]
fn range_crossing_year_boundary_matches_both_sides() {
    let records = sample();
    let range = DateRange::new(day("2023-12-31"), day("2024-02-29"));

    assert_eq!(ids(&filter_by_date_range(&records, &range)), vec![4, 5]);
}

#[test]
fn reversed_range_matches_nothing() {
    let records = sample();
    let range = DateRange::new(day("2024-03-02"), day("2024-03-01"));

    assert!(filter_by_date_range(&records, &range).is_empty());
}

#[test]
fn default_range_covers_last_three_months() {
    let records = sample();
    let range = DateRange::default_for(day("2024-03-31"));

    assert_eq!(range.start, day("2023-12-31"));
    assert_eq!(
        ids(&filter_by_date_range(&records, &range)),
        vec![1, 2, 3, 4, 5]
    );
}
