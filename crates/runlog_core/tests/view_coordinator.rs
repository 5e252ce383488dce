use chrono::NaiveDate;
use runlog_core::db::open_db_in_memory;
use runlog_core::{
    ChartSeries, DateRange, PaginationView, RenderSink, RunDraft, RunRecord, RunRow, RunStore,
    SqliteBlobRepository, TopRun, ViewCoordinator,
};
use rusqlite::Connection;

/// Keeps the last payload of every render call.
#[derive(Default)]
struct RecordingSink {
    renders: usize,
    rows: Vec<RunRow>,
    chart: ChartSeries,
    top: Vec<TopRun>,
    pagination: Option<PaginationView>,
}

impl RenderSink for RecordingSink {
    fn render_table(&mut self, rows: &[RunRow]) {
        self.renders += 1;
        self.rows = rows.to_vec();
    }

    fn render_charts(&mut self, series: &ChartSeries) {
        self.chart = series.clone();
    }

    fn render_top_list(&mut self, runs: &[TopRun]) {
        self.top = runs.to_vec();
    }

    fn render_pagination(&mut self, pagination: &PaginationView) {
        self.pagination = Some(*pagination);
    }
}

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

fn january() -> DateRange {
    DateRange::new(day("2024-01-01"), day("2024-01-31"))
}

fn draft(date: &str, distance: &str) -> RunDraft {
    RunDraft {
        date: date.to_string(),
        distance: distance.to_string(),
        time: "00:30:00".to_string(),
        ..RunDraft::default()
    }
}

/// One run per day from Jan 1st; id equals the day of month.
fn january_runs(count: u32) -> Vec<RunRecord> {
    (1..=count)
        .map(|dom| {
            draft(&format!("2024-01-{dom:02}"), &format!("{dom}"))
                .validate()
                .unwrap()
                .into_record(i64::from(dom))
        })
        .collect()
}

fn coordinator(
    conn: &Connection,
    runs: Vec<RunRecord>,
) -> ViewCoordinator<SqliteBlobRepository<'_>, RecordingSink> {
    let mut store = RunStore::open(SqliteBlobRepository::try_new(conn).unwrap()).unwrap();
    store.replace_all(runs).unwrap();
    ViewCoordinator::new(store, RecordingSink::default(), january())
}

fn row_ids(sink: &RecordingSink) -> Vec<i64> {
    sink.rows.iter().map(|row| row.id).collect()
}

#[test]
fn load_renders_every_output_from_the_filtered_set() {
    let conn = open_db_in_memory().unwrap();
    let mut runs = january_runs(12);
    let february = draft("2024-02-01", "42")
        .validate()
        .unwrap()
        .into_record(100);
    runs.push(february);
    let mut view = coordinator(&conn, runs);

    view.load().unwrap();

    let sink = view.sink();
    assert_eq!(sink.renders, 1);
    assert_eq!(row_ids(sink), (3..=12).rev().collect::<Vec<_>>());
    assert_eq!(sink.chart.labels.len(), 12);
    assert_eq!(sink.chart.labels[0], "2024-01-01");
    assert_eq!(sink.top.len(), 5);
    assert_eq!(sink.top[0].id, 12);
    assert_eq!(sink.pagination, Some(PaginationView::new(2, 1)));
}

#[test]
fn empty_range_renders_empty_outputs() {
    let conn = open_db_in_memory().unwrap();
    let mut view = coordinator(&conn, january_runs(5));

    view.set_date_range(DateRange::day(day("2023-06-01")));

    let sink = view.sink();
    assert!(sink.rows.is_empty());
    assert!(sink.chart.labels.is_empty());
    assert!(sink.top.is_empty());
    assert!(!sink.pagination.unwrap().visible);
    assert_eq!(view.current_page(), 1);
}

#[test]
fn date_range_change_resets_to_first_page() {
    let conn = open_db_in_memory().unwrap();
    let mut view = coordinator(&conn, january_runs(23));
    view.load().unwrap();
    view.go_to_page(3);
    assert_eq!(view.current_page(), 3);

    view.set_date_range(DateRange::new(day("2024-01-01"), day("2024-01-20")));

    assert_eq!(view.current_page(), 1);
    assert_eq!(view.total_pages(), 2);
    assert_eq!(row_ids(view.sink()), (11..=20).rev().collect::<Vec<_>>());
}

#[test]
fn page_change_reslices_without_touching_derived_metrics() {
    let conn = open_db_in_memory().unwrap();
    let mut view = coordinator(&conn, january_runs(23));
    view.load().unwrap();
    let metrics = view.metrics().clone();

    view.next_page();

    assert_eq!(view.current_page(), 2);
    assert_eq!(row_ids(view.sink()), (4..=13).rev().collect::<Vec<_>>());
    assert_eq!(view.metrics(), &metrics);
    assert_eq!(view.sink().chart, metrics.chart);
    assert_eq!(view.filtered().len(), 23);
}

#[test]
fn page_navigation_is_clamped() {
    let conn = open_db_in_memory().unwrap();
    let mut view = coordinator(&conn, january_runs(23));
    view.load().unwrap();

    view.previous_page();
    assert_eq!(view.current_page(), 1);

    view.go_to_page(99);
    assert_eq!(view.current_page(), 3);
    assert_eq!(row_ids(view.sink()), vec![3, 2, 1]);

    let renders = view.sink().renders;
    view.next_page();
    assert_eq!(view.current_page(), 3);
    assert_eq!(view.sink().renders, renders);
}

#[test]
fn deleting_the_last_page_clamps_current_page() {
    let conn = open_db_in_memory().unwrap();
    let mut view = coordinator(&conn, january_runs(21));
    view.load().unwrap();
    view.go_to_page(3);
    assert_eq!(row_ids(view.sink()), vec![1]);

    assert!(view.delete(1).unwrap());

    assert_eq!(view.current_page(), 2);
    assert_eq!(view.total_pages(), 2);
    assert_eq!(row_ids(view.sink()), (2..=11).rev().collect::<Vec<_>>());
}

#[test]
fn successful_add_renders_new_run() {
    let conn = open_db_in_memory().unwrap();
    let mut view = coordinator(&conn, january_runs(3));
    view.load().unwrap();

    let added = view.add(&draft("2024-01-31", "30")).unwrap();

    assert_eq!(view.sink().renders, 2);
    assert_eq!(view.sink().rows[0].id, added.id);
    assert_eq!(view.sink().top[0].id, added.id);
}

#[test]
fn failed_mutation_renders_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut view = coordinator(&conn, january_runs(3));
    view.load().unwrap();

    assert!(view.add(&draft("2024-01-15", "0")).is_err());
    assert!(view.update(404, &draft("2024-01-15", "5")).is_err());
    assert!(view.import_json(r#"{"runs": []}"#).is_err());

    assert_eq!(view.sink().renders, 1);
    assert_eq!(view.store().len(), 3);
}

#[test]
fn import_replaces_runs_and_renders() {
    let conn = open_db_in_memory().unwrap();
    let mut view = coordinator(&conn, january_runs(3));
    view.load().unwrap();

    let imported = view
        .import_json(
            r#"[{"id": 7, "date": "2024-01-20", "distance": 8, "time": "00:40:00"}]"#,
        )
        .unwrap();

    assert_eq!(imported, 1);
    assert_eq!(row_ids(view.sink()), vec![7]);
    assert_eq!(view.sink().renders, 2);
}
