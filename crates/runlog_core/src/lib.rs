//! Core domain logic for the running log.
//! This crate is the single source of truth for run record invariants and
//! the derived-view pipeline.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::run::{
    Feeling, RunDraft, RunFields, RunId, RunRecord, RunTime, RunValidationError, DATE_FORMAT,
};
pub use db::{StorageError, StorageResult};
pub use repo::blob_repo::{BlobRepository, SqliteBlobRepository};
pub use service::run_store::{RunStore, StoreError, StoreResult, RUNS_STORAGE_KEY};
pub use service::transfer::{export_file_name, parse_runs_json};
pub use view::coordinator::{RenderSink, ViewCoordinator};
pub use view::filter::{filter_by_date_range, DateRange};
pub use view::metrics::{
    chart_series, feeling_icon, feeling_label, pace, pace_minutes, run_row, top_n, top_run,
    ChartSeries, DerivedMetrics, RunRow, TopRun, DEFAULT_TOP_N,
};
pub use view::paginate::{paginate, Page, PaginationView, DEFAULT_PAGE_SIZE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
