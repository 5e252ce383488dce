//! View coordinator: one recompute contract for every state change.
//!
//! # Responsibility
//! - Own the run store, the active date range and the current page.
//! - Re-filter, re-paginate and re-derive metrics after every event.
//! - Hand table rows, chart series, top list and pagination state to a
//!   `RenderSink`.
//!
//! # Invariants
//! - The filter runs once per recompute; its result feeds every output.
//! - Page changes re-slice the cached filtered set without re-filtering.
//! - `current_page` is always within `[1, max(total_pages, 1)]` after a
//!   render.
//! - A failed mutation renders nothing and leaves view state untouched.

use crate::model::run::{RunDraft, RunId, RunRecord};
use crate::repo::blob_repo::BlobRepository;
use crate::service::run_store::{RunStore, StoreResult};
use crate::view::filter::{filter_by_date_range, DateRange};
use crate::view::metrics::{run_row, ChartSeries, DerivedMetrics, RunRow, TopRun};
use crate::view::paginate::{clamp_page, paginate, total_pages, PaginationView, DEFAULT_PAGE_SIZE};
use log::debug;

/// Rendering collaborator fed by the coordinator.
pub trait RenderSink {
    /// Rows of the current page; empty when the filtered set is empty.
    fn render_table(&mut self, rows: &[RunRow]);
    fn render_charts(&mut self, series: &ChartSeries);
    fn render_top_list(&mut self, runs: &[TopRun]);
    fn render_pagination(&mut self, pagination: &PaginationView);
}

/// Owned view state plus the store it derives from.
pub struct ViewCoordinator<R: BlobRepository, S: RenderSink> {
    store: RunStore<R>,
    sink: S,
    range: DateRange,
    page_size: usize,
    current_page: usize,
    filtered: Vec<RunRecord>,
    metrics: DerivedMetrics,
}

impl<R: BlobRepository, S: RenderSink> ViewCoordinator<R, S> {
    /// Creates a coordinator on page 1. Nothing is rendered until the first
    /// event.
    pub fn new(store: RunStore<R>, sink: S, range: DateRange) -> Self {
        Self {
            store,
            sink,
            range,
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            filtered: Vec::new(),
            metrics: DerivedMetrics::default(),
        }
    }

    /// Overrides the rows-per-page setting (zero counts as one).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Starts on `page`; it is clamped on the next recompute.
    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page.max(1);
        self
    }

    /// Reloads persisted runs and renders.
    pub fn load(&mut self) -> StoreResult<()> {
        self.store.load()?;
        self.recompute();
        Ok(())
    }

    /// Applies a new date range and resets to the first page.
    pub fn set_date_range(&mut self, range: DateRange) {
        self.range = range;
        self.current_page = 1;
        self.recompute();
    }

    /// Moves to `page` (clamped) and re-renders from the cached filtered set.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = clamp_page(page, self.total_pages());
        debug!(
            "event=view_page module=view status=ok page={} total_pages={}",
            self.current_page,
            self.total_pages()
        );
        self.render();
    }

    /// Advances one page; a no-op on the last page.
    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.go_to_page(self.current_page + 1);
        }
    }

    /// Goes back one page; a no-op on the first page.
    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.go_to_page(self.current_page - 1);
        }
    }

    pub fn add(&mut self, draft: &RunDraft) -> StoreResult<RunRecord> {
        let record = self.store.add(draft)?;
        self.recompute();
        Ok(record)
    }

    pub fn update(&mut self, id: RunId, draft: &RunDraft) -> StoreResult<RunRecord> {
        let record = self.store.update(id, draft)?;
        self.recompute();
        Ok(record)
    }

    pub fn delete(&mut self, id: RunId) -> StoreResult<bool> {
        let removed = self.store.delete(id)?;
        self.recompute();
        Ok(removed)
    }

    /// Replaces the run set from an import payload and renders.
    pub fn import_json(&mut self, text: &str) -> StoreResult<usize> {
        let imported = self.store.import_json(text)?;
        self.recompute();
        Ok(imported)
    }

    /// Runs one full cycle: filter, clamp page, derive metrics, render.
    pub fn recompute(&mut self) {
        self.filtered = filter_by_date_range(self.store.export_snapshot(), &self.range)
            .into_iter()
            .cloned()
            .collect();
        self.current_page = clamp_page(self.current_page, self.total_pages());

        let filtered: Vec<&RunRecord> = self.filtered.iter().collect();
        self.metrics = DerivedMetrics::derive(&filtered);

        debug!(
            "event=view_recompute module=view status=ok filtered={} total_pages={} page={}",
            self.filtered.len(),
            self.total_pages(),
            self.current_page
        );
        self.render();
    }

    pub fn store(&self) -> &RunStore<R> {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page count of the cached filtered set.
    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page_size)
    }

    /// Filtered set from the last recompute, newest first.
    pub fn filtered(&self) -> &[RunRecord] {
        &self.filtered
    }

    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    fn render(&mut self) {
        let page = paginate(&self.filtered, self.page_size, self.current_page);
        let rows: Vec<RunRow> = page.items.iter().map(run_row).collect();
        let pagination = PaginationView::new(page.total_pages, self.current_page);

        self.sink.render_table(&rows);
        self.sink.render_charts(&self.metrics.chart);
        self.sink.render_top_list(&self.metrics.top_runs);
        self.sink.render_pagination(&pagination);
    }
}
