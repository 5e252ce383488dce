//! Run store service.
//!
//! # Responsibility
//! - Own the full in-memory run set for the process.
//! - Apply add/update/delete/replace mutations and flush after each one.
//!
//! # Invariants
//! - `runs` is always sorted by date descending; same-day records keep
//!   their relative order.
//! - Run ids are unique and never reassigned.
//! - A failed mutation (validation, persistence) leaves memory unchanged.
//! - Every flush is verified by reading the stored payload back.

use crate::model::run::{RunDraft, RunId, RunRecord, RunValidationError};
use crate::db::StorageError;
use crate::repo::blob_repo::BlobRepository;
use crate::service::transfer::{ensure_unique_ids, export_runs_json, parse_runs_json};
use chrono::Utc;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key holding the serialized run array.
pub const RUNS_STORAGE_KEY: &str = "runningLog";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error surfaced to form, import and export callers.
#[derive(Debug)]
pub enum StoreError {
    /// Form input failed field validation.
    Validation(RunValidationError),
    /// Update referenced an unknown run id.
    NotFound(RunId),
    /// Imported or persisted payload has the wrong shape.
    Format(String),
    /// Export was requested for an empty log.
    NothingToExport,
    /// Run set could not be encoded.
    Serialization(serde_json::Error),
    /// Persistence collaborator failure.
    Persistence(StorageError),
    /// Read-back after write did not match the written payload.
    InconsistentState(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid run: {err}"),
            Self::NotFound(id) => write!(f, "run not found: {id}"),
            Self::Format(message) => write!(f, "invalid run log format: {message}"),
            Self::NothingToExport => write!(f, "there are no runs to export"),
            Self::Serialization(err) => write!(f, "failed to encode runs: {err}"),
            Self::Persistence(err) => write!(f, "failed to persist runs: {err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent run log state: {details}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RunValidationError> for StoreError {
    fn from(value: RunValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Persistence(value)
    }
}

/// In-memory run set backed by a blob repository.
pub struct RunStore<R: BlobRepository> {
    repo: R,
    runs: Vec<RunRecord>,
}

impl<R: BlobRepository> RunStore<R> {
    /// Creates an empty, not yet loaded store.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            runs: Vec::new(),
        }
    }

    /// Creates a store and loads persisted runs.
    pub fn open(repo: R) -> StoreResult<Self> {
        let mut store = Self::new(repo);
        store.load()?;
        Ok(store)
    }

    /// Reloads the full run set from persistence.
    ///
    /// An absent key yields an empty log. Persisted data is re-sorted so the
    /// ordering invariant holds even after external edits.
    pub fn load(&mut self) -> StoreResult<()> {
        let mut runs = match self.repo.get(RUNS_STORAGE_KEY)? {
            Some(text) => parse_runs_json(&text)?,
            None => Vec::new(),
        };
        ensure_unique_ids(&runs)?;
        sort_by_date_desc(&mut runs);
        self.runs = runs;

        info!(
            "event=store_load module=store status=ok total={}",
            self.runs.len()
        );
        Ok(())
    }

    /// Validates and inserts a new run, returning the stored record.
    pub fn add(&mut self, draft: &RunDraft) -> StoreResult<RunRecord> {
        let fields = draft.validate().inspect_err(|err| {
            warn!("event=run_add module=store status=rejected reason={err}");
        })?;
        let record = fields.into_record(self.next_id());

        let previous = self.runs.clone();
        self.runs.push(record.clone());
        sort_by_date_desc(&mut self.runs);
        self.commit(previous)?;

        info!(
            "event=run_add module=store status=ok run_id={} total={}",
            record.id,
            self.runs.len()
        );
        Ok(record)
    }

    /// Replaces every field of run `id` except its identity.
    ///
    /// # Errors
    /// - `NotFound` when no run has `id`.
    /// - `Validation` when the draft is invalid; the store is untouched.
    pub fn update(&mut self, id: RunId, draft: &RunDraft) -> StoreResult<RunRecord> {
        let index = self
            .position(id)
            .ok_or(StoreError::NotFound(id))
            .inspect_err(|_| {
                warn!("event=run_update module=store status=not_found run_id={id}");
            })?;
        let fields = draft.validate().inspect_err(|err| {
            warn!("event=run_update module=store status=rejected run_id={id} reason={err}");
        })?;
        let record = fields.into_record(id);

        let previous = self.runs.clone();
        self.runs[index] = record.clone();
        sort_by_date_desc(&mut self.runs);
        self.commit(previous)?;

        info!("event=run_update module=store status=ok run_id={id}");
        Ok(record)
    }

    /// Removes run `id`. Returns `false` without writing when it is absent.
    pub fn delete(&mut self, id: RunId) -> StoreResult<bool> {
        let Some(index) = self.position(id) else {
            debug!("event=run_delete module=store status=noop run_id={id}");
            return Ok(false);
        };

        let previous = self.runs.clone();
        self.runs.remove(index);
        self.commit(previous)?;

        info!(
            "event=run_delete module=store status=ok run_id={} total={}",
            id,
            self.runs.len()
        );
        Ok(true)
    }

    /// Replaces the whole run set (import path).
    ///
    /// # Errors
    /// - `Format` when two records share an id.
    pub fn replace_all(&mut self, records: Vec<RunRecord>) -> StoreResult<()> {
        ensure_unique_ids(&records)?;

        let mut records = records;
        sort_by_date_desc(&mut records);
        let previous = std::mem::replace(&mut self.runs, records);
        self.commit(previous)?;

        info!(
            "event=store_replace module=store status=ok total={}",
            self.runs.len()
        );
        Ok(())
    }

    /// Decodes an import payload and replaces the run set with it.
    ///
    /// Returns the number of imported runs.
    pub fn import_json(&mut self, text: &str) -> StoreResult<usize> {
        let records = parse_runs_json(text).inspect_err(|err| {
            warn!("event=store_import module=store status=rejected reason={err}");
        })?;
        self.replace_all(records)?;
        Ok(self.runs.len())
    }

    /// Returns the current run set verbatim, newest first.
    pub fn export_snapshot(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Encodes the run set as a pretty-printed export document.
    pub fn export_json(&self) -> StoreResult<String> {
        if self.runs.is_empty() {
            return Err(StoreError::NothingToExport);
        }
        export_runs_json(&self.runs)
    }

    /// Looks up one run by id.
    pub fn get(&self, id: RunId) -> Option<&RunRecord> {
        self.runs.iter().find(|run| run.id == id)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    fn position(&self, id: RunId) -> Option<usize> {
        self.runs.iter().position(|run| run.id == id)
    }

    /// Wall-clock milliseconds, bumped past the newest id when the clock
    /// has not advanced. Imported ids may sit at `RunId::MAX`; the first
    /// free id from `now` is used then.
    fn next_id(&self) -> RunId {
        let now = Utc::now().timestamp_millis();
        match self.runs.iter().map(|run| run.id).max() {
            Some(max_id) if max_id >= now => max_id
                .checked_add(1)
                .unwrap_or_else(|| self.first_free_id_from(now)),
            _ => now,
        }
    }

    fn first_free_id_from(&self, start: RunId) -> RunId {
        let taken: HashSet<RunId> = self.runs.iter().map(|run| run.id).collect();
        (start..=RunId::MAX)
            .find(|id| !taken.contains(id))
            .unwrap_or(start)
    }

    fn commit(&mut self, previous: Vec<RunRecord>) -> StoreResult<()> {
        if let Err(err) = self.flush() {
            warn!("event=store_flush module=store status=error rollback=true error={err}");
            self.runs = previous;
            return Err(err);
        }
        Ok(())
    }

    fn flush(&self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.runs).map_err(StoreError::Serialization)?;
        self.repo.set(RUNS_STORAGE_KEY, &payload)?;

        let stored = self.repo.get(RUNS_STORAGE_KEY)?;
        if stored.as_deref() != Some(payload.as_str()) {
            return Err(StoreError::InconsistentState(
                "stored run log differs from written payload",
            ));
        }
        Ok(())
    }
}

/// Stable sort by calendar date, newest first.
pub fn sort_by_date_desc(runs: &mut [RunRecord]) {
    runs.sort_by(|a, b| b.date.cmp(&a.date));
}
