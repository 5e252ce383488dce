//! Run log import/export payload handling.
//!
//! # Responsibility
//! - Decode run arrays from persisted or imported JSON text.
//! - Encode export documents and name export files.
//!
//! # Invariants
//! - The top-level JSON value must be an array.
//! - A single undecodable element rejects the whole payload.

use crate::model::run::{RunRecord, DATE_FORMAT};
use crate::service::run_store::{StoreError, StoreResult};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;

const EXPORT_FILE_PREFIX: &str = "running_log_";

/// Returns `running_log_<YYYY-MM-DD>.json` for the given export day.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}{}.json", date.format(DATE_FORMAT))
}

/// Encodes runs as a 2-space indented JSON array.
pub fn export_runs_json(records: &[RunRecord]) -> StoreResult<String> {
    serde_json::to_string_pretty(records).map_err(StoreError::Serialization)
}

/// Decodes a JSON array of runs.
///
/// # Errors
/// - `Format` when the text is not JSON, the top-level value is not an
///   array, or an element does not decode into a valid run.
pub fn parse_runs_json(text: &str) -> StoreResult<Vec<RunRecord>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| StoreError::Format(format!("payload is not valid JSON: {err}")))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(StoreError::Format(format!(
                "expected a JSON array of runs, found {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<RunRecord>(item)
                .map_err(|err| StoreError::Format(format!("run at index {index}: {err}")))
        })
        .collect()
}

/// Rejects run sets where two records share an id.
pub fn ensure_unique_ids(records: &[RunRecord]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(StoreError::Format(format!(
                "duplicate run id {}",
                record.id
            )));
        }
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
