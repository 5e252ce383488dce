//! Derived-view pipeline.
//!
//! # Responsibility
//! - Filter the run set by calendar date range.
//! - Slice the filtered set into pages.
//! - Derive pace, top-N and chart series from the filtered set.
//! - Coordinate one recompute cycle per state change.
//!
//! # Invariants
//! - Table, charts and top list always consume the same filtered set.
//! - Filtering and pagination never reorder records.

pub mod coordinator;
pub mod filter;
pub mod metrics;
pub mod paginate;
