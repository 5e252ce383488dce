//! Domain model for logged running sessions.
//!
//! # Responsibility
//! - Define the canonical run record and its validation rules.
//!
//! # Invariants
//! - Every record is identified by a stable `RunId`.
//! - Records are hard-deleted; there are no tombstones.

pub mod run;
