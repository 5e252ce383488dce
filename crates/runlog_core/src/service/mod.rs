//! Core use-case services.
//!
//! # Responsibility
//! - Own the run set and its persistence round-trips.
//! - Keep CLI and rendering layers decoupled from storage details.

pub mod run_store;
pub mod transfer;
