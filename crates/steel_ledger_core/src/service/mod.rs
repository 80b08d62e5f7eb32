//! Core use cases called by the front-end.
//!
//! # Responsibility
//! - Orchestrate repository calls into registry, submit and view operations.
//! - Translate outcomes into user-facing reports.
//!
//! # Invariants
//! - Services stay storage-agnostic; file formats live in `repo`.

pub mod ledger_reader;
pub mod party_registry;
pub mod report;
pub mod transaction_recorder;
