//! Repository contracts and file-backed implementations.
//!
//! # Responsibility
//! - Persist the party registry and the ledger tables.
//! - Keep file formats (line-delimited text, CSV) out of the services.
//!
//! # Invariants
//! - Ledger tables are append-only; rows are never edited or reordered.
//! - Every write rewrites the whole file through `store::write_atomically`.

pub mod ledger_repo;
pub mod party_repo;
