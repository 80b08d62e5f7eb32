//! Domain model for material movements and the parties they belong to.
//!
//! # Responsibility
//! - Define the value objects handed from the front-end into core use cases.
//! - Own the two ledger table schemas and the `"N/A"` sentinel.
//!
//! # Invariants
//! - A `Transaction` is built once per submission and never read back from
//!   live form state.
//! - Ledger schemas are fixed; a table never changes its header.

pub mod party;
pub mod transaction;
