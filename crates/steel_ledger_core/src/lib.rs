//! Core ledger logic for recording inbound/outbound material movements.
//! This crate owns every persistence invariant; front-ends only collect
//! fields and render rows.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::StorageConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::party::{Party, PartyNameError};
pub use model::transaction::{
    DateChoice, Direction, LedgerKind, OptionalField, Transaction, TransactionValidationError,
    DIRECTION_LEDGER_HEADER, NOT_APPLICABLE, PARTY_LEDGER_HEADER,
};
pub use repo::ledger_repo::{CsvLedgerRepository, LedgerRepository, LedgerRows};
pub use repo::party_repo::{FilePartyRepository, PartyRepository};
pub use service::ledger_reader::{LedgerEntry, LedgerReader, ViewError};
pub use service::party_registry::PartyRegistry;
pub use service::report::{LogReporter, Report, ReportLevel, Reporter};
pub use service::transaction_recorder::{SubmitError, TransactionRecorder};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
