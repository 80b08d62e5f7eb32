//! Dual-write submission of one transaction.
//!
//! # Responsibility
//! - Gate submissions on required fields.
//! - Write the same movement to its direction ledger, then its party ledger.
//!
//! # Invariants
//! - A rejected transaction writes nothing.
//! - Both appends are attempted once validation passes.
//! - A half-applied submission is reported as divergence and left as-is;
//!   nothing is rolled back or repaired.

use crate::logging::log_field;
use crate::model::transaction::{LedgerKind, Transaction, TransactionValidationError};
use crate::repo::ledger_repo::LedgerRepository;
use crate::service::report::{Report, Reporter};
use crate::store::{StoreError, StoreResult};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum SubmitError {
    /// Blank required fields, by name. Nothing was written.
    MissingFields(Vec<&'static str>),
    /// One ledger took the row and the other did not; the views disagree.
    PartialWriteDivergence {
        written: String,
        failed: String,
        source: StoreError,
    },
    /// Neither ledger took the row.
    WriteFailed {
        direction: StoreError,
        party: StoreError,
    },
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::PartialWriteDivergence {
                written,
                failed,
                source,
            } if written == failed => write!(
                f,
                "ledger `{written}` took one of the two rows for this transaction and rejected the other: {source}"
            ),
            Self::PartialWriteDivergence {
                written,
                failed,
                source,
            } => write!(
                f,
                "ledger `{written}` was updated but ledger `{failed}` was not: {source}"
            ),
            Self::WriteFailed { direction, party } => {
                write!(f, "no ledger was updated: {direction}; {party}")
            }
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingFields(_) => None,
            Self::PartialWriteDivergence { source, .. } => Some(source),
            Self::WriteFailed { direction, .. } => Some(direction),
        }
    }
}

impl From<TransactionValidationError> for SubmitError {
    fn from(value: TransactionValidationError) -> Self {
        match value {
            TransactionValidationError::MissingFields(fields) => Self::MissingFields(fields),
        }
    }
}

/// Records transactions into the direction and party ledgers.
pub struct TransactionRecorder<R: LedgerRepository> {
    repo: R,
}

impl<R: LedgerRepository> TransactionRecorder<R> {
    /// Creates a recorder writing through the provided repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and writes `transaction` to both ledgers.
    ///
    /// # Errors
    /// - `MissingFields` before any write.
    /// - `PartialWriteDivergence` when exactly one ledger was updated.
    /// - `WriteFailed` when neither was.
    pub fn submit(&self, transaction: &Transaction) -> Result<(), SubmitError> {
        if let Err(err) = transaction.validate() {
            warn!(
                "event=transaction_submit module=service status=rejected error={}",
                err
            );
            return Err(err.into());
        }

        let direction_ledger = transaction.direction.as_str();
        let party_ledger = transaction.party.as_str();

        let direction_result = self.repo.append(
            direction_ledger,
            LedgerKind::DirectionLedger,
            &transaction.direction_ledger_row(),
        );
        let party_result = self.repo.append(
            party_ledger,
            LedgerKind::PartyLedger,
            &transaction.party_ledger_row(),
        );

        let outcome = combine(direction_ledger, party_ledger, direction_result, party_result);
        match &outcome {
            Ok(()) => info!(
                "event=transaction_submit module=service status=ok direction={} party={}",
                direction_ledger,
                log_field(party_ledger)
            ),
            Err(err) => error!(
                "event=transaction_submit module=service status=error direction={} party={} error={}",
                direction_ledger,
                log_field(party_ledger),
                log_field(&err.to_string())
            ),
        }
        outcome
    }

    /// Same as [`submit`](Self::submit), also handing the matching report to
    /// `reporter`.
    pub fn submit_and_report(
        &self,
        transaction: &Transaction,
        reporter: &dyn Reporter,
    ) -> Result<(), SubmitError> {
        let outcome = self.submit(transaction);
        reporter.report(&Report::for_submit(&outcome));
        outcome
    }
}

fn combine(
    direction_ledger: &str,
    party_ledger: &str,
    direction_result: StoreResult<usize>,
    party_result: StoreResult<usize>,
) -> Result<(), SubmitError> {
    match (direction_result, party_result) {
        (Ok(_), Ok(_)) => Ok(()),
        (Ok(_), Err(source)) => Err(SubmitError::PartialWriteDivergence {
            written: direction_ledger.to_string(),
            failed: party_ledger.to_string(),
            source,
        }),
        (Err(source), Ok(_)) => Err(SubmitError::PartialWriteDivergence {
            written: party_ledger.to_string(),
            failed: direction_ledger.to_string(),
            source,
        }),
        (Err(direction), Err(party)) => Err(SubmitError::WriteFailed { direction, party }),
    }
}
