//! Read-only ledger views.
//!
//! # Invariants
//! - Every view reads the table from disk; nothing is cached between calls.
//! - Rows come back in stored order, header first, unfiltered.

use crate::model::party::Party;
use crate::model::transaction::{Direction, LedgerKind};
use crate::repo::ledger_repo::{LedgerRepository, LedgerRows};
use crate::store::StoreError;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ViewError {
    /// No table exists yet for this ledger name.
    NotFound(String),
    /// The registry is empty, so there is nothing to browse.
    NoParties,
    Store(StoreError),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "no data found for {name}"),
            Self::NoParties => write!(f, "no parties available"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::NoParties => None,
        }
    }
}

impl From<StoreError> for ViewError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Entry of the ledger browser menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub name: String,
    pub kind: LedgerKind,
}

/// Read-only access to ledger tables for display.
pub struct LedgerReader<R: LedgerRepository> {
    repo: R,
}

impl<R: LedgerRepository> LedgerReader<R> {
    /// Creates a reader over the provided repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every row of `ledger_name`, header included.
    ///
    /// # Errors
    /// - `NotFound` when the table has never been written.
    /// - `Store` when the table exists but cannot be read.
    pub fn view(&self, ledger_name: &str) -> Result<LedgerRows, ViewError> {
        match self.repo.read_all(ledger_name)? {
            Some(rows) => Ok(rows),
            None => {
                debug!("event=ledger_view module=service status=not_found");
                Err(ViewError::NotFound(ledger_name.to_string()))
            }
        }
    }

    /// Viewable ledgers in menu order: `IN`, `OUT`, then parties.
    ///
    /// # Errors
    /// - `NoParties` when `parties` is empty.
    pub fn ledger_menu(&self, parties: &[Party]) -> Result<Vec<LedgerEntry>, ViewError> {
        if parties.is_empty() {
            return Err(ViewError::NoParties);
        }

        let directions = Direction::ALL.iter().map(|direction| LedgerEntry {
            name: direction.as_str().to_string(),
            kind: LedgerKind::DirectionLedger,
        });
        let party_ledgers = parties.iter().map(|party| LedgerEntry {
            name: party.as_str().to_string(),
            kind: LedgerKind::PartyLedger,
        });
        Ok(directions.chain(party_ledgers).collect())
    }
}
