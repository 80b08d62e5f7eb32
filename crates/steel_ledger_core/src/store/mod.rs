//! File storage primitives shared by the registry and ledger repositories.
//!
//! # Responsibility
//! - Map logical ledger names onto file names inside the data directory.
//! - Rewrite whole files so a failed write never leaves a partial file.
//!
//! # Invariants
//! - Distinct ledger names always map to distinct file names.
//! - No file handle outlives the call that opened it.
//! - Nothing here locks: concurrent writers to one file can lose updates.

use crate::model::transaction::LedgerKind;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod files;

pub use files::{ledger_file_name, write_atomically, LEDGER_FILE_SUFFIX};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    InvalidLedgerName(String),
    /// Existing table was created for a different schema.
    HeaderMismatch {
        ledger: String,
        expected: LedgerKind,
        found: Vec<String>,
    },
    /// Row width does not match the table header.
    RowWidth {
        ledger: String,
        expected: usize,
        actual: usize,
    },
    /// The registry could not be loaded, so writing it would drop entries.
    RegistryUnavailable(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Short stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Csv { .. } => "csv",
            Self::InvalidLedgerName(_) => "invalid_ledger_name",
            Self::HeaderMismatch { .. } => "header_mismatch",
            Self::RowWidth { .. } => "row_width",
            Self::RegistryUnavailable(_) => "registry_unavailable",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Csv { path, source } => write!(f, "{}: {source}", path.display()),
            Self::InvalidLedgerName(name) => write!(f, "invalid ledger name `{name}`"),
            Self::HeaderMismatch {
                ledger,
                expected,
                found,
            } => write!(
                f,
                "ledger `{ledger}` header [{}] does not match the {} ledger schema",
                found.join(", "),
                expected.as_str()
            ),
            Self::RowWidth {
                ledger,
                expected,
                actual,
            } => write!(
                f,
                "ledger `{ledger}` expects {expected} columns per row, got {actual}"
            ),
            Self::RegistryUnavailable(reason) => write!(
                f,
                "party registry was not loaded ({reason}); refusing to overwrite it"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::InvalidLedgerName(_)
            | Self::HeaderMismatch { .. }
            | Self::RowWidth { .. }
            | Self::RegistryUnavailable(_) => None,
        }
    }
}
