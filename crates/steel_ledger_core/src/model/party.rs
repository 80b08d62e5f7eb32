//! Party (counterparty) identity.
//!
//! # Invariants
//! - A party name is non-blank and carries no surrounding whitespace.
//! - `IN` and `OUT` are reserved for the direction ledgers in any letter
//!   case, since case-insensitive filesystems map `in_ledger.csv` and
//!   `IN_ledger.csv` to one file.

use crate::model::transaction::Direction;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for a candidate party name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartyNameError {
    Blank,
    Reserved(String),
}

impl Display for PartyNameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "party name cannot be blank"),
            Self::Reserved(name) => {
                write!(f, "party name `{name}` is reserved for a direction ledger")
            }
        }
    }
}

impl Error for PartyNameError {}

/// A counterparty tracked by its display name.
///
/// The name doubles as the ledger name of the party's own table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party(String);

impl Party {
    /// Parses user input into a party name.
    ///
    /// Surrounding whitespace is trimmed before the checks run.
    pub fn parse(raw: &str) -> Result<Self, PartyNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PartyNameError::Blank);
        }
        let reserved = Direction::ALL
            .iter()
            .any(|direction| direction.as_str().eq_ignore_ascii_case(trimmed));
        if reserved {
            return Err(PartyNameError::Reserved(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Display name, also used as the party's ledger name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the party and returns its name.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Party {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Party {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Party {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Party {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
