//! Transaction value object and ledger schemas.
//!
//! # Responsibility
//! - Carry one logical movement from the front-end into the recorder.
//! - Define the direction-ledger and party-ledger table headers.
//!
//! # Invariants
//! - `party`, `date`, `weight` and `car_number` must be non-blank before the
//!   transaction is accepted; `direction` is always present by construction.
//! - Weight and car number are opaque text; no numeric parsing happens here.
//! - An optional field resolves to [`NOT_APPLICABLE`] unless its include flag
//!   is set, in which case its text is used verbatim (blank included).

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sentinel written for an optional field that was not supplied.
pub const NOT_APPLICABLE: &str = "N/A";

/// Number of columns in both ledger schemas.
pub const LEDGER_COLUMNS: usize = 6;

/// Header of the `IN` / `OUT` tables.
pub const DIRECTION_LEDGER_HEADER: [&str; LEDGER_COLUMNS] = [
    "Party",
    "Date",
    "Weight",
    "Car No.",
    "Towards Party",
    "Description",
];

/// Header of a party's own table.
pub const PARTY_LEDGER_HEADER: [&str; LEDGER_COLUMNS] = [
    "Action",
    "Date",
    "Weight",
    "Car No.",
    "Towards Party",
    "Description",
];

/// Format used for [`DateChoice::Current`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Movement direction of material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Both directions, in menu order.
    pub const ALL: [Direction; 2] = [Direction::In, Direction::Out];

    /// Ledger name (and `Action` column value) for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two views a ledger table belongs to.
///
/// Carried next to the ledger name so the schema is picked explicitly
/// instead of being guessed from the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    /// `IN` / `OUT` table spanning all parties.
    DirectionLedger,
    /// Table of every movement for one party.
    PartyLedger,
}

impl LedgerKind {
    /// Header row written when a table of this kind is created.
    pub fn header(self) -> [&'static str; LEDGER_COLUMNS] {
        match self {
            Self::DirectionLedger => DIRECTION_LEDGER_HEADER,
            Self::PartyLedger => PARTY_LEDGER_HEADER,
        }
    }

    /// Short label used in logs and menus.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectionLedger => "direction",
            Self::PartyLedger => "party",
        }
    }
}

/// Date source picked on the entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateChoice {
    /// Today's local date at build time.
    Current,
    /// User-typed text, kept as-is.
    Custom(String),
}

impl DateChoice {
    /// Date text to store, `YYYY-MM-DD` for `Current`.
    pub fn resolve(&self) -> String {
        match self {
            Self::Current => Local::now().format(DATE_FORMAT).to_string(),
            Self::Custom(text) => text.clone(),
        }
    }
}

/// Checkbox + text pair for an optional column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalField {
    pub include: bool,
    pub text: String,
}

impl OptionalField {
    /// Field with its include flag set.
    pub fn included(text: impl Into<String>) -> Self {
        Self {
            include: true,
            text: text.into(),
        }
    }

    /// Field written as [`NOT_APPLICABLE`].
    pub fn excluded() -> Self {
        Self::default()
    }

    /// Value written to the ledger row.
    pub fn resolve(&self) -> &str {
        if self.include {
            &self.text
        } else {
            NOT_APPLICABLE
        }
    }
}

/// Raised when required transaction fields are blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    /// Names of the blank required fields, in form order.
    MissingFields(Vec<&'static str>),
}

impl Display for TransactionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
        }
    }
}

impl Error for TransactionValidationError {}

/// One logical material movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub party: String,
    pub direction: Direction,
    /// `YYYY-MM-DD` by convention; not format-checked.
    pub date: String,
    pub weight: String,
    pub car_number: String,
    pub towards_party: OptionalField,
    pub description: OptionalField,
}

impl Transaction {
    /// Builds a transaction with both optional fields excluded.
    ///
    /// The date is resolved here, so a `Current` choice is pinned to the
    /// moment of submission.
    pub fn new(
        party: impl Into<String>,
        direction: Direction,
        date: &DateChoice,
        weight: impl Into<String>,
        car_number: impl Into<String>,
    ) -> Self {
        Self {
            party: party.into(),
            direction,
            date: date.resolve(),
            weight: weight.into(),
            car_number: car_number.into(),
            towards_party: OptionalField::excluded(),
            description: OptionalField::excluded(),
        }
    }

    /// Sets the `Towards Party` column.
    pub fn with_towards_party(mut self, field: OptionalField) -> Self {
        self.towards_party = field;
        self
    }

    /// Sets the `Description` column.
    pub fn with_description(mut self, field: OptionalField) -> Self {
        self.description = field;
        self
    }

    /// Checks required fields.
    ///
    /// # Errors
    /// - `MissingFields` listing every blank required field.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        let missing: Vec<&'static str> = [
            ("party", self.party.as_str()),
            ("date", self.date.as_str()),
            ("weight", self.weight.as_str()),
            ("car_number", self.car_number.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(TransactionValidationError::MissingFields(missing))
        }
    }

    /// Row for the `IN`/`OUT` table.
    pub fn direction_ledger_row(&self) -> Vec<String> {
        self.row_with_lead(self.party.clone())
    }

    /// Row for the party's own table; `Action` holds the direction.
    pub fn party_ledger_row(&self) -> Vec<String> {
        self.row_with_lead(self.direction.as_str().to_string())
    }

    fn row_with_lead(&self, lead: String) -> Vec<String> {
        vec![
            lead,
            self.date.clone(),
            self.weight.clone(),
            self.car_number.clone(),
            self.towards_party.resolve().to_string(),
            self.description.resolve().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction::new(
            "Acme",
            Direction::In,
            &DateChoice::Custom("2024-01-05".to_string()),
            "1000",
            "CAR-7",
        )
    }

    #[test]
    fn current_date_uses_iso_layout() {
        let date = DateChoice::Current.resolve();
        assert_eq!(date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&date, DATE_FORMAT).is_ok());
    }

    #[test]
    fn validate_lists_every_blank_required_field() {
        let mut tx = sample();
        tx.weight.clear();
        tx.car_number = "   ".to_string();

        assert_eq!(
            tx.validate().unwrap_err(),
            TransactionValidationError::MissingFields(vec!["weight", "car_number"])
        );
    }

    #[test]
    fn rows_share_columns_after_the_lead() {
        let tx = sample().with_description(OptionalField::included("rebar"));

        assert_eq!(
            tx.direction_ledger_row(),
            vec!["Acme", "2024-01-05", "1000", "CAR-7", "N/A", "rebar"]
        );
        assert_eq!(
            tx.party_ledger_row(),
            vec!["IN", "2024-01-05", "1000", "CAR-7", "N/A", "rebar"]
        );
    }

    #[test]
    fn included_blank_field_is_kept_blank() {
        let field = OptionalField::included("");
        assert_eq!(field.resolve(), "");
    }
}
