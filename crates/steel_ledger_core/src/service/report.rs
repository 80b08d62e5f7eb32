//! User-facing outcome reports.
//!
//! The core decides what to tell the operator; the front-end decides how to
//! show it.

use crate::service::ledger_reader::ViewError;
use crate::service::transaction_recorder::SubmitError;
use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
}

/// Title + message pair shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub level: ReportLevel,
    pub title: String,
    pub message: String,
}

impl Report {
    /// Builds a report from its parts.
    pub fn new(level: ReportLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Submission written to both ledgers.
    pub fn success() -> Self {
        Self::new(ReportLevel::Info, "Success", "Data entered successfully.")
    }

    /// Submission rejected for blank required fields.
    pub fn missing_information() -> Self {
        Self::new(
            ReportLevel::Warning,
            "Missing Information",
            "Please fill out all required fields.",
        )
    }

    /// No table exists yet for `ledger_name`.
    pub fn no_data(ledger_name: &str) -> Self {
        Self::new(
            ReportLevel::Warning,
            "File Not Found",
            format!("No data found for {ledger_name}."),
        )
    }

    /// Ledger browser opened with an empty registry.
    pub fn no_parties() -> Self {
        Self::new(
            ReportLevel::Warning,
            "No Parties",
            "No parties available. Please add parties through the data entry screen.",
        )
    }

    /// File-level failure, with the error text as message.
    pub fn storage_failure(message: impl Into<String>) -> Self {
        Self::new(ReportLevel::Error, "Storage Error", message)
    }

    /// Report for the outcome of a submission.
    pub fn for_submit(outcome: &Result<(), SubmitError>) -> Self {
        match outcome {
            Ok(()) => Self::success(),
            Err(SubmitError::MissingFields(_)) => Self::missing_information(),
            Err(err @ SubmitError::PartialWriteDivergence { .. }) => Self::new(
                ReportLevel::Error,
                "Ledgers Out Of Sync",
                format!("{err}. Re-submit or reconcile the ledgers manually."),
            ),
            Err(err @ SubmitError::WriteFailed { .. }) => Self::storage_failure(err.to_string()),
        }
    }

    /// Report for a failed view or menu request.
    pub fn for_view_error(err: &ViewError) -> Self {
        match err {
            ViewError::NotFound(name) => Self::no_data(name),
            ViewError::NoParties => Self::no_parties(),
            ViewError::Store(err) => Self::storage_failure(err.to_string()),
        }
    }
}

/// Receives reports from core operations.
pub trait Reporter {
    fn report(&self, report: &Report);
}

/// Reporter that only writes reports to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, report: &Report) {
        match report.level {
            ReportLevel::Info => info!("event=report title={:?}", report.title),
            ReportLevel::Warning => warn!("event=report title={:?}", report.title),
            ReportLevel::Error => error!(
                "event=report title={:?} message={:?}",
                report.title, report.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Report, ReportLevel};
    use crate::service::ledger_reader::ViewError;
    use crate::service::transaction_recorder::SubmitError;
    use crate::store::StoreError;

    #[test]
    fn submit_outcomes_map_to_reports() {
        assert_eq!(Report::for_submit(&Ok(())).title, "Success");
        assert_eq!(
            Report::for_submit(&Err(SubmitError::MissingFields(vec!["weight"]))),
            Report::missing_information()
        );

        let divergence = Report::for_submit(&Err(SubmitError::PartialWriteDivergence {
            written: "IN".to_string(),
            failed: "Acme".to_string(),
            source: StoreError::InvalidLedgerName("Acme".to_string()),
        }));
        assert_eq!(divergence.level, ReportLevel::Error);
        assert!(divergence.message.contains("`IN` was updated"));
    }

    #[test]
    fn view_errors_map_to_reports() {
        let report = Report::for_view_error(&ViewError::NotFound("Bravo".to_string()));
        assert_eq!(report.title, "File Not Found");
        assert_eq!(report.message, "No data found for Bravo.");
        assert_eq!(
            Report::for_view_error(&ViewError::NoParties),
            Report::no_parties()
        );
    }
}
