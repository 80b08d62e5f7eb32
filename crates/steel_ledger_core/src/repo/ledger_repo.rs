//! Ledger table contracts and CSV implementation.
//!
//! # Responsibility
//! - Create a table with its schema header on first write.
//! - Append rows by reading the whole table and rewriting it.
//! - Return a table in full, header included, exactly as stored.
//!
//! # Invariants
//! - A table's header never changes once written.
//! - Appends land after every existing row.
//! - Append is a read-modify-write with no locking: two writers appending
//!   to the same ledger at once can lose one row. Callers serialize.

use crate::config::StorageConfig;
use crate::logging::log_field;
use crate::model::transaction::LedgerKind;
use crate::store::{ledger_file_name, write_atomically, StoreError, StoreResult};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// All rows of one table, header first.
pub type LedgerRows = Vec<Vec<String>>;

/// Storage contract for named ledger tables.
pub trait LedgerRepository {
    /// Appends `row` to `ledger_name`, creating the table with the header of
    /// `kind` if it does not exist yet.
    ///
    /// Returns the number of data rows after the append.
    fn append(&self, ledger_name: &str, kind: LedgerKind, row: &[String]) -> StoreResult<usize>;

    fn exists(&self, ledger_name: &str) -> bool;

    /// Full table contents, or `None` when no table exists for the name.
    fn read_all(&self, ledger_name: &str) -> StoreResult<Option<LedgerRows>>;
}

impl<T: LedgerRepository + ?Sized> LedgerRepository for &T {
    fn append(&self, ledger_name: &str, kind: LedgerKind, row: &[String]) -> StoreResult<usize> {
        (**self).append(ledger_name, kind, row)
    }

    fn exists(&self, ledger_name: &str) -> bool {
        (**self).exists(ledger_name)
    }

    fn read_all(&self, ledger_name: &str) -> StoreResult<Option<LedgerRows>> {
        (**self).read_all(ledger_name)
    }
}

/// One CSV file per ledger inside a data directory.
#[derive(Debug, Clone)]
pub struct CsvLedgerRepository {
    data_dir: PathBuf,
}

impl CsvLedgerRepository {
    /// Creates a repository storing tables under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Creates a repository for the configured data dir.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.data_dir())
    }

    /// Path of the table backing `ledger_name`.
    pub fn table_path(&self, ledger_name: &str) -> StoreResult<PathBuf> {
        Ok(self.data_dir.join(ledger_file_name(ledger_name)?))
    }

    fn create_table(&self, ledger_name: &str, path: &Path, kind: LedgerKind) -> StoreResult<()> {
        write_table(path, &[header_row(kind)])?;
        info!(
            "event=ledger_create module=repo status=ok ledger={} kind={}",
            log_field(ledger_name),
            kind.as_str()
        );
        Ok(())
    }

    fn append_inner(
        &self,
        ledger_name: &str,
        kind: LedgerKind,
        row: &[String],
    ) -> StoreResult<usize> {
        let header = kind.header();
        if row.len() != header.len() {
            return Err(StoreError::RowWidth {
                ledger: ledger_name.to_string(),
                expected: header.len(),
                actual: row.len(),
            });
        }

        let path = self.table_path(ledger_name)?;
        if !path.is_file() {
            self.create_table(ledger_name, &path, kind)?;
        }

        let mut rows = read_table(&path)?;
        if rows.is_empty() {
            // A zero-length file carries no schema yet.
            rows.push(header_row(kind));
        } else if rows[0].iter().map(String::as_str).ne(header.iter().copied()) {
            return Err(StoreError::HeaderMismatch {
                ledger: ledger_name.to_string(),
                expected: kind,
                found: rows[0].clone(),
            });
        }

        rows.push(row.to_vec());
        write_table(&path, &rows)?;
        Ok(rows.len() - 1)
    }
}

impl LedgerRepository for CsvLedgerRepository {
    fn append(&self, ledger_name: &str, kind: LedgerKind, row: &[String]) -> StoreResult<usize> {
        let started_at = Instant::now();
        let result = self.append_inner(ledger_name, kind, row);
        match &result {
            Ok(data_rows) => info!(
                "event=ledger_append module=repo status=ok ledger={} kind={} rows={} duration_ms={}",
                log_field(ledger_name),
                kind.as_str(),
                data_rows,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=ledger_append module=repo status=error ledger={} kind={} duration_ms={} error_code={} error={}",
                log_field(ledger_name),
                kind.as_str(),
                started_at.elapsed().as_millis(),
                err.code(),
                log_field(&err.to_string())
            ),
        }
        result
    }

    fn exists(&self, ledger_name: &str) -> bool {
        self.table_path(ledger_name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    fn read_all(&self, ledger_name: &str) -> StoreResult<Option<LedgerRows>> {
        let path = self.table_path(ledger_name)?;
        if !path.is_file() {
            return Ok(None);
        }
        let rows = read_table(&path)?;
        info!(
            "event=ledger_read module=repo status=ok ledger={} rows={}",
            log_field(ledger_name),
            rows.len()
        );
        Ok(Some(rows))
    }
}

fn header_row(kind: LedgerKind) -> Vec<String> {
    kind.header().iter().map(|s| s.to_string()).collect()
}

fn read_table(path: &Path) -> StoreResult<LedgerRows> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| StoreError::csv(path, err))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| StoreError::csv(path, err))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn write_table(path: &Path, rows: &[Vec<String>]) -> StoreResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for row in rows {
        writer
            .write_record(row)
            .map_err(|err| StoreError::csv(path, err))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| StoreError::io(path, err.into_error()))?;
    write_atomically(path, &bytes)
}

#[cfg(test)]
mod tests {
    use super::{read_table, write_table};

    #[test]
    fn fields_with_separators_survive_a_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Acme_ledger.csv");
        let rows = vec![
            vec!["Action".to_string(), "Description".to_string()],
            vec!["IN".to_string(), "coils, \"grade A\"\nsecond line".to_string()],
        ];

        write_table(&path, &rows).unwrap();

        assert_eq!(read_table(&path).unwrap(), rows);
    }

    #[test]
    fn empty_file_reads_as_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("OUT_ledger.csv");
        std::fs::write(&path, b"").unwrap();

        assert!(read_table(&path).unwrap().is_empty());
    }
}
