//! Ledger file naming and whole-file rewrites.

use super::{StoreError, StoreResult};
use crate::logging::log_field;
use log::{debug, error};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const LEDGER_FILE_SUFFIX: &str = "_ledger.csv";
const TEMP_SUFFIX: &str = ".tmp";

/// Returns the file name holding the table for `ledger_name`.
///
/// Bytes that are unsafe in a portable file name are percent-encoded, as is
/// `%` itself and a leading `.`, so the mapping stays injective.
///
/// # Errors
/// - `InvalidLedgerName` when the name is blank.
pub fn ledger_file_name(ledger_name: &str) -> StoreResult<String> {
    if ledger_name.trim().is_empty() {
        return Err(StoreError::InvalidLedgerName(ledger_name.to_string()));
    }

    let mut encoded = String::with_capacity(ledger_name.len() + LEDGER_FILE_SUFFIX.len());
    for (index, ch) in ledger_name.char_indices() {
        let unsafe_char = matches!(
            ch,
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '%'
        ) || ch.is_control()
            || (index == 0 && ch == '.');
        if unsafe_char {
            let mut buf = [0_u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        } else {
            encoded.push(ch);
        }
    }
    encoded.push_str(LEDGER_FILE_SUFFIX);
    Ok(encoded)
}

/// Replaces `path` with `contents` via a sibling temp file and rename.
///
/// Either the new contents are fully in place or the previous file is left
/// untouched and an error is returned.
pub fn write_atomically(path: &Path, contents: &[u8]) -> StoreResult<()> {
    let started_at = Instant::now();
    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, contents)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|err| StoreError::io(path, err)));

    match &result {
        Ok(()) => debug!(
            "event=file_rewrite module=store status=ok file={} bytes={} duration_ms={}",
            log_field(&path.display().to_string()),
            contents.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => {
            let _ = fs::remove_file(&temp_path);
            error!(
                "event=file_rewrite module=store status=error file={} duration_ms={} error_code={} error={}",
                log_field(&path.display().to_string()),
                started_at.elapsed().as_millis(),
                err.code(),
                log_field(&err.to_string())
            );
        }
    }

    result
}

fn write_and_sync(temp_path: &Path, contents: &[u8]) -> StoreResult<()> {
    let mut file = File::create(temp_path).map_err(|err| StoreError::io(temp_path, err))?;
    file.write_all(contents)
        .map_err(|err| StoreError::io(temp_path, err))?;
    file.sync_all().map_err(|err| StoreError::io(temp_path, err))?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
