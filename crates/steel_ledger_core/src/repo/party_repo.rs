//! Party registry persistence.
//!
//! # Responsibility
//! - Read and write the ordered party list as plain text, one name per line.
//!
//! # Invariants
//! - A missing file is an empty registry, not an error.
//! - Invalid UTF-8 in a hand-edited file is decoded lossily, never dropped.
//! - Saved order is load order.

use crate::config::StorageConfig;
use crate::logging::log_field;
use crate::model::party::Party;
use crate::store::{write_atomically, StoreError, StoreResult};
use log::{error, info, warn};
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage contract for the party list.
pub trait PartyRepository {
    /// Reads the persisted list.
    ///
    /// `Ok(None)` when nothing has been persisted yet.
    fn try_load(&self) -> StoreResult<Option<Vec<Party>>>;

    /// Overwrites the persisted list with `parties`, keeping order.
    fn save(&self, parties: &[Party]) -> StoreResult<()>;

    /// Reads the persisted list, treating any failure as an empty registry.
    fn load(&self) -> Vec<Party> {
        match self.try_load() {
            Ok(parties) => parties.unwrap_or_default(),
            Err(err) => {
                error!(
                    "event=registry_load module=repo status=error error_code={} error={}",
                    err.code(),
                    log_field(&err.to_string())
                );
                Vec::new()
            }
        }
    }
}

impl<T: PartyRepository + ?Sized> PartyRepository for &T {
    fn try_load(&self) -> StoreResult<Option<Vec<Party>>> {
        (**self).try_load()
    }

    fn save(&self, parties: &[Party]) -> StoreResult<()> {
        (**self).save(parties)
    }
}

/// Line-delimited text file holding the registry.
#[derive(Debug, Clone)]
pub struct FilePartyRepository {
    path: PathBuf,
}

impl FilePartyRepository {
    /// Creates a repository backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a repository for `parties.txt` in the configured data dir.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.parties_path())
    }

    /// Path of the registry file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PartyRepository for FilePartyRepository {
    fn try_load(&self) -> StoreResult<Option<Vec<Party>>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            warn!("event=registry_load module=repo status=lossy reason=invalid_utf8");
        }
        let parties = parse_party_lines(&text);
        info!(
            "event=registry_load module=repo status=ok parties={}",
            parties.len()
        );
        Ok(Some(parties))
    }

    fn save(&self, parties: &[Party]) -> StoreResult<()> {
        let text = parties
            .iter()
            .map(Party::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        write_atomically(&self.path, text.as_bytes())?;
        info!(
            "event=registry_save module=repo status=ok parties={}",
            parties.len()
        );
        Ok(())
    }
}

/// Parses registry text, skipping blank, invalid and repeated lines.
fn parse_party_lines(text: &str) -> Vec<Party> {
    let mut parties: Vec<Party> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match Party::parse(line) {
            Ok(party) if parties.contains(&party) => warn!(
                "event=registry_load module=repo status=skip reason=duplicate line={}",
                index + 1
            ),
            Ok(party) => parties.push(party),
            Err(err) => warn!(
                "event=registry_load module=repo status=skip reason=invalid line={} error={}",
                index + 1,
                log_field(&err.to_string())
            ),
        }
    }
    parties
}

#[cfg(test)]
mod tests {
    use super::{parse_party_lines, FilePartyRepository, PartyRepository};

    #[test]
    fn latin1_bytes_are_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePartyRepository::new(dir.path().join("parties.txt"));
        std::fs::write(repo.path(), b"Acme\nM\xfcller Steel\nBravo").unwrap();

        let parties = repo.try_load().unwrap().unwrap();

        let names: Vec<&str> = parties.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["Acme", "M\u{FFFD}ller Steel", "Bravo"]);
    }

    #[test]
    fn parse_skips_blank_duplicate_and_reserved_lines() {
        let parties = parse_party_lines("Acme\r\n\nBravo\n  \nAcme\nIN\n Zenith ");
        let names: Vec<&str> = parties.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Bravo", "Zenith"]);
    }
}
