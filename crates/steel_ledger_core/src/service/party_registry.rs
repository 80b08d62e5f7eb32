//! Party registry use cases.
//!
//! # Responsibility
//! - Hold the in-memory party list loaded at startup.
//! - Persist the full list after every successful add/remove.
//!
//! # Invariants
//! - No duplicate names; first-insertion order is kept.
//! - In-memory state matches disk: a failed persist undoes the mutation.
//! - A registry whose file could not be read never writes that file.

use crate::logging::log_field;
use crate::model::party::Party;
use crate::repo::party_repo::PartyRepository;
use crate::store::{StoreError, StoreResult};
use log::{debug, error, info};

/// Ordered set of known counterparties.
pub struct PartyRegistry<R: PartyRepository> {
    repo: R,
    parties: Vec<Party>,
    /// Set when the last load failed; blocks every write.
    load_error: Option<String>,
}

impl<R: PartyRepository> PartyRegistry<R> {
    /// Loads the persisted list.
    ///
    /// A missing file gives an empty registry. An unreadable file also gives
    /// an empty registry, but one that refuses `add`, `remove` and `save`
    /// until a later [`load`](Self::load) succeeds.
    pub fn open(repo: R) -> Self {
        let mut registry = Self {
            repo,
            parties: Vec::new(),
            load_error: None,
        };
        registry.load();
        registry
    }

    /// Parties in first-insertion order.
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// Party names in first-insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.parties.iter().map(Party::as_str).collect()
    }

    /// Whether a party with exactly this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.parties.iter().any(|party| party.as_str() == name)
    }

    /// Number of registered parties.
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    /// Whether no party is registered.
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Whether the last load failed and writes are blocked.
    pub fn is_read_only(&self) -> bool {
        self.load_error.is_some()
    }

    /// Re-reads the persisted list, dropping in-memory state.
    pub fn load(&mut self) -> &[Party] {
        match self.repo.try_load() {
            Ok(parties) => {
                self.parties = parties.unwrap_or_default();
                self.load_error = None;
            }
            Err(err) => {
                error!(
                    "event=registry_load module=service status=error error_code={} error={}",
                    err.code(),
                    log_field(&err.to_string())
                );
                self.parties = Vec::new();
                self.load_error = Some(err.to_string());
            }
        }
        &self.parties
    }

    /// Persists the current list in full.
    ///
    /// # Errors
    /// - `RegistryUnavailable` when the last load failed.
    /// - Storage failure while writing.
    pub fn save(&self) -> StoreResult<()> {
        self.ensure_writable()?;
        self.repo.save(&self.parties)
    }

    fn ensure_writable(&self) -> StoreResult<()> {
        match &self.load_error {
            Some(reason) => Err(StoreError::RegistryUnavailable(reason.clone())),
            None => Ok(()),
        }
    }

    /// Appends `name` and persists.
    ///
    /// Returns `Ok(false)` without touching storage when the name is blank,
    /// reserved, or already present.
    ///
    /// # Errors
    /// - `RegistryUnavailable` when the last load failed.
    /// - Storage failure while persisting; the registry is left unchanged.
    pub fn add(&mut self, name: &str) -> StoreResult<bool> {
        let party = match Party::parse(name) {
            Ok(party) => party,
            Err(err) => {
                debug!(
                    "event=party_add module=service status=rejected reason={}",
                    log_field(&err.to_string())
                );
                return Ok(false);
            }
        };
        if self.parties.contains(&party) {
            debug!(
                "event=party_add module=service status=rejected reason=duplicate party={}",
                log_field(party.as_str())
            );
            return Ok(false);
        }

        self.ensure_writable()?;
        self.parties.push(party);
        if let Err(err) = self.repo.save(&self.parties) {
            self.parties.pop();
            return Err(err);
        }

        info!(
            "event=party_add module=service status=ok parties={}",
            self.parties.len()
        );
        Ok(true)
    }

    /// Removes the exact match for `name` and persists.
    ///
    /// Returns `Ok(false)` when no party has that exact name.
    ///
    /// # Errors
    /// - `RegistryUnavailable` when the last load failed.
    /// - Storage failure while persisting; the registry is left unchanged.
    pub fn remove(&mut self, name: &str) -> StoreResult<bool> {
        let Some(index) = self.parties.iter().position(|party| party.as_str() == name) else {
            return Ok(false);
        };

        self.ensure_writable()?;
        let removed = self.parties.remove(index);
        if let Err(err) = self.repo.save(&self.parties) {
            self.parties.insert(index, removed);
            return Err(err);
        }

        info!(
            "event=party_remove module=service status=ok parties={}",
            self.parties.len()
        );
        Ok(true)
    }
}
