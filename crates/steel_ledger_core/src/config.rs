//! Storage location configuration.
//!
//! # Invariants
//! - The registry file and every ledger table live directly in `data_dir`.

use std::path::{Path, PathBuf};

/// Env var overriding the data directory.
pub const DATA_DIR_ENV: &str = "STEEL_LEDGER_DATA_DIR";
pub const PARTIES_FILE_NAME: &str = "parties.txt";

/// Where the registry file and ledger tables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    data_dir: PathBuf,
}

impl StorageConfig {
    /// Uses `data_dir` for all files.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Reads [`DATA_DIR_ENV`], falling back to the working directory.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DATA_DIR_ENV).ok())
    }

    fn from_env_value(raw: Option<String>) -> Self {
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::new(raw.trim()),
            _ => Self::new("."),
        }
    }

    /// Directory holding the registry and ledger tables.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of `parties.txt`.
    pub fn parties_path(&self) -> PathBuf {
        self.data_dir.join(PARTIES_FILE_NAME)
    }

    /// Creates the data directory if it is missing.
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
