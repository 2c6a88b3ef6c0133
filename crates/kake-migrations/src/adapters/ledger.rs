//! # Migration Ledgers
//!
//! Where the runner records the last completed migration number.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::errors::MigrationError;
use crate::ports::outbound::MigrationLedger;

/// Ledger kept in memory for a single process.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    last_completed: Mutex<Option<u32>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger that already has `number` completed.
    #[must_use]
    pub fn completed_through(number: u32) -> Self {
        Self {
            last_completed: Mutex::new(Some(number)),
        }
    }
}

impl MigrationLedger for InMemoryLedger {
    fn last_completed(&self) -> Result<Option<u32>, MigrationError> {
        Ok(*self.last_completed.lock())
    }

    fn set_completed(&self, number: u32) -> Result<(), MigrationError> {
        *self.last_completed.lock() = Some(number);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    last_completed_migration: u32,
}

/// Ledger persisted as a small JSON file.
///
/// A missing file means nothing has completed.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    /// Ledger stored at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl MigrationLedger for FileLedger {
    fn last_completed(&self) -> Result<Option<u32>, MigrationError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ledger_error(&self.path, e)),
        };
        let file: LedgerFile = serde_json::from_str(&raw).map_err(|e| ledger_error(&self.path, e))?;
        Ok(Some(file.last_completed_migration))
    }

    fn set_completed(&self, number: u32) -> Result<(), MigrationError> {
        let file = LedgerFile {
            last_completed_migration: number,
        };
        let raw = serde_json::to_string_pretty(&file).map_err(|e| ledger_error(&self.path, e))?;

        // Written beside the target, then renamed over it.
        let tmp = self.temp_path();
        fs::write(&tmp, raw).map_err(|e| ledger_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            ledger_error(&self.path, e)
        })
    }
}

fn ledger_error(path: &Path, reason: impl std::fmt::Display) -> MigrationError {
    MigrationError::Ledger(format!("{}: {reason}", path.display()))
}
