//! # Runner Configuration
//!
//! Defaults suit a local development chain. Environment variables override
//! them; the CLI overrides both.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `KAKE_DEPLOYER_ADDRESS` | `deployer` |
//! | `KAKE_ARTIFACTS_DIR` | `artifacts_dir` |
//! | `KAKE_STRICT_ADDRESSES` | `strict_addresses` |
//! | `KAKE_DRY_RUN` | `dry_run` |
//! | `KAKE_LEDGER_PATH` | `ledger_path` |

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::value_objects::Address;

/// Default deployer: first account of a deterministic development chain.
pub const DEFAULT_DEPLOYER: &str = "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1";

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

/// Migration runner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Account that sends creation transactions.
    pub deployer: Address,
    /// Directory of build artifacts.
    pub artifacts_dir: PathBuf,
    /// Treat EIP-55 checksum mismatches as errors instead of warnings.
    pub strict_addresses: bool,
    /// Validate without submitting transactions.
    pub dry_run: bool,
    /// Run even if the ledger marks the migration completed.
    pub reset: bool,
    /// Persist the ledger here; in memory when `None`.
    pub ledger_path: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            deployer: Address::parse(DEFAULT_DEPLOYER).unwrap_or_default(),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            strict_addresses: false,
            dry_run: false,
            reset: false,
            ledger_path: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Transactions would be sent from the zero address.
    #[error("deployer is the zero address; set KAKE_DEPLOYER_ADDRESS or --from")]
    ZeroDeployer,
}

impl RunnerConfig {
    /// Defaults overridden from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Unparseable values are logged and ignored.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("KAKE_DEPLOYER_ADDRESS") {
            match Address::parse(raw.trim()) {
                Ok(address) => {
                    config.deployer = address;
                    info!(deployer = %address, "Loaded deployer from environment");
                }
                Err(e) => warn!("KAKE_DEPLOYER_ADDRESS ignored: {e}"),
            }
        }

        if let Some(dir) = lookup("KAKE_ARTIFACTS_DIR") {
            config.artifacts_dir = PathBuf::from(dir);
        }

        if let Some(flag) = lookup("KAKE_STRICT_ADDRESSES") {
            match parse_flag(&flag) {
                Some(value) => config.strict_addresses = value,
                None => warn!("KAKE_STRICT_ADDRESSES must be true/false, got {flag:?}"),
            }
        }

        if let Some(flag) = lookup("KAKE_DRY_RUN") {
            match parse_flag(&flag) {
                Some(value) => config.dry_run = value,
                None => warn!("KAKE_DRY_RUN must be true/false, got {flag:?}"),
            }
        }

        if let Some(path) = lookup("KAKE_LEDGER_PATH") {
            config.ledger_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Rejects settings that cannot produce a real deployment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deployer.is_zero() && !self.dry_run {
            return Err(ConfigError::ZeroDeployer);
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
