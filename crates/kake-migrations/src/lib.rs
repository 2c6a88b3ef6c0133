//! # Kake Migrations
//!
//! Deploys the `Kake2` and `Kake3` contracts with fixed constructor addresses.
//!
//! ## Purpose
//!
//! The [`descriptor`] module declares the deployment: two requests, issued in
//! order, against a [`ports::DeploymentContext`]. Everything else in the crate
//! exists to run that declaration: resolving artifacts by name, checking the
//! requests, and submitting the creations to a chain.
//!
//! ## Requests Issued
//!
//! | # | Artifact | Constructor args |
//! |---|----------|------------------|
//! | 1 | `Kake2` | `ADDR1`, `ADDR2` |
//! | 2 | `Kake3` | `ADDR1`, `ADDR2`, `ADDR3` |
//!
//! ## Runner Checks
//!
//! | Check | Error | Location |
//! |-------|-------|----------|
//! | Artifact resolves | `ArtifactNotFound` | `service.rs` via `ArtifactResolver` |
//! | Literal is `0x` + 40 hex | `InvalidAddress` | `domain/services.rs` - `validate_address_literal()` |
//! | EIP-55 casing (strict mode) | `ChecksumMismatch` | `domain/services.rs` - `validate_address_literal()` |
//! | Constructor arity | `ConstructorArityMismatch` | `domain/invariants.rs` - `check_constructor_arity()` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose | Adapters |
//! |-------|---------|----------|
//! | `ArtifactResolver` | Name → artifact | `InMemoryArtifactRegistry`, `ArtifactDirectory` |
//! | `ChainClient` | Submit creations | `InMemoryChain` |
//! | `MigrationLedger` | Completed migrations | `InMemoryLedger`, `FileLedger` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use kake_migrations::prelude::*;
//!
//! let artifacts = ArtifactDirectory::open("build/contracts")?;
//! let (runner, _chain) = create_test_runner(RunnerConfig::default(), Arc::new(artifacts));
//! let report = runner.run(&DeployContracts).await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod descriptor;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Descriptor
    pub use crate::descriptor::{configure, DeployContracts, ADDR1, ADDR2, ADDR3, KAKE2, KAKE3};

    // Domain entities
    pub use crate::domain::entities::{
        AddressWarning, Artifact, ChainDeployment, ConstructorInput, DeploymentReceipt,
        DeploymentRequest, MigrationOutcome, MigrationReport,
    };

    // Value objects
    pub use crate::domain::value_objects::{Address, AddressLiteral, ArtifactName, Hash};

    // Domain services
    pub use crate::domain::services::{
        build_init_code, checksum_encode, compute_contract_address, keccak256,
        validate_address_literal, ChecksumStatus, ValidatedAddress,
    };

    // Ports
    pub use crate::ports::inbound::Migration;
    pub use crate::ports::outbound::{
        ArtifactResolver, ChainClient, DeploymentContext, MigrationLedger,
    };

    // Adapters
    pub use crate::adapters::{
        ArtifactDirectory, FileLedger, InMemoryArtifactRegistry, InMemoryChain, InMemoryLedger,
        QueueingContext, RecordingContext,
    };

    // Config
    pub use crate::config::{ConfigError, RunnerConfig};

    // Errors
    pub use crate::errors::{AddressError, ChainError, MigrationError};

    // Service
    pub use crate::service::{create_test_runner, MigrationRunner};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
