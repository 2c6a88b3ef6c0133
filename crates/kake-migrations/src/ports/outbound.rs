//! # Driven Ports (SPI - Outbound)
//!
//! Capabilities a migration run depends on:
//! - a context to hand deployment requests to,
//! - artifact resolution by name,
//! - a chain to submit creation transactions to,
//! - a ledger of completed migrations.

use async_trait::async_trait;

use crate::domain::entities::{Artifact, ChainDeployment};
use crate::domain::value_objects::{Address, AddressLiteral, ArtifactName};
use crate::errors::{ChainError, MigrationError};

// =============================================================================
// DEPLOYMENT CONTEXT
// =============================================================================

/// Receives the deployment requests a migration issues.
pub trait DeploymentContext {
    /// Requests that `artifact` be deployed with `args` as constructor arguments.
    fn deploy(
        &mut self,
        artifact: &ArtifactName,
        args: Vec<AddressLiteral>,
    ) -> Result<(), MigrationError>;
}

// =============================================================================
// ARTIFACT RESOLVER
// =============================================================================

/// Looks up compiled artifacts by name.
pub trait ArtifactResolver: Send + Sync {
    /// Resolves `name`.
    ///
    /// # Errors
    ///
    /// `MigrationError::ArtifactNotFound` if nothing is registered under `name`.
    fn resolve(&self, name: &ArtifactName) -> Result<Artifact, MigrationError>;
}

// =============================================================================
// CHAIN CLIENT
// =============================================================================

/// Submits contract creation transactions.
///
/// Implementations submit one creation per call and return once it is
/// included. The runner never calls this concurrently.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Creates a contract from `init_code`, sent by `from`.
    async fn deploy_contract(
        &self,
        from: Address,
        init_code: Vec<u8>,
    ) -> Result<ChainDeployment, ChainError>;
}

// =============================================================================
// MIGRATION LEDGER
// =============================================================================

/// Remembers the highest completed migration number.
pub trait MigrationLedger: Send + Sync {
    /// Highest completed migration, if any.
    fn last_completed(&self) -> Result<Option<u32>, MigrationError>;

    /// Records `number` as completed.
    fn set_completed(&self, number: u32) -> Result<(), MigrationError>;
}
