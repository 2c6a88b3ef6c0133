//! # Driving Ports (API - Inbound)
//!
//! What a runner needs from a migration.

use crate::errors::MigrationError;
use crate::ports::outbound::DeploymentContext;

/// A numbered migration that declares deployments against a context.
///
/// The runner calls [`Migration::configure`] exactly once per run. The
/// migration issues its requests in program order and returns; it holds no
/// state between runs.
pub trait Migration: Send + Sync {
    /// Position in the migration sequence. Completed numbers are skipped.
    fn number(&self) -> u32;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Issues this migration's deployment requests.
    ///
    /// # Errors
    ///
    /// Returns whatever the context returns, unmodified.
    fn configure(&self, ctx: &mut dyn DeploymentContext) -> Result<(), MigrationError>;
}
