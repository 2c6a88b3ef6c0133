//! # Migration Runner
//!
//! Drives one migration:
//!
//! 1. Skip if the ledger already lists it (unless `reset`).
//! 2. Call `configure` once against a [`QueueingContext`].
//! 3. Validate every queued request: artifact, addresses, constructor arity.
//! 4. Stop here on a dry run.
//! 5. Submit the creations one at a time, in order.
//! 6. Mark the migration completed.
//!
//! Nothing is submitted unless every request validates. A chain error aborts
//! the run without retrying; earlier creations stay on chain.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adapters::context::QueueingContext;
use crate::config::RunnerConfig;
use crate::domain::entities::{
    AddressWarning, Artifact, DeploymentReceipt, DeploymentRequest, MigrationOutcome,
    MigrationReport,
};
use crate::domain::invariants::check_request;
use crate::domain::services::{build_init_code, validate_address_literal, ChecksumStatus};
use crate::domain::value_objects::Address;
use crate::errors::MigrationError;
use crate::ports::inbound::Migration;
use crate::ports::outbound::{ArtifactResolver, ChainClient, MigrationLedger};

/// A request that passed validation, ready to submit.
#[derive(Debug, Clone)]
struct PreparedDeployment {
    request: DeploymentRequest,
    artifact: Artifact,
    args: Vec<Address>,
}

/// Runs migrations against injected artifact, chain and ledger ports.
pub struct MigrationRunner {
    config: RunnerConfig,
    resolver: Arc<dyn ArtifactResolver>,
    chain: Arc<dyn ChainClient>,
    ledger: Arc<dyn MigrationLedger>,
}

impl MigrationRunner {
    /// Creates a runner.
    pub fn new(
        config: RunnerConfig,
        resolver: Arc<dyn ArtifactResolver>,
        chain: Arc<dyn ChainClient>,
        ledger: Arc<dyn MigrationLedger>,
    ) -> Self {
        Self {
            config,
            resolver,
            chain,
            ledger,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs `migration` once.
    pub async fn run(&self, migration: &dyn Migration) -> Result<MigrationReport, MigrationError> {
        let number = migration.number();
        let name = migration.name().to_string();

        if !self.config.reset {
            if let Some(last) = self.ledger.last_completed()? {
                if number <= last {
                    info!(number, name = %name, last, "Migration already completed, skipping");
                    return Ok(MigrationReport::skipped(number, name));
                }
            }
        }

        info!(number, name = %name, "Running migration");

        let mut queue = QueueingContext::new();
        migration.configure(&mut queue)?;
        let requests = queue.into_requests();

        let (prepared, warnings) = self.prepare(&requests)?;

        if self.config.dry_run {
            info!(
                number,
                requests = requests.len(),
                warnings = warnings.len(),
                "Dry run complete, nothing submitted"
            );
            return Ok(MigrationReport {
                number,
                name,
                outcome: MigrationOutcome::DryRun,
                requests,
                receipts: Vec::new(),
                warnings,
            });
        }

        let mut receipts = Vec::with_capacity(prepared.len());
        for deployment in prepared {
            let receipt = self.submit(deployment).await?;
            receipts.push(receipt);
        }

        self.ledger.set_completed(number)?;
        info!(number, name = %name, deployed = receipts.len(), "Migration completed");

        Ok(MigrationReport {
            number,
            name,
            outcome: MigrationOutcome::Applied,
            requests,
            receipts,
            warnings,
        })
    }

    /// Validates every request before anything is submitted.
    fn prepare(
        &self,
        requests: &[DeploymentRequest],
    ) -> Result<(Vec<PreparedDeployment>, Vec<AddressWarning>), MigrationError> {
        let mut prepared = Vec::with_capacity(requests.len());
        let mut warnings = Vec::new();

        for request in requests {
            let artifact = self.resolver.resolve(&request.artifact)?;

            let mut args = Vec::with_capacity(request.args.len());
            for literal in &request.args {
                let validated = validate_address_literal(literal.as_str()).map_err(|source| {
                    MigrationError::InvalidAddress {
                        literal: literal.to_string(),
                        source,
                    }
                })?;

                if let ChecksumStatus::Mismatch { expected } = validated.checksum {
                    if self.config.strict_addresses {
                        return Err(MigrationError::ChecksumMismatch {
                            literal: literal.to_string(),
                            expected,
                        });
                    }
                    warn!(
                        artifact = %request.artifact,
                        literal = %literal,
                        expected = %expected,
                        "Address literal fails EIP-55 checksum"
                    );
                    warnings.push(AddressWarning {
                        artifact: request.artifact.clone(),
                        literal: literal.clone(),
                        expected,
                    });
                }

                args.push(validated.address);
            }

            check_request(request, &artifact)?;

            prepared.push(PreparedDeployment {
                request: request.clone(),
                artifact,
                args,
            });
        }

        Ok((prepared, warnings))
    }

    async fn submit(&self, deployment: PreparedDeployment) -> Result<DeploymentReceipt, MigrationError> {
        let init_code = build_init_code(&deployment.artifact, &deployment.args)?;
        debug!(
            artifact = %deployment.request.artifact,
            init_code_len = init_code.len(),
            "Submitting creation"
        );

        let chain = self
            .chain
            .deploy_contract(self.config.deployer, init_code)
            .await?;

        let receipt = DeploymentReceipt::from_chain(
            deployment.request.artifact,
            self.config.deployer,
            chain,
        );
        info!(
            artifact = %receipt.artifact,
            address = %receipt.contract_address,
            tx = %receipt.transaction_hash,
            "Deployed"
        );
        Ok(receipt)
    }
}

impl std::fmt::Debug for MigrationRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationRunner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Runner over an in-memory chain and ledger, for tests and demos.
#[must_use]
pub fn create_test_runner(
    config: RunnerConfig,
    resolver: Arc<dyn ArtifactResolver>,
) -> (MigrationRunner, Arc<crate::adapters::InMemoryChain>) {
    let chain = Arc::new(crate::adapters::InMemoryChain::new());
    let ledger = Arc::new(crate::adapters::InMemoryLedger::new());
    let runner = MigrationRunner::new(config, resolver, chain.clone(), ledger);
    (runner, chain)
}

// =============================================================================
// TESTS
// =============================================================================
