//! # Deployment Flow Tests
//!
//! ```text
//! build/contracts/*.json ──ArtifactDirectory──→ registry
//!                                                  │
//! DeployContracts.configure ──QueueingContext──→ MigrationRunner ──→ ChainClient
//!                                                  │
//!                                              MigrationLedger
//! ```
//!
//! 1. **Happy Path**: artifacts loaded from disk, both contracts deployed in order
//! 2. **Ordering**: the chain sees Kake2 before Kake3, one at a time
//! 3. **Validation**: arity mismatches stop the run before submission
//! 4. **Unrelated Artifacts**: an undecodable build file does not block the run
//! 5. **Ledger**: file-backed ledger skips a completed migration

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tempfile::TempDir;

    use kake_migrations::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn write_artifact(dir: &Path, name: &str, owners: usize) {
        let inputs: Vec<serde_json::Value> = (0..owners)
            .map(|i| {
                serde_json::json!({
                    "internalType": "address",
                    "name": format!("owner{i}"),
                    "type": "address"
                })
            })
            .collect();
        let artifact = serde_json::json!({
            "contractName": name,
            "abi": [
                {"type": "constructor", "inputs": inputs, "stateMutability": "nonpayable"},
                {"type": "function", "name": "bake", "inputs": [], "outputs": []}
            ],
            "bytecode": "0x6080604052348015600f57600080fd5b50",
        });
        fs::write(
            dir.join(format!("{name}.json")),
            serde_json::to_string_pretty(&artifact).unwrap(),
        )
        .unwrap();
    }

    fn build_dir(kake3_owners: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "Kake2", 2);
        write_artifact(dir.path(), "Kake3", kake3_owners);
        write_artifact(dir.path(), "Migrations", 0);
        dir
    }

    /// Chain that records the init code it receives and the order of calls.
    #[derive(Default)]
    struct RecordingChain {
        inner: InMemoryChain,
        submitted: Mutex<Vec<Vec<u8>>>,
    }

    #[async_trait]
    impl ChainClient for RecordingChain {
        async fn deploy_contract(
            &self,
            from: Address,
            init_code: Vec<u8>,
        ) -> Result<ChainDeployment, ChainError> {
            self.submitted.lock().push(init_code.clone());
            self.inner.deploy_contract(from, init_code).await
        }
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[tokio::test]
    async fn test_deploys_from_artifact_directory() {
        let dir = build_dir(3);
        let registry = ArtifactDirectory::load(dir.path()).unwrap();
        assert_eq!(registry.len(), 3);

        let (runner, chain) = create_test_runner(RunnerConfig::default(), Arc::new(registry));
        let report = runner.run(&DeployContracts).await.unwrap();

        assert_eq!(report.outcome, MigrationOutcome::Applied);
        let deployer = RunnerConfig::default().deployer;
        assert_eq!(
            report.receipt_for(KAKE2).unwrap().contract_address,
            compute_contract_address(deployer, 0)
        );
        assert_eq!(
            report.receipt_for(KAKE3).unwrap().contract_address,
            compute_contract_address(deployer, 1)
        );
        assert_eq!(chain.nonce_of(deployer), 2);
    }

    // =============================================================================
    // ORDERING
    // =============================================================================

    #[tokio::test]
    async fn test_chain_sees_requests_in_program_order() {
        let registry = ArtifactDirectory::load(build_dir(3).path()).unwrap();
        let chain = Arc::new(RecordingChain::default());
        let runner = MigrationRunner::new(
            RunnerConfig::default(),
            Arc::new(registry),
            chain.clone(),
            Arc::new(InMemoryLedger::new()),
        );

        runner.run(&DeployContracts).await.unwrap();

        let submitted = chain.submitted.lock();
        assert_eq!(submitted.len(), 2);

        let bytecode_len = 17;
        // Kake2: two address words, Kake3: three.
        assert_eq!(submitted[0].len(), bytecode_len + 2 * 32);
        assert_eq!(submitted[1].len(), bytecode_len + 3 * 32);

        // ADDR1 and ADDR2 lead both argument lists.
        assert_eq!(
            submitted[0][bytecode_len..],
            submitted[1][bytecode_len..bytecode_len + 64]
        );
        let addr3 = Address::parse(ADDR3).unwrap();
        assert_eq!(&submitted[1][bytecode_len + 64 + 12..], addr3.as_bytes());
    }

    // =============================================================================
    // VALIDATION
    // =============================================================================

    #[tokio::test]
    async fn test_arity_mismatch_on_disk_blocks_run() {
        let registry = ArtifactDirectory::load(build_dir(4).path()).unwrap();
        let (runner, chain) = create_test_runner(RunnerConfig::default(), Arc::new(registry));

        let err = runner.run(&DeployContracts).await.unwrap_err();

        assert!(err.is_validation_error());
        assert!(matches!(
            err,
            MigrationError::ConstructorArityMismatch {
                ref artifact,
                expected: 4,
                actual: 3,
            } if artifact == KAKE3
        ));
        assert!(chain.deployments().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_reports_requests() {
        let registry = ArtifactDirectory::load(build_dir(3).path()).unwrap();
        let config = RunnerConfig {
            dry_run: true,
            strict_addresses: true,
            ..RunnerConfig::default()
        };
        let (runner, chain) = create_test_runner(config, Arc::new(registry));

        let report = runner.run(&DeployContracts).await.unwrap();

        assert_eq!(report.outcome, MigrationOutcome::DryRun);
        assert_eq!(report.requests[0].args, vec![AddressLiteral::from(ADDR1), ADDR2.into()]);
        assert!(report.warnings.is_empty());
        assert!(chain.deployments().is_empty());
    }

    // =============================================================================
    // UNRELATED ARTIFACTS
    // =============================================================================

    /// Build directory that also holds a contract with an unlinked library.
    fn build_dir_with_unlinked_library() -> TempDir {
        let dir = build_dir(3);
        let unlinked = serde_json::json!({
            "contractName": "UsesSafeMath",
            "abi": [{"type": "constructor", "inputs": []}],
            "bytecode": "0x73__SafeMath______________________________6080604052",
        });
        fs::write(dir.path().join("UsesSafeMath.json"), unlinked.to_string()).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_unlinked_library_does_not_block_lazy_resolution() {
        let dir = build_dir_with_unlinked_library();
        let artifacts = ArtifactDirectory::open(dir.path()).unwrap();
        let (runner, chain) = create_test_runner(RunnerConfig::default(), Arc::new(artifacts));

        let report = runner.run(&DeployContracts).await.unwrap();

        assert_eq!(report.outcome, MigrationOutcome::Applied);
        assert_eq!(report.receipts.len(), 2);
        assert_eq!(chain.deployments().len(), 2);
    }

    #[tokio::test]
    async fn test_unlinked_library_is_skipped_by_eager_load() {
        let dir = build_dir_with_unlinked_library();
        let registry = ArtifactDirectory::load(dir.path()).unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.names().all(|name| name.as_str() != "UsesSafeMath"));

        let (runner, _chain) = create_test_runner(RunnerConfig::default(), Arc::new(registry));
        let report = runner.run(&DeployContracts).await.unwrap();
        assert_eq!(report.outcome, MigrationOutcome::Applied);
    }

    // =============================================================================
    // LEDGER
    // =============================================================================

    #[tokio::test]
    async fn test_file_ledger_across_runners() {
        let artifacts = build_dir(3);
        let state = TempDir::new().unwrap();
        let ledger_path = state.path().join("ledger.json");

        for expected in [MigrationOutcome::Applied, MigrationOutcome::Skipped] {
            let registry = ArtifactDirectory::load(artifacts.path()).unwrap();
            let runner = MigrationRunner::new(
                RunnerConfig::default(),
                Arc::new(registry),
                Arc::new(InMemoryChain::new()),
                Arc::new(FileLedger::new(&ledger_path)),
            );
            let report = runner.run(&DeployContracts).await.unwrap();
            assert_eq!(report.outcome, expected);
        }

        assert_eq!(
            FileLedger::new(&ledger_path).last_completed().unwrap(),
            Some(DeployContracts::NUMBER)
        );
    }
}
