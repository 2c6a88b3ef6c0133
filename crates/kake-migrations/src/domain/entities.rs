//! # Domain Entities
//!
//! Artifacts, deployment requests and the records a migration run produces.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Address, AddressLiteral, ArtifactName, Hash};

// =============================================================================
// ARTIFACT
// =============================================================================

/// ABI parameter of a contract constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorInput {
    /// Parameter name (may be empty).
    #[serde(default)]
    pub name: String,
    /// Solidity type, e.g. `address`.
    #[serde(rename = "type")]
    pub ty: String,
}

impl ConstructorInput {
    /// The only parameter type migrations pass.
    pub const ADDRESS: &'static str = "address";

    /// Creates an `address` parameter.
    #[must_use]
    pub fn address(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Self::ADDRESS.to_string(),
        }
    }

    /// Returns true if the parameter is an `address`.
    #[must_use]
    pub fn is_address(&self) -> bool {
        self.ty == Self::ADDRESS
    }
}

/// A compiled contract definition resolvable by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Contract name.
    pub name: ArtifactName,
    /// Constructor parameters, in declaration order.
    pub constructor_inputs: Vec<ConstructorInput>,
    /// Creation bytecode (without constructor arguments).
    #[serde(with = "hex_bytes")]
    pub bytecode: Vec<u8>,
}

impl Artifact {
    /// Creates an artifact.
    #[must_use]
    pub fn new(
        name: impl Into<ArtifactName>,
        constructor_inputs: Vec<ConstructorInput>,
        bytecode: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            constructor_inputs,
            bytecode,
        }
    }

    /// Number of constructor parameters.
    #[must_use]
    pub fn constructor_arity(&self) -> usize {
        self.constructor_inputs.len()
    }
}

// =============================================================================
// DEPLOYMENT REQUEST
// =============================================================================

/// An artifact reference plus the ordered constructor arguments to deploy it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    /// Artifact to instantiate.
    pub artifact: ArtifactName,
    /// Constructor arguments, in order.
    pub args: Vec<AddressLiteral>,
}

impl DeploymentRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(artifact: ArtifactName, args: Vec<AddressLiteral>) -> Self {
        Self { artifact, args }
    }

    /// Number of constructor arguments supplied.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

// =============================================================================
// EXECUTION RECORDS
// =============================================================================

/// What the chain reports for one contract creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDeployment {
    /// Address of the created contract.
    pub contract_address: Address,
    /// Sender nonce consumed by the creation.
    pub nonce: u64,
    /// Transaction hash.
    pub transaction_hash: Hash,
}

/// A deployment the runner executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReceipt {
    /// Artifact that was deployed.
    pub artifact: ArtifactName,
    /// Deployed contract address.
    pub contract_address: Address,
    /// Account that sent the creation transaction.
    pub deployer: Address,
    /// Sender nonce used.
    pub nonce: u64,
    /// Transaction hash.
    pub transaction_hash: Hash,
}

impl DeploymentReceipt {
    /// Combines a request's artifact with the chain's answer.
    #[must_use]
    pub fn from_chain(artifact: ArtifactName, deployer: Address, chain: ChainDeployment) -> Self {
        Self {
            artifact,
            contract_address: chain.contract_address,
            deployer,
            nonce: chain.nonce,
            transaction_hash: chain.transaction_hash,
        }
    }
}

/// A mixed-case literal whose casing does not match EIP-55.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressWarning {
    /// Artifact whose arguments contained the literal.
    pub artifact: ArtifactName,
    /// Literal as declared.
    pub literal: AddressLiteral,
    /// Correct checksummed form.
    pub expected: String,
}

/// How a migration run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// Requests were validated and executed.
    Applied,
    /// Requests were validated but not executed.
    DryRun,
    /// Migration was already completed; nothing ran.
    Skipped,
}

/// Summary of one migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Migration number.
    pub number: u32,
    /// Migration name.
    pub name: String,
    /// Outcome.
    pub outcome: MigrationOutcome,
    /// Requests the migration issued, in order.
    pub requests: Vec<DeploymentRequest>,
    /// Executed deployments, in order.
    pub receipts: Vec<DeploymentReceipt>,
    /// Checksum warnings raised during validation.
    pub warnings: Vec<AddressWarning>,
}

impl MigrationReport {
    /// Report for a migration that was not run.
    #[must_use]
    pub fn skipped(number: u32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            outcome: MigrationOutcome::Skipped,
            requests: Vec::new(),
            receipts: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Looks up the receipt for an artifact.
    #[must_use]
    pub fn receipt_for(&self, artifact: &str) -> Option<&DeploymentReceipt> {
        self.receipts
            .iter()
            .find(|receipt| receipt.artifact.as_str() == artifact)
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(s.as_str());
        hex::decode(digits).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================
