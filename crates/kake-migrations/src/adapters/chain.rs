//! # In-Memory Chain
//!
//! Development chain for dry runs and tests. Tracks sender nonces, derives
//! contract addresses with the CREATE rule and keeps the deployed init code.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::info;

use crate::domain::entities::ChainDeployment;
use crate::domain::services::{compute_contract_address, creation_transaction_hash};
use crate::domain::value_objects::Address;
use crate::errors::ChainError;
use crate::ports::outbound::ChainClient;

/// Maximum init code size (EIP-3860): 2 * 24576 bytes.
pub const MAX_INIT_CODE_SIZE: usize = 49_152;

#[derive(Debug, Default)]
struct ChainState {
    nonces: HashMap<Address, u64>,
    code: HashMap<Address, Vec<u8>>,
    deployments: Vec<ChainDeployment>,
    unavailable: Option<String>,
}

/// In-memory chain state.
#[derive(Debug, Default)]
pub struct InMemoryChain {
    state: RwLock<ChainState>,
}

impl InMemoryChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the next nonce for `sender`.
    pub fn set_nonce(&self, sender: Address, nonce: u64) {
        self.state.write().nonces.insert(sender, nonce);
    }

    /// Next nonce `sender` will use.
    #[must_use]
    pub fn nonce_of(&self, sender: Address) -> u64 {
        self.state.read().nonces.get(&sender).copied().unwrap_or(0)
    }

    /// Init code stored at `address`, if a contract was created there.
    #[must_use]
    pub fn code_at(&self, address: Address) -> Option<Vec<u8>> {
        self.state.read().code.get(&address).cloned()
    }

    /// All creations, in order.
    #[must_use]
    pub fn deployments(&self) -> Vec<ChainDeployment> {
        self.state.read().deployments.clone()
    }

    /// Makes every subsequent submission fail with `ChainError::Unavailable`.
    pub fn set_unavailable(&self, reason: impl Into<String>) {
        self.state.write().unavailable = Some(reason.into());
    }

    /// Clears [`Self::set_unavailable`].
    pub fn set_available(&self) {
        self.state.write().unavailable = None;
    }
}

#[async_trait]
impl ChainClient for InMemoryChain {
    async fn deploy_contract(
        &self,
        from: Address,
        init_code: Vec<u8>,
    ) -> Result<ChainDeployment, ChainError> {
        let mut state = self.state.write();

        if let Some(reason) = &state.unavailable {
            return Err(ChainError::Unavailable(reason.clone()));
        }
        if init_code.is_empty() {
            return Err(ChainError::EmptyInitCode);
        }
        if init_code.len() > MAX_INIT_CODE_SIZE {
            return Err(ChainError::InitCodeTooLarge {
                size: init_code.len(),
                max: MAX_INIT_CODE_SIZE,
            });
        }

        let nonce = state.nonces.get(&from).copied().unwrap_or(0);
        let next_nonce = nonce
            .checked_add(1)
            .ok_or_else(|| ChainError::NonceExhausted {
                sender: from.to_string(),
            })?;
        let contract_address = compute_contract_address(from, nonce);
        let transaction_hash = creation_transaction_hash(from, nonce, &init_code);

        state.nonces.insert(from, next_nonce);
        state.code.insert(contract_address, init_code);

        let deployment = ChainDeployment {
            contract_address,
            nonce,
            transaction_hash,
        };
        state.deployments.push(deployment);

        info!(
            from = %from,
            nonce,
            contract = %contract_address,
            "Contract created"
        );
        Ok(deployment)
    }
}

// =============================================================================
// TESTS
// =============================================================================
