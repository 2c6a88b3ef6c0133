//! # Deploy Contracts (migration 2)
//!
//! Deploys `Kake2` with two owner addresses, then `Kake3` with the same two
//! plus a third. The addresses are fixed literals; nothing is read from the
//! environment and nothing is validated here.

use crate::errors::MigrationError;
use crate::ports::inbound::Migration;
use crate::ports::outbound::DeploymentContext;

/// First constructor argument of both contracts.
pub const ADDR1: &str = "0x3dCD7faecD0FC34d2aD171Da01796A2dFD45DF52";
/// Second constructor argument of both contracts.
pub const ADDR2: &str = "0xFf745f1A7259a4160635ac697944D077C0D0EE63";
/// Third constructor argument, `Kake3` only.
pub const ADDR3: &str = "0x21caBd7F5aa6Ad763685157386709449bF09ce99";

/// Artifact name of the two-address contract.
pub const KAKE2: &str = "Kake2";
/// Artifact name of the three-address contract.
pub const KAKE3: &str = "Kake3";

/// Issues the two deployment requests, in order.
///
/// A failing `deploy` is returned as-is and later requests are not issued.
pub fn configure(ctx: &mut dyn DeploymentContext) -> Result<(), MigrationError> {
    ctx.deploy(&KAKE2.into(), vec![ADDR1.into(), ADDR2.into()])?;
    ctx.deploy(&KAKE3.into(), vec![ADDR1.into(), ADDR2.into(), ADDR3.into()])?;
    Ok(())
}

/// [`configure`] as a numbered migration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeployContracts;

impl DeployContracts {
    /// Sequence number; migration 1 is the runner's own bookkeeping.
    pub const NUMBER: u32 = 2;
    /// Migration name.
    pub const NAME: &'static str = "deploy_contracts";
}

impl Migration for DeployContracts {
    fn number(&self) -> u32 {
        Self::NUMBER
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn configure(&self, ctx: &mut dyn DeploymentContext) -> Result<(), MigrationError> {
        configure(ctx)
    }
}

// =============================================================================
// TESTS
// =============================================================================
