//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the migrations and the outside world.
//!
//! - **Driving Ports (Inbound)**: `Migration`
//! - **Driven Ports (Outbound)**: `DeploymentContext`, `ArtifactResolver`,
//!   `ChainClient`, `MigrationLedger`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
