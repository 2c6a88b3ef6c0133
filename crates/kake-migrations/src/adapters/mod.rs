//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the outbound ports: deployment contexts,
//! artifact sources, the in-memory chain and migration ledgers.

pub mod artifact_dir;
pub mod chain;
pub mod context;
pub mod ledger;
pub mod registry;

pub use artifact_dir::*;
pub use chain::*;
pub use context::*;
pub use ledger::*;
pub use registry::*;
