//! Cross-module flows: artifacts on disk, the runner, and chain ports.

pub mod deploy_flow;
pub mod plan;
