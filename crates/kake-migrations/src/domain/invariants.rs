//! # Domain Invariants
//!
//! Checks a queued request must pass before anything is sent to the chain.
//!
//! - Artifact identity: the resolved artifact carries the requested name.
//! - Constructor arity: argument count equals constructor parameter count.

use crate::domain::entities::{Artifact, DeploymentRequest};
use crate::errors::MigrationError;

/// Argument count must equal the artifact's constructor parameter count.
pub fn check_constructor_arity(
    request: &DeploymentRequest,
    artifact: &Artifact,
) -> Result<(), MigrationError> {
    let expected = artifact.constructor_arity();
    let actual = request.arity();
    if expected == actual {
        Ok(())
    } else {
        Err(MigrationError::ConstructorArityMismatch {
            artifact: request.artifact.to_string(),
            expected,
            actual,
        })
    }
}

/// A resolver must hand back the artifact that was asked for.
pub fn check_artifact_identity(
    request: &DeploymentRequest,
    artifact: &Artifact,
) -> Result<(), MigrationError> {
    if request.artifact == artifact.name {
        Ok(())
    } else {
        Err(MigrationError::ArtifactNotFound(request.artifact.to_string()))
    }
}

/// Runs every request-level check.
pub fn check_request(request: &DeploymentRequest, artifact: &Artifact) -> Result<(), MigrationError> {
    check_artifact_identity(request, artifact)?;
    check_constructor_arity(request, artifact)
}
