//! # Deployment Contexts
//!
//! `RecordingContext` keeps an in-order call log, for plans and tests.
//! `QueueingContext` is what the runner hands to a migration.

use tracing::debug;

use crate::domain::entities::DeploymentRequest;
use crate::domain::value_objects::{AddressLiteral, ArtifactName};
use crate::errors::MigrationError;
use crate::ports::outbound::DeploymentContext;

// =============================================================================
// RECORDING CONTEXT
// =============================================================================

/// Records every `deploy` call in order.
///
/// Can be told to fail on a given call to observe how a migration reacts.
#[derive(Default)]
pub struct RecordingContext {
    calls: Vec<DeploymentRequest>,
    fail_at: Option<(usize, Box<dyn Fn() -> MigrationError + Send>)>,
}

impl RecordingContext {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes call number `index` (0-based) return the error built by `make_error`.
    ///
    /// The failing call is not recorded.
    #[must_use]
    pub fn failing_at(
        index: usize,
        make_error: impl Fn() -> MigrationError + Send + 'static,
    ) -> Self {
        Self {
            calls: Vec::new(),
            fail_at: Some((index, Box::new(make_error))),
        }
    }

    /// Recorded calls.
    #[must_use]
    pub fn calls(&self) -> &[DeploymentRequest] {
        &self.calls
    }

    /// Consumes the recorder, returning the calls.
    #[must_use]
    pub fn into_calls(self) -> Vec<DeploymentRequest> {
        self.calls
    }

    /// Calls as plain `(artifact, args)` string pairs.
    #[must_use]
    pub fn call_log(&self) -> Vec<(String, Vec<String>)> {
        self.calls
            .iter()
            .map(|call| {
                (
                    call.artifact.to_string(),
                    call.args.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }
}

impl std::fmt::Debug for RecordingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingContext")
            .field("calls", &self.calls)
            .field("fail_at", &self.fail_at.as_ref().map(|(index, _)| index))
            .finish()
    }
}

impl DeploymentContext for RecordingContext {
    fn deploy(
        &mut self,
        artifact: &ArtifactName,
        args: Vec<AddressLiteral>,
    ) -> Result<(), MigrationError> {
        let index = self.calls.len();
        if let Some((fail_index, make_error)) = &self.fail_at {
            if *fail_index == index {
                return Err(make_error());
            }
        }
        self.calls.push(DeploymentRequest::new(artifact.clone(), args));
        Ok(())
    }
}

// =============================================================================
// QUEUEING CONTEXT
// =============================================================================

/// Queues requests for validation and execution after `configure` returns.
#[derive(Debug, Default)]
pub struct QueueingContext {
    queue: Vec<DeploymentRequest>,
}

impl QueueingContext {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Consumes the queue, returning requests in submission order.
    #[must_use]
    pub fn into_requests(self) -> Vec<DeploymentRequest> {
        self.queue
    }
}

impl DeploymentContext for QueueingContext {
    fn deploy(
        &mut self,
        artifact: &ArtifactName,
        args: Vec<AddressLiteral>,
    ) -> Result<(), MigrationError> {
        debug!(
            artifact = %artifact,
            args = args.len(),
            position = self.queue.len(),
            "Queued deployment"
        );
        self.queue.push(DeploymentRequest::new(artifact.clone(), args));
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
