//! # Artifact Registry
//!
//! In-memory name → artifact lookup.

use std::collections::BTreeMap;

use crate::domain::entities::Artifact;
use crate::domain::value_objects::ArtifactName;
use crate::errors::MigrationError;
use crate::ports::outbound::ArtifactResolver;

/// Artifacts keyed by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactRegistry {
    artifacts: BTreeMap<ArtifactName, Artifact>,
}

impl InMemoryArtifactRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an artifact, replacing any previous one with the same name.
    pub fn register(&mut self, artifact: Artifact) -> Option<Artifact> {
        self.artifacts.insert(artifact.name.clone(), artifact)
    }

    /// Builder-style [`Self::register`].
    #[must_use]
    pub fn with(mut self, artifact: Artifact) -> Self {
        self.register(artifact);
        self
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &ArtifactName> {
        self.artifacts.keys()
    }

    /// Number of registered artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactResolver for InMemoryArtifactRegistry {
    fn resolve(&self, name: &ArtifactName) -> Result<Artifact, MigrationError> {
        self.artifacts
            .get(name)
            .cloned()
            .ok_or_else(|| MigrationError::ArtifactNotFound(name.to_string()))
    }
}
