//! # Artifact Directory
//!
//! Reads Truffle build output (`build/contracts/<Name>.json`). Only
//! `contractName`, `abi` and `bytecode` are read; the constructor is the ABI
//! entry of type `constructor`.
//!
//! [`ArtifactDirectory`] resolves by name and only opens `<Name>.json`, so an
//! unrelated broken artifact (for example one with unlinked library
//! placeholders in its bytecode) never blocks a migration. [`ArtifactDirectory::load`]
//! reads everything up front and skips files it cannot decode.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::adapters::registry::InMemoryArtifactRegistry;
use crate::domain::entities::{Artifact, ConstructorInput};
use crate::domain::value_objects::ArtifactName;
use crate::errors::MigrationError;
use crate::ports::outbound::ArtifactResolver;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildArtifact {
    contract_name: String,
    #[serde(default)]
    abi: Vec<AbiEntry>,
    #[serde(default)]
    bytecode: String,
}

#[derive(Debug, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    inputs: Vec<ConstructorInput>,
}

/// A directory of build artifacts, resolved lazily by name.
#[derive(Debug, Clone)]
pub struct ArtifactDirectory {
    dir: PathBuf,
}

impl ArtifactDirectory {
    /// Opens `dir` for lazy resolution.
    ///
    /// # Errors
    ///
    /// `MigrationError::ArtifactLoad` if `dir` is not a readable directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, MigrationError> {
        let dir = dir.into();
        let meta = fs::metadata(&dir).map_err(|e| load_error(&dir, e))?;
        if !meta.is_dir() {
            return Err(load_error(&dir, "not a directory"));
        }
        Ok(Self { dir })
    }

    /// Directory being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Path the artifact `name` is expected at.
    #[must_use]
    pub fn artifact_path(&self, name: &ArtifactName) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Parses every decodable `*.json` file in `dir`, in file-name order.
    ///
    /// Files that cannot be read or decoded are skipped with a warning;
    /// resolving one of them through [`ArtifactDirectory::open`] reports why.
    ///
    /// # Errors
    ///
    /// `MigrationError::ArtifactLoad` if the directory cannot be listed.
    pub fn load(dir: &Path) -> Result<InMemoryArtifactRegistry, MigrationError> {
        let entries = fs::read_dir(dir).map_err(|e| load_error(dir, e))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut registry = InMemoryArtifactRegistry::new();
        for path in &paths {
            let artifact = match Self::load_file(path) {
                Ok(artifact) => artifact,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping undecodable artifact");
                    continue;
                }
            };
            debug!(
                artifact = %artifact.name,
                arity = artifact.constructor_arity(),
                bytes = artifact.bytecode.len(),
                "Loaded artifact"
            );
            registry.register(artifact);
        }

        info!(dir = %dir.display(), count = registry.len(), "Artifacts loaded");
        Ok(registry)
    }

    /// Parses a single artifact file.
    ///
    /// # Errors
    ///
    /// `MigrationError::ArtifactLoad` if the file cannot be read or parsed,
    /// has a blank `contractName`, or its `bytecode` is not hex.
    pub fn load_file(path: &Path) -> Result<Artifact, MigrationError> {
        let raw = fs::read_to_string(path).map_err(|e| load_error(path, e))?;
        parse_artifact(path, &raw)
    }
}

impl ArtifactResolver for ArtifactDirectory {
    fn resolve(&self, name: &ArtifactName) -> Result<Artifact, MigrationError> {
        let path = self.artifact_path(name);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MigrationError::ArtifactNotFound(name.to_string()));
            }
            Err(e) => return Err(load_error(&path, e)),
        };
        let artifact = parse_artifact(&path, &raw)?;
        debug!(artifact = %artifact.name, path = %path.display(), "Resolved artifact");
        Ok(artifact)
    }
}

fn parse_artifact(path: &Path, raw: &str) -> Result<Artifact, MigrationError> {
    let build: BuildArtifact = serde_json::from_str(raw).map_err(|e| load_error(path, e))?;

    let name = ArtifactName::new(build.contract_name);
    if name.is_blank() {
        return Err(load_error(path, "contractName is empty"));
    }

    let digits = build.bytecode.strip_prefix("0x").unwrap_or(&build.bytecode);
    let bytecode = hex::decode(digits).map_err(|e| load_error(path, e))?;

    let constructor_inputs = build
        .abi
        .into_iter()
        .find(|entry| entry.kind == "constructor")
        .map(|entry| entry.inputs)
        .unwrap_or_default();

    Ok(Artifact::new(name, constructor_inputs, bytecode))
}

fn load_error(path: &Path, reason: impl std::fmt::Display) -> MigrationError {
    MigrationError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
