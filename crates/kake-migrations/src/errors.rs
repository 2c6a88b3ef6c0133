//! # Error Types
//!
//! All error types for migration planning and execution.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// ADDRESS ERRORS
// =============================================================================

/// Errors from parsing or validating an address literal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Literal does not start with `0x`.
    #[error("address must start with 0x")]
    MissingPrefix,

    /// Wrong number of hex digits after the prefix.
    #[error("address must have 40 hex digits, got {actual}")]
    InvalidLength {
        /// Hex digits found.
        actual: usize,
    },

    /// Non-hex character in the literal.
    #[error("address contains non-hex characters")]
    InvalidHex,

    /// Mixed-case literal whose casing does not match EIP-55.
    #[error("EIP-55 checksum mismatch, expected {expected}")]
    ChecksumMismatch {
        /// Correctly checksummed form.
        expected: String,
    },
}

// =============================================================================
// CHAIN ERRORS
// =============================================================================

/// Errors reported by a chain client while submitting a deployment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Init code was empty.
    #[error("init code is empty")]
    EmptyInitCode,

    /// Init code size exceeded limit (EIP-3860).
    #[error("init code size exceeded: {size} > {max} bytes")]
    InitCodeTooLarge {
        /// Submitted size in bytes.
        size: usize,
        /// Limit in bytes.
        max: usize,
    },

    /// Sender nonce cannot be incremented any further.
    #[error("nonce exhausted for sender {sender}")]
    NonceExhausted {
        /// Sender address.
        sender: String,
    },

    /// Chain endpoint could not be reached.
    #[error("chain unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// MIGRATION ERRORS
// =============================================================================

/// Errors that abort a migration run.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// No artifact registered under the requested name.
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),

    /// An artifact file could not be read or parsed.
    #[error("failed to load artifact {path}: {reason}")]
    ArtifactLoad {
        /// File or directory that failed.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// A constructor argument is not a well-formed address.
    #[error("invalid address literal {literal:?}: {source}")]
    InvalidAddress {
        /// Literal as declared.
        literal: String,
        /// Parse failure.
        #[source]
        source: AddressError,
    },

    /// Strict mode: a mixed-case literal failed EIP-55.
    #[error("address {literal} fails EIP-55 checksum, expected {expected}")]
    ChecksumMismatch {
        /// Literal as declared.
        literal: String,
        /// Correctly checksummed form.
        expected: String,
    },

    /// Argument count differs from the artifact's constructor inputs.
    #[error("constructor arity mismatch for {artifact}: expected {expected}, got {actual}")]
    ConstructorArityMismatch {
        /// Artifact being deployed.
        artifact: String,
        /// Constructor parameter count.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },

    /// Constructor parameter type that cannot be encoded from an address.
    #[error("unsupported constructor parameter type {ty:?} in {artifact}")]
    UnsupportedParameterType {
        /// Artifact being deployed.
        artifact: String,
        /// Solidity type of the parameter.
        ty: String,
    },

    /// Chain client rejected a deployment.
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    /// Migration ledger could not be read or written.
    #[error("ledger error: {0}")]
    Ledger(String),
}

impl MigrationError {
    /// Returns true if the error was raised before any transaction was sent.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        !matches!(self, Self::Chain(_) | Self::Ledger(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_error_display() {
        let err = MigrationError::ConstructorArityMismatch {
            artifact: "Kake3".to_string(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "constructor arity mismatch for Kake3: expected 3, got 2"
        );
    }

    #[test]
    fn test_chain_error_conversion() {
        let err: MigrationError = ChainError::EmptyInitCode.into();
        assert!(matches!(err, MigrationError::Chain(ChainError::EmptyInitCode)));
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_nonce_exhausted_display() {
        let err = ChainError::NonceExhausted {
            sender: "0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "nonce exhausted for sender 0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1"
        );
    }

    #[test]
    fn test_invalid_address_keeps_source() {
        let err = MigrationError::InvalidAddress {
            literal: "0x12".to_string(),
            source: AddressError::InvalidLength { actual: 2 },
        };
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("40 hex digits, got 2"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
