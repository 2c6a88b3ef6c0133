//! # Domain Services
//!
//! Pure functions for address checksums, constructor encoding and contract
//! address derivation. Deterministic, no I/O.

use sha3::{Digest, Keccak256};

use crate::domain::entities::Artifact;
use crate::domain::value_objects::{Address, Hash};
use crate::errors::{AddressError, MigrationError};

// =============================================================================
// HASHING
// =============================================================================

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash::new(out)
}

// =============================================================================
// EIP-55 CHECKSUM
// =============================================================================

/// Checksum state of an address literal's letter casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumStatus {
    /// Mixed case matching EIP-55.
    Valid,
    /// All lower or all upper case; carries no checksum.
    Unchecked,
    /// Mixed case not matching EIP-55.
    Mismatch {
        /// Correctly checksummed form.
        expected: String,
    },
}

/// An address literal that parsed, with the state of its checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAddress {
    /// Parsed address.
    pub address: Address,
    /// Checksum state of the source text.
    pub checksum: ChecksumStatus,
}

/// Encodes an address in EIP-55 mixed case.
///
/// A hex letter is upper-cased when the matching nibble of
/// `keccak256(lowercase_hex)` is 8 or more.
#[must_use]
pub fn checksum_encode(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash.0[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses a literal and classifies its checksum.
///
/// Never rewrites the literal; a mismatch is reported, not corrected.
pub fn validate_address_literal(literal: &str) -> Result<ValidatedAddress, AddressError> {
    let address = Address::parse(literal)?;
    let digits = &literal[2..];

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());

    let checksum = if !(has_lower && has_upper) {
        ChecksumStatus::Unchecked
    } else {
        let expected = checksum_encode(&address);
        if expected[2..] == *digits {
            ChecksumStatus::Valid
        } else {
            ChecksumStatus::Mismatch { expected }
        }
    };

    Ok(ValidatedAddress { address, checksum })
}

// =============================================================================
// CONSTRUCTOR ENCODING
// =============================================================================

/// ABI-encodes constructor arguments for `artifact`.
///
/// Every argument is a static `address` word: 12 zero bytes then the address.
/// The caller checks arity first; this only checks parameter types.
pub fn encode_constructor_args(
    artifact: &Artifact,
    args: &[Address],
) -> Result<Vec<u8>, MigrationError> {
    if let Some(input) = artifact
        .constructor_inputs
        .iter()
        .find(|input| !input.is_address())
    {
        return Err(MigrationError::UnsupportedParameterType {
            artifact: artifact.name.to_string(),
            ty: input.ty.clone(),
        });
    }

    let mut encoded = Vec::with_capacity(32 * args.len());
    for arg in args {
        encoded.extend_from_slice(&[0u8; 12]);
        encoded.extend_from_slice(arg.as_bytes());
    }
    Ok(encoded)
}

/// Creation bytecode followed by the encoded constructor arguments.
pub fn build_init_code(artifact: &Artifact, args: &[Address]) -> Result<Vec<u8>, MigrationError> {
    let encoded = encode_constructor_args(artifact, args)?;
    let mut init_code = Vec::with_capacity(artifact.bytecode.len() + encoded.len());
    init_code.extend_from_slice(&artifact.bytecode);
    init_code.extend_from_slice(&encoded);
    Ok(init_code)
}

// =============================================================================
// CONTRACT ADDRESS COMPUTATION
// =============================================================================

/// Computes the address of a contract created by `sender` at `nonce`.
///
/// Address = keccak256(rlp(\[sender, nonce\]))\[12:\]
#[must_use]
pub fn compute_contract_address(sender: Address, nonce: u64) -> Address {
    let mut content = Vec::with_capacity(30);

    // 20-byte string: 0x80 + 20
    content.push(0x94);
    content.extend_from_slice(sender.as_bytes());

    if nonce == 0 {
        content.push(0x80);
    } else if nonce < 0x80 {
        content.push(nonce as u8);
    } else {
        let nonce_bytes = trim_leading_zeros(nonce);
        content.push(0x80 + nonce_bytes.len() as u8);
        content.extend_from_slice(&nonce_bytes);
    }

    // Content never exceeds 30 bytes, so the short list header always applies.
    let mut rlp = Vec::with_capacity(content.len() + 1);
    rlp.push(0xc0 + content.len() as u8);
    rlp.extend_from_slice(&content);

    let hash = keccak256(&rlp);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash.0[12..32]);
    Address::new(addr)
}

/// Transaction hash the in-memory chain assigns to a creation.
#[must_use]
pub fn creation_transaction_hash(sender: Address, nonce: u64, init_code: &[u8]) -> Hash {
    let mut data = Vec::with_capacity(28 + init_code.len());
    data.extend_from_slice(sender.as_bytes());
    data.extend_from_slice(&nonce.to_be_bytes());
    data.extend_from_slice(init_code);
    keccak256(&data)
}

fn trim_leading_zeros(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(7);
    bytes[start..].to_vec()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ConstructorInput;

    fn addr(s: &str) -> Address {
        Address::parse(s).unwrap()
    }

    #[test]
    fn test_keccak_empty() {
        assert_eq!(
            keccak256(&[]).to_string(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_checksum_known_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let address = addr(&expected.to_lowercase());
            assert_eq!(checksum_encode(&address), expected);
        }
    }

    #[test]
    fn test_validate_valid_checksum() {
        let validated = validate_address_literal("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap();
        assert_eq!(validated.checksum, ChecksumStatus::Valid);
    }

    #[test]
    fn test_validate_single_case_is_unchecked() {
        let lower = validate_address_literal("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(lower.checksum, ChecksumStatus::Unchecked);

        let upper = validate_address_literal("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").unwrap();
        assert_eq!(upper.checksum, ChecksumStatus::Unchecked);
        assert_eq!(lower.address, upper.address);
    }

    #[test]
    fn test_validate_mismatch_reports_expected() {
        // First letter flipped to upper case.
        let validated = validate_address_literal("0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap();
        assert_eq!(
            validated.checksum,
            ChecksumStatus::Mismatch {
                expected: "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string()
            }
        );
    }

    #[test]
    fn test_validate_propagates_parse_errors() {
        assert_eq!(
            validate_address_literal("0x1234").unwrap_err(),
            AddressError::InvalidLength { actual: 4 }
        );
    }

    #[test]
    fn test_compute_contract_address() {
        let sender = addr("0x6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");
        assert_eq!(
            compute_contract_address(sender, 0),
            addr("0xcd234a471b72ba2f1ccf0a70fcaba648a5eecd8d")
        );
        assert_eq!(
            compute_contract_address(sender, 1),
            addr("0x343c43a37d37dff08ae8c4a11544c718abb4fcf8")
        );
    }

    #[test]
    fn test_compute_contract_address_distinct_for_large_nonces() {
        let sender = addr("0x6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");
        let a = compute_contract_address(sender, 127);
        let b = compute_contract_address(sender, 128);
        let c = compute_contract_address(sender, u64::MAX);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_encode_constructor_args_pads_addresses() {
        let artifact = Artifact::new(
            "Kake2",
            vec![ConstructorInput::address("a"), ConstructorInput::address("b")],
            vec![0x60],
        );
        let a = Address::new([0x11; 20]);
        let b = Address::new([0x22; 20]);

        let encoded = encode_constructor_args(&artifact, &[a, b]).unwrap();
        assert_eq!(encoded.len(), 64);
        assert_eq!(&encoded[..12], &[0u8; 12]);
        assert_eq!(&encoded[12..32], a.as_bytes());
        assert_eq!(&encoded[44..64], b.as_bytes());
    }

    #[test]
    fn test_encode_rejects_non_address_parameters() {
        let artifact = Artifact::new(
            "Token",
            vec![ConstructorInput {
                name: "supply".to_string(),
                ty: "uint256".to_string(),
            }],
            vec![],
        );
        let err = encode_constructor_args(&artifact, &[Address::ZERO]).unwrap_err();
        assert!(matches!(
            err,
            MigrationError::UnsupportedParameterType { ref ty, .. } if ty == "uint256"
        ));
    }

    #[test]
    fn test_build_init_code_appends_args() {
        let artifact = Artifact::new("Kake2", vec![ConstructorInput::address("a")], vec![0xAA, 0xBB]);
        let init_code = build_init_code(&artifact, &[Address::new([0x33; 20])]).unwrap();
        assert_eq!(init_code.len(), 2 + 32);
        assert_eq!(&init_code[..2], &[0xAA, 0xBB]);
    }
}
