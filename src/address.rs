//! Address validation
//!
//! Structural validation for the two supported chains:
//! - Bitcoin mainnet: Base58Check (P2PKH/P2SH) and bech32/bech32m
//!   (P2WPKH/P2WSH/P2TR) with witness-version rules
//! - Ethereum: 0x-prefixed hex with EIP-55 checksum verification and
//!   normalization
//!
//! Validation is purely local; no network I/O happens here.

use crate::error::{BalanceError, BalanceResult};
use crate::types::Chain;
use bech32::{self, Variant};
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

/// Longest input accepted before any decoding is attempted
pub const MAX_ADDRESS_LENGTH: usize = 120;

/// Reasons an address fails structural validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("address exceeds {MAX_ADDRESS_LENGTH} characters")]
    TooLong,

    #[error("invalid Base58 encoding")]
    Base58,

    #[error("invalid Base58Check checksum")]
    Base58Checksum,

    #[error("unknown version byte 0x{0:02X}")]
    VersionByte(u8),

    #[error("invalid bech32 encoding")]
    Bech32,

    #[error("wrong bech32 variant for witness version {0}")]
    Bech32Variant(u8),

    #[error("unsupported witness version {version} or program length {length}")]
    WitnessProgram { version: u8, length: usize },

    #[error("address is for a different network")]
    WrongNetwork,

    #[error("expected 0x followed by 40 hex characters")]
    HexFormat,

    #[error("EIP-55 checksum mismatch")]
    ChecksumMismatch,

    #[error("unrecognized address format")]
    UnknownFormat,
}

/// Address type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    // Bitcoin
    P2PKH, // Legacy (1...)
    P2SH,  // Script hash (3...)
    P2WPKH, // Native SegWit (bc1q..., 20-byte program)
    P2WSH, // Native SegWit script (bc1q..., 32-byte program)
    P2TR,  // Taproot (bc1p...)

    // Ethereum
    EOA,
}

/// Outcome of a successful validation
#[derive(Debug, Clone)]
pub struct Checked {
    /// Canonical form of the address (lowercased bech32, EIP-55 hex)
    pub normalized: String,
    pub kind: AddressKind,
    /// Non-fatal observations worth surfacing in logs
    pub warnings: Vec<String>,
}

/// Validate an address for the given chain
pub fn validate(address: &str, chain: Chain) -> Result<Checked, AddressError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(AddressError::Empty);
    }
    if trimmed.len() > MAX_ADDRESS_LENGTH {
        return Err(AddressError::TooLong);
    }

    match chain {
        Chain::Bitcoin => validate_bitcoin(trimmed),
        Chain::Ethereum => validate_ethereum(trimmed),
    }
}

/// Boolean contract used by callers that only need pass/fail
pub fn is_valid(address: &str, chain: Chain) -> bool {
    validate(address, chain).is_ok()
}

/// Validation that short-circuits the balance query: invalid input becomes a
/// chain-specific `InvalidAddress` error before any request is built.
pub fn require_valid(address: &str, chain: Chain) -> BalanceResult<Checked> {
    validate(address, chain).map_err(|e| {
        BalanceError::invalid_address(format!(
            "Invalid {} address '{}': {}",
            chain.symbol(),
            address,
            e
        ))
    })
}

// =============================================================================
// Bitcoin
// =============================================================================

fn validate_bitcoin(address: &str) -> Result<Checked, AddressError> {
    let lower = address.to_lowercase();

    if lower.starts_with("bc1") {
        return validate_bech32_bitcoin(address);
    }
    if address.starts_with('1') || address.starts_with('3') {
        return validate_base58_bitcoin(address);
    }
    // Testnet prefixes are structurally fine but belong to another network
    if lower.starts_with("tb1")
        || address.starts_with('m')
        || address.starts_with('n')
        || address.starts_with('2')
    {
        return Err(AddressError::WrongNetwork);
    }

    Err(AddressError::UnknownFormat)
}

fn validate_bech32_bitcoin(address: &str) -> Result<Checked, AddressError> {
    // bech32 rejects mixed case by itself; normalize to lowercase up front
    let lower = address.to_lowercase();
    let (hrp, data, variant) = bech32::decode(&lower).map_err(|_| AddressError::Bech32)?;

    if hrp != "bc" {
        return Err(AddressError::WrongNetwork);
    }
    if data.is_empty() {
        return Err(AddressError::Bech32);
    }

    let witness_version = data[0].to_u8();
    let program_5bit: Vec<u8> = data[1..].iter().map(|u| u.to_u8()).collect();
    let program = convert_bits_5_to_8(&program_5bit);

    let kind = match (witness_version, program.len()) {
        (0, 20) => AddressKind::P2WPKH,
        (0, 32) => AddressKind::P2WSH,
        (1, 32) => AddressKind::P2TR,
        (version, length) => return Err(AddressError::WitnessProgram { version, length }),
    };

    // BIP-0350: version 0 uses bech32, later versions use bech32m
    let expected_variant = if witness_version == 0 {
        Variant::Bech32
    } else {
        Variant::Bech32m
    };
    if variant != expected_variant {
        return Err(AddressError::Bech32Variant(witness_version));
    }

    Ok(Checked {
        normalized: lower,
        kind,
        warnings: Vec::new(),
    })
}

fn validate_base58_bitcoin(address: &str) -> Result<Checked, AddressError> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|_| AddressError::Base58)?;
    // version byte + hash160 + 4-byte checksum
    if decoded.len() != 25 {
        return Err(AddressError::Base58);
    }

    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    let hash = sha256(&sha256(payload));
    if &hash[..4] != checksum {
        return Err(AddressError::Base58Checksum);
    }

    let mut warnings = Vec::new();
    let kind = match payload[0] {
        0x00 => {
            warnings.push("legacy P2PKH address".to_string());
            AddressKind::P2PKH
        }
        0x05 => AddressKind::P2SH,
        // Testnet version bytes
        0x6F | 0xC4 => return Err(AddressError::WrongNetwork),
        version => return Err(AddressError::VersionByte(version)),
    };

    Ok(Checked {
        normalized: address.to_string(),
        kind,
        warnings,
    })
}

// =============================================================================
// Ethereum
// =============================================================================

fn validate_ethereum(address: &str) -> Result<Checked, AddressError> {
    if !address.starts_with("0x") || address.len() != 42 {
        return Err(AddressError::HexFormat);
    }

    let hex_part = &address[2..];
    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::HexFormat);
    }

    let bytes = hex::decode(hex_part.to_lowercase()).map_err(|_| AddressError::HexFormat)?;
    let checksummed = to_checksum_address(&bytes);

    let has_mixed_case = hex_part.chars().any(|c| c.is_ascii_uppercase())
        && hex_part.chars().any(|c| c.is_ascii_lowercase());

    let mut warnings = Vec::new();
    if has_mixed_case {
        if address != checksummed {
            return Err(AddressError::ChecksumMismatch);
        }
    } else {
        warnings.push("address has no EIP-55 checksum; normalized".to_string());
    }

    if bytes.iter().all(|&b| b == 0) {
        warnings.push("zero address".to_string());
    }

    Ok(Checked {
        normalized: checksummed,
        kind: AddressKind::EOA,
        warnings,
    })
}

/// EIP-55 checksum encoding of a 20-byte address
pub fn to_checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut result = String::from("0x");
    for (i, ch) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };

        if ch.is_ascii_digit() || nibble < 8 {
            result.push(ch);
        } else {
            result.push(ch.to_ascii_uppercase());
        }
    }

    result
}

// =============================================================================
// Helpers
// =============================================================================

fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Convert 5-bit values to 8-bit bytes (for bech32 witness programs)
fn convert_bits_5_to_8(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::new();
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;

    for value in data {
        acc = (acc << 5) | (*value as u32);
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            result.push((acc >> bits) as u8);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_bitcoin_bech32_validation() {
        // SegWit v0 (P2WPKH)
        let checked = validate("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq", Chain::Bitcoin)
            .expect("valid P2WPKH");
        assert_eq!(checked.kind, AddressKind::P2WPKH);

        // Taproot (P2TR)
        let checked = validate(
            "bc1p5d7rjq7g6rdk2yhzks9smlaqtedr4dekq08ge8ztwac72sfr9rusxg3297",
            Chain::Bitcoin,
        )
        .expect("valid P2TR");
        assert_eq!(checked.kind, AddressKind::P2TR);
    }

    #[test]
    fn test_bitcoin_bech32_uppercase_is_normalized() {
        let checked = validate("BC1QAR0SRRR7XFKVY5L643LYDNW9RE59GTZZWF5MDQ", Chain::Bitcoin)
            .expect("uppercase bech32 is valid");
        assert_eq!(
            checked.normalized,
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"
        );
    }

    #[test]
    fn test_bitcoin_legacy_addresses() {
        let checked = validate("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", Chain::Bitcoin)
            .expect("genesis address is valid");
        assert_eq!(checked.kind, AddressKind::P2PKH);
        assert!(checked.warnings.iter().any(|w| w.contains("legacy")));

        let checked = validate("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy", Chain::Bitcoin)
            .expect("P2SH address is valid");
        assert_eq!(checked.kind, AddressKind::P2SH);
    }

    #[test]
    fn test_bitcoin_corrupted_checksum() {
        // Last character changed
        let err = validate("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb", Chain::Bitcoin).unwrap_err();
        assert_eq!(err, AddressError::Base58Checksum);
    }

    #[test]
    fn test_bitcoin_testnet_rejected() {
        let err = validate(
            "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx",
            Chain::Bitcoin,
        )
        .unwrap_err();
        assert_eq!(err, AddressError::WrongNetwork);
    }

    #[test]
    fn test_ethereum_checksum_validation() {
        // Valid EIP-55 checksum
        let checked = validate("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045", Chain::Ethereum)
            .expect("checksummed address is valid");
        assert_eq!(checked.kind, AddressKind::EOA);
        assert!(checked.warnings.is_empty());

        // All-lowercase: accepted, normalized, warned
        let checked = validate("0xd8da6bf26964af9d7eed9e03e53415d37aa96045", Chain::Ethereum)
            .expect("lowercase address is valid");
        assert_eq!(
            checked.normalized,
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        );
        assert!(checked.warnings.iter().any(|w| w.contains("EIP-55")));

        // Corrupted mixed case
        let err = validate("0xD8dA6BF26964aF9D7eEd9e03E53415D37aA96045", Chain::Ethereum)
            .unwrap_err();
        assert_eq!(err, AddressError::ChecksumMismatch);
    }

    #[test]
    fn test_ethereum_format_errors() {
        assert_eq!(
            validate("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045", Chain::Ethereum).unwrap_err(),
            AddressError::HexFormat
        );
        assert_eq!(
            validate("0xd8dA6BF2", Chain::Ethereum).unwrap_err(),
            AddressError::HexFormat
        );
        assert_eq!(
            validate(
                "0xZZdA6BF26964aF9D7eEd9e03E53415D37aA96045",
                Chain::Ethereum
            )
            .unwrap_err(),
            AddressError::HexFormat
        );
    }

    #[test]
    fn test_empty_and_oversized_input() {
        assert_eq!(validate("", Chain::Bitcoin).unwrap_err(), AddressError::Empty);
        assert_eq!(
            validate("   ", Chain::Ethereum).unwrap_err(),
            AddressError::Empty
        );
        let oversized = "1".repeat(MAX_ADDRESS_LENGTH + 1);
        assert_eq!(
            validate(&oversized, Chain::Bitcoin).unwrap_err(),
            AddressError::TooLong
        );
    }

    #[test]
    fn test_is_valid_contract() {
        assert!(is_valid("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", Chain::Bitcoin));
        assert!(!is_valid("not-an-address", Chain::Bitcoin));
        assert!(is_valid(
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
            Chain::Ethereum
        ));
        assert!(!is_valid("0x1234", Chain::Ethereum));
    }

    #[test]
    fn test_require_valid_maps_to_invalid_address() {
        let err = require_valid("invalid", Chain::Ethereum).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAddress);
        assert!(err.message.contains("ETH"));

        let checked = require_valid("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", Chain::Bitcoin)
            .expect("valid address passes through");
        assert_eq!(checked.normalized, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
    }
}
