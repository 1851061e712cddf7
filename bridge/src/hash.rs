//! Hashing helpers.
//!
//! All digests are keccak256 so that identifiers computed here can be
//! recomputed by EVM counterparts and off-chain tooling.
//!
//! # Endpoint fingerprint
//! Remote bridge endpoints are variable-length byte strings (20-byte EVM
//! addresses, 32-byte program ids, bech32 text, ...). The registry stores
//! only `keccak256(identifier)[12..32]`, the same truncation Solidity uses for
//! `address(uint160(uint256(keccak256(data))))`.

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// 20-byte fingerprint of a remote bridge endpoint identifier
pub fn bridge_address_hash(identifier: &[u8]) -> [u8; 20] {
    let digest = keccak256(identifier);
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest[12..]);
    out
}

/// u64 as a big-endian, left-padded 32-byte word
pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// u128 as a big-endian, left-padded 32-byte word
pub fn u128_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Byte string as a left-padded 32-byte word
///
/// Inputs longer than 32 bytes are hashed first.
pub fn bytes_word(bytes: &[u8]) -> [u8; 32] {
    if bytes.len() > 32 {
        return keccak256(bytes);
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(bytes);
    word
}

/// Convert bytes to a 0x-prefixed hex string (for attributes/logging)
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix)
pub fn from_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}
