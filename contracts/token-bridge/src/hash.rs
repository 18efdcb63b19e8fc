//! Hashing and hex helpers.
//!
//! Attestation bodies are identified by `keccak256(body)`, and wrapped asset
//! keys are keccak256 digests as well (see `derive`). Both must match other
//! bridge implementations byte for byte.

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Convert 32-byte value to a 0x-prefixed hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_basic() {
        // keccak256("hello")
        let result = keccak256(b"hello");
        assert_eq!(
            bytes32_to_hex(&result),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            bytes32_to_hex(&keccak256(&[])),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hex_is_prefixed_and_padded() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x0a;
        let hex = bytes32_to_hex(&bytes);
        assert_eq!(hex.len(), 66);
        assert!(hex.starts_with("0x00"));
        assert!(hex.ends_with("0a"));
    }
}
