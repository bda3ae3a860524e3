//! EIP-4844 blob commitments.
//!
//! Blobs themselves are opaque 128 KiB byte arrays; the commitments and
//! proofs that accompany them are produced by an external KZG library. Only
//! the versioned-hash derivation is in scope here.

use alloy_primitives::B256;
use quill_primitives::keccak256;

/// Size of one blob in bytes (4096 field elements of 32 bytes).
pub const BLOB_SIZE: usize = 131_072;

/// Version byte marking a KZG-committed blob hash.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;

/// Derives the versioned hash of a 48-byte KZG commitment: the Keccak-256
/// digest with its first byte overwritten by the version marker.
pub fn versioned_hash(commitment: &[u8; 48]) -> B256 {
    let mut digest = keccak256(commitment);
    digest.0[0] = VERSIONED_HASH_VERSION_KZG;
    digest
}

/// A hash is well-formed iff its first byte is the KZG version marker.
pub fn is_valid_versioned_hash(hash: &B256) -> bool {
    hash.0[0] == VERSIONED_HASH_VERSION_KZG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_byte_is_forced() {
        let commitment = [0x5au8; 48];
        let hash = versioned_hash(&commitment);
        assert_eq!(hash.0[0], VERSIONED_HASH_VERSION_KZG);
        assert!(is_valid_versioned_hash(&hash));
    }

    #[test]
    fn remaining_bytes_are_the_digest() {
        let commitment = [0x5au8; 48];
        let hash = versioned_hash(&commitment);
        let digest = keccak256(commitment);
        assert_eq!(&hash.0[1..], &digest.0[1..]);
    }

    #[test]
    fn wrong_version_detected() {
        let mut hash = versioned_hash(&[0u8; 48]);
        hash.0[0] = 0x02;
        assert!(!is_valid_versioned_hash(&hash));
    }
}
