//! EIP-191 personal message hashing.

use alloy_primitives::B256;
use quill_primitives::keccak256_concat;

/// Hashes a message under the `personal_sign` scheme:
/// `keccak256("\x19Ethereum Signed Message:\n" ‖ len ‖ message)` where the
/// length is rendered in decimal ASCII.
pub fn hash_message(message: impl AsRef<[u8]>) -> B256 {
    let message = message.as_ref();
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    keccak256_concat(&[prefix.as_bytes(), message])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{recover_address, PrivateKey};
    use quill_primitives::keccak256;

    #[test]
    fn preimage_layout() {
        assert_eq!(
            hash_message(b"hello world"),
            keccak256(b"\x19Ethereum Signed Message:\n11hello world")
        );
    }

    #[test]
    fn prefix_changes_the_digest() {
        let message = b"hello world";
        assert_ne!(hash_message(message), keccak256(message));
    }

    #[test]
    fn length_is_decimal_ascii() {
        // A 100-byte message must use the three-digit length "100".
        let message = [b'a'; 100];
        let mut preimage = b"\x19Ethereum Signed Message:\n100".to_vec();
        preimage.extend_from_slice(&message);
        assert_eq!(hash_message(message), keccak256(&preimage));
    }

    #[test]
    fn signed_message_recovers_signer() {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        let key = PrivateKey::from_bytes(&bytes).unwrap();

        let sig = key.sign_message(b"attested").unwrap();
        let recovered = recover_address(hash_message(b"attested"), &sig).unwrap();
        assert_eq!(recovered, key.address());

        // Wire form carries v as 27/28.
        let wire = sig.to_rsv_bytes();
        assert!(wire[64] == 27 || wire[64] == 28);
    }

    #[test]
    fn empty_message_hashes() {
        assert_eq!(
            hash_message(b""),
            keccak256(b"\x19Ethereum Signed Message:\n0")
        );
    }
}
