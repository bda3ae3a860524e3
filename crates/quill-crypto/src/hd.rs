//! BIP-32 hierarchical key derivation and the BIP-44 Ethereum path.
//!
//! The master node splits `HMAC-SHA512("Bitcoin seed", seed)` into a secret
//! and a chain code; children derive through `HMAC-SHA512(chain_code, data)`
//! with the hardened/normal data layouts from BIP-32. Ethereum accounts live
//! at `m/44'/60'/0'/0/{index}`.

use bip32::{DerivationPath, XPrv};

use quill_primitives::Address;

use crate::error::CryptoError;
use crate::keys::{PrivateKey, PublicKey};

/// Builds the BIP-44 Ethereum path for an address index.
fn ethereum_path(index: u32) -> String {
    format!("m/44'/60'/0'/0/{index}")
}

/// A key derived from a seed, together with its node metadata.
pub struct DerivedKey {
    key: PrivateKey,
    chain_code: [u8; 32],
    path: String,
}

impl DerivedKey {
    pub fn private_key(&self) -> &PrivateKey {
        &self.key
    }

    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    pub fn address(&self) -> Address {
        self.key.address()
    }

    /// The BIP-32 chain code of the derived node.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// The derivation path this key was produced from.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Derives a key from a 64-byte seed along an explicit path.
pub fn derive_from_path(seed: &[u8], path: &str) -> Result<DerivedKey, CryptoError> {
    let parsed: DerivationPath = path
        .parse()
        .map_err(|e: bip32::Error| CryptoError::DerivationFailed(e.to_string()))?;

    let xprv = XPrv::derive_from_path(seed, &parsed)
        .map_err(|e| CryptoError::DerivationFailed(e.to_string()))?;

    Ok(DerivedKey {
        key: PrivateKey::from_signing_key(xprv.private_key().clone()),
        chain_code: xprv.attrs().chain_code,
        path: path.to_string(),
    })
}

/// Derives the Ethereum account key at `m/44'/60'/0'/0/{index}`.
pub fn derive_ethereum_key(seed: &[u8], index: u32) -> Result<DerivedKey, CryptoError> {
    derive_from_path(seed, &ethereum_path(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic::mnemonic_to_seed;
    use zeroize::Zeroizing;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_seed() -> Zeroizing<[u8; 64]> {
        mnemonic_to_seed(TEST_MNEMONIC, "").unwrap()
    }

    #[test]
    fn first_account_address() {
        // The canonical first address of the reference mnemonic.
        let seed = test_seed();
        let key = derive_ethereum_key(seed.as_slice(), 0).unwrap();
        assert_eq!(key.path(), "m/44'/60'/0'/0/0");
        assert_eq!(
            key.address().to_checksum(),
            "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let seed = test_seed();
        let first = derive_ethereum_key(seed.as_slice(), 0).unwrap();
        let second = derive_ethereum_key(seed.as_slice(), 0).unwrap();
        assert_eq!(first.address(), second.address());
        assert_eq!(first.chain_code(), second.chain_code());
    }

    #[test]
    fn indices_yield_distinct_keys() {
        let seed = test_seed();
        let account0 = derive_ethereum_key(seed.as_slice(), 0).unwrap();
        let account1 = derive_ethereum_key(seed.as_slice(), 1).unwrap();
        assert_ne!(account0.address(), account1.address());
    }

    #[test]
    fn explicit_path_matches_helper() {
        let seed = test_seed();
        let via_helper = derive_ethereum_key(seed.as_slice(), 7).unwrap();
        let via_path = derive_from_path(seed.as_slice(), "m/44'/60'/0'/0/7").unwrap();
        assert_eq!(via_helper.address(), via_path.address());
    }

    #[test]
    fn hardened_and_normal_steps_differ() {
        let seed = test_seed();
        let hardened = derive_from_path(seed.as_slice(), "m/44'/60'/0'").unwrap();
        let normal = derive_from_path(seed.as_slice(), "m/44/60/0").unwrap();
        assert_ne!(hardened.address(), normal.address());
    }

    #[test]
    fn malformed_path_rejected() {
        let seed = test_seed();
        assert!(derive_from_path(seed.as_slice(), "44'/60'").is_err());
        assert!(derive_from_path(seed.as_slice(), "m/44'/x").is_err());
    }
}
