//! Keccak-256 hashing.
//!
//! Ethereum uses the unchanged NIST draft Keccak (padding byte `0x01`),
//! not final SHA-3. `keccak256` is the one-shot form; [`Keccak256Hasher`]
//! streams arbitrary-length chunks and matches the one-shot output.
//! Compile-time hashing lives in [`crate::keccak_const`].

use alloy_primitives::B256;
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 hash of `data`.
#[inline]
pub fn keccak256(data: impl AsRef<[u8]>) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    B256::from_slice(&hasher.finalize())
}

/// Computes the Keccak-256 hash of several concatenated parts without
/// allocating an intermediate buffer.
#[inline]
pub fn keccak256_concat(parts: &[&[u8]]) -> B256 {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    B256::from_slice(&hasher.finalize())
}

/// Streaming Keccak-256.
///
/// Accepts absorb chunks of any length; the input buffers are borrowed and
/// never modified.
#[derive(Debug, Default, Clone)]
pub struct Keccak256Hasher {
    inner: Keccak256,
}

impl Keccak256Hasher {
    pub fn new() -> Self {
        Self { inner: Keccak256::new() }
    }

    pub fn update(&mut self, chunk: impl AsRef<[u8]>) {
        self.inner.update(chunk.as_ref());
    }

    pub fn finalize(self) -> B256 {
        B256::from_slice(&self.inner.finalize())
    }
}

/// Derives the 4-byte function selector from a canonical signature string.
///
/// The signature must already be in canonical form (`transfer(address,uint256)`,
/// no spaces, no parameter names, explicit bit widths).
#[inline]
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Derives `topic0` for an event from its canonical signature string.
#[inline]
pub fn event_topic(signature: &str) -> B256 {
    keccak256(signature.as_bytes())
}
