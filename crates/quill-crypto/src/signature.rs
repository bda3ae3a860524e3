//! Recoverable ECDSA signatures and the EIP-155 `v` encoding.

use core::fmt;

use alloy_primitives::U256;
use quill_primitives::hex;

use crate::error::CryptoError;

/// A secp256k1 ECDSA signature with its recovery id.
///
/// `v` stores the raw recovery id: bit 0 is the parity of the ephemeral
/// point's y-coordinate, bit 1 is set when its x-coordinate exceeded the
/// group order. The legacy `27/28` and EIP-155 forms are derived views, so
/// conversion between them is lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
    v: u8,
}

impl Signature {
    /// Length of the `r ‖ s ‖ v` wire form.
    pub const BYTE_LEN: usize = 65;

    pub const fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Self { r, s, v }
    }

    /// Parses the 65-byte `r ‖ s ‖ v` form.
    ///
    /// The trailing byte may be a raw recovery id (`0`..`3`) or the legacy
    /// `27/28` form.
    pub fn from_rsv_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != Self::BYTE_LEN {
            return Err(CryptoError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                Self::BYTE_LEN,
                bytes.len()
            )));
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        let v = match bytes[64] {
            v @ 0..=3 => v,
            v @ 27..=28 => v - 27,
            v => return Err(CryptoError::InvalidRecoveryId(v)),
        };

        Ok(Self { r, s, v })
    }

    /// Serializes as `r ‖ s ‖ v` with `v` in the legacy `27/28` form, the
    /// convention used for personal-message signatures.
    pub fn to_rsv_bytes(&self) -> [u8; Self::BYTE_LEN] {
        let mut out = [0u8; Self::BYTE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = 27 + (self.v & 1);
        out
    }

    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        Self::from_rsv_bytes(&bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(self.to_rsv_bytes())
    }

    pub const fn r(&self) -> &[u8; 32] {
        &self.r
    }

    pub const fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// The raw recovery id.
    pub const fn v(&self) -> u8 {
        self.v
    }

    /// The y-parity bit used by typed transactions.
    pub const fn y_parity(&self) -> u8 {
        self.v & 1
    }

    pub fn r_u256(&self) -> U256 {
        U256::from_be_bytes(self.r)
    }

    pub fn s_u256(&self) -> U256 {
        U256::from_be_bytes(self.s)
    }

    /// `r ‖ s` without the recovery byte.
    pub fn rs_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// The `v` value for a legacy transaction on the given chain.
    pub fn to_eip155_v(&self, chain_id: u64) -> u64 {
        eip155_v(self.y_parity(), chain_id)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Encodes a recovery parity into the legacy-transaction `v` value.
///
/// With a chain id this is the EIP-155 form `chain_id * 2 + 35 + parity`;
/// chain id zero selects the pre-EIP-155 `27 + parity` form.
pub fn eip155_v(parity: u8, chain_id: u64) -> u64 {
    if chain_id == 0 {
        27 + u64::from(parity)
    } else {
        chain_id * 2 + 35 + u64::from(parity)
    }
}

/// Recovers the parity bit from a legacy `v`, checking it against the
/// expected chain id.
pub fn parity_from_v(v: u64, chain_id: u64) -> Result<u8, CryptoError> {
    let parity = if chain_id == 0 {
        match v {
            27 | 28 => v - 27,
            _ => {
                return Err(CryptoError::InvalidSignature(format!(
                    "pre-EIP-155 v must be 27 or 28, got {v}"
                )))
            }
        }
    } else {
        let base = chain_id * 2 + 35;
        if v != base && v != base + 1 {
            return Err(CryptoError::InvalidSignature(format!(
                "v {v} does not match chain id {chain_id}"
            )));
        }
        v - base
    };
    Ok(parity as u8)
}

/// Extracts the chain id embedded in an EIP-155 `v`.
///
/// Returns `None` for the pre-EIP-155 `27/28` values.
pub fn chain_id_from_v(v: u64) -> Option<u64> {
    if v >= 35 {
        Some((v - 35) / 2)
    } else {
        None
    }
}
