//! secp256k1 key pairs, digest signing, and public-key recovery.

use alloy_primitives::B256;
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use quill_primitives::{hex, Address};

use crate::error::CryptoError;
use crate::message::hash_message;
use crate::signature::Signature;

/// A secp256k1 secret scalar in `[1, n)`.
///
/// The inner key zeroizes its scalar on drop; intermediate byte copies made
/// during construction are wiped before returning.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Creates a key from 32 raw bytes, rejecting zero and values at or
    /// above the group order.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let mut scalar = *bytes;
        let result = SigningKey::from_bytes((&scalar).into())
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()));
        scalar.zeroize();
        Ok(Self { inner: result? })
    }

    /// Parses a key from a hex string (with or without `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let mut bytes: [u8; 32] = hex::decode_fixed(s)
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        let result = Self::from_bytes(&bytes);
        bytes.zeroize();
        result
    }

    /// Generates a key from the operating system RNG.
    pub fn random() -> Self {
        Self { inner: SigningKey::random(&mut OsRng) }
    }

    pub(crate) fn from_signing_key(inner: SigningKey) -> Self {
        Self { inner }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(*self.inner.verifying_key())
    }

    /// The Ethereum address controlled by this key.
    pub fn address(&self) -> Address {
        self.public_key().address()
    }

    /// Signs a 32-byte digest.
    ///
    /// The nonce is derived deterministically (RFC 6979 with SHA-256), so
    /// the same key and digest always yield the same signature. `s` is
    /// normalized to the low half of the order per EIP-2; when normalization
    /// replaces `s` with `n - s` the recovery parity flips with it.
    pub fn sign_hash(&self, digest: B256) -> Result<Signature, CryptoError> {
        let (sig, recovery_id): (EcdsaSignature, RecoveryId) = self
            .inner
            .sign_prehash(digest.as_slice())
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let (sig, recovery_id) = match sig.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (sig, recovery_id),
        };

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig.r().to_bytes());
        s.copy_from_slice(&sig.s().to_bytes());

        Ok(Signature::new(r, s, recovery_id.to_byte()))
    }

    /// Signs a message under the EIP-191 personal-message scheme.
    pub fn sign_message(&self, message: impl AsRef<[u8]>) -> Result<Signature, CryptoError> {
        self.sign_hash(hash_message(message))
    }
}

impl core::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // The scalar itself must never end up in logs.
        f.debug_struct("PrivateKey")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// A point on the secp256k1 curve.
///
/// Construction validates curve membership; the SEC1 compressed and
/// uncompressed encodings are both available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Parses a SEC1-encoded point (33-byte compressed or 65-byte
    /// uncompressed), rejecting points not on the curve.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }

    pub fn to_compressed(&self) -> [u8; 33] {
        let point = self.0.to_encoded_point(true);
        point.as_bytes().try_into().expect("compressed SEC1 point is 33 bytes")
    }

    pub fn to_uncompressed(&self) -> [u8; 65] {
        let point = self.0.to_encoded_point(false);
        point.as_bytes().try_into().expect("uncompressed SEC1 point is 65 bytes")
    }

    /// The low 20 bytes of `keccak256(x ‖ y)`.
    pub fn address(&self) -> Address {
        let uncompressed = self.to_uncompressed();
        Address::from_public_key_bytes(&uncompressed[1..])
            .expect("64-byte coordinate form is always valid")
    }

    pub(crate) fn from_verifying_key(key: VerifyingKey) -> Self {
        Self(key)
    }
}

/// Recovers the signing public key from a digest and signature.
///
/// Rejects signatures whose `r` or `s` fall outside `[1, n)` and any `s` in
/// the upper half of the order; a high-S value can never have come from
/// [`PrivateKey::sign_hash`].
pub fn recover_public_key(digest: B256, signature: &Signature) -> Result<PublicKey, CryptoError> {
    let sig = EcdsaSignature::from_slice(&signature.rs_bytes())
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    if sig.normalize_s().is_some() {
        return Err(CryptoError::InvalidSignature("s is in the upper half of the order".into()));
    }

    let recovery_id = RecoveryId::from_byte(signature.v())
        .ok_or(CryptoError::InvalidRecoveryId(signature.v()))?;

    VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id)
        .map(PublicKey::from_verifying_key)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))
}

/// Recovers the signer's address from a digest and signature.
pub fn recover_address(digest: B256, signature: &Signature) -> Result<Address, CryptoError> {
    Ok(recover_public_key(digest, signature)?.address())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use quill_primitives::keccak256;

    /// Well-known test key: the scalar 1.
    fn key_one() -> PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        PrivateKey::from_bytes(&bytes).unwrap()
    }

    const HALF_ORDER: &str = "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0";

    #[test]
    fn address_of_key_one() {
        assert_eq!(
            key_one().address().to_checksum(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn zero_key_rejected() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn key_at_group_order_rejected() {
        // n itself is out of range.
        let n: [u8; 32] =
            hex::decode_fixed("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
                .unwrap();
        assert!(PrivateKey::from_bytes(&n).is_err());
    }

    #[test]
    fn sign_and_recover() {
        let key = key_one();
        let digest = keccak256(b"quill signing test");
        let sig = key.sign_hash(digest).unwrap();
        assert_eq!(recover_address(digest, &sig).unwrap(), key.address());
    }

    #[test]
    fn signing_is_deterministic() {
        let key = key_one();
        let digest = keccak256(b"determinism");
        let first = key.sign_hash(digest).unwrap();
        let second = key.sign_hash(digest).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn s_is_always_low() {
        let key = key_one();
        let half = U256::from_str_radix(HALF_ORDER, 16).unwrap();
        for i in 0u8..16 {
            let digest = keccak256([i]);
            let sig = key.sign_hash(digest).unwrap();
            assert!(sig.s_u256() <= half, "high-S signature for digest {i}");
        }
    }

    #[test]
    fn recovery_rejects_high_s() {
        let key = key_one();
        let digest = keccak256(b"high-s");
        let sig = key.sign_hash(digest).unwrap();

        // Flip s to n - s: still a valid curve equation, no longer low-S.
        let n = U256::from_str_radix(
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
            16,
        )
        .unwrap();
        let high_s = (n - sig.s_u256()).to_be_bytes::<32>();
        let tampered = Signature::new(*sig.r(), high_s, sig.v() ^ 1);
        assert!(recover_public_key(digest, &tampered).is_err());
    }

    #[test]
    fn recovery_rejects_zero_r() {
        let digest = keccak256(b"zero-r");
        let sig = Signature::new([0u8; 32], [1u8; 32], 0);
        assert!(recover_public_key(digest, &sig).is_err());
    }

    #[test]
    fn wrong_digest_recovers_different_address() {
        let key = key_one();
        let sig = key.sign_hash(keccak256(b"first")).unwrap();
        let recovered = recover_address(keccak256(b"second"), &sig).unwrap();
        assert_ne!(recovered, key.address());
    }

    #[test]
    fn public_key_encodings_agree() {
        let key = PrivateKey::from_hex(
            "0x4646464646464646464646464646464646464646464646464646464646464646",
        )
        .unwrap();
        let public = key.public_key();

        let from_compressed = PublicKey::from_sec1_bytes(&public.to_compressed()).unwrap();
        let from_uncompressed = PublicKey::from_sec1_bytes(&public.to_uncompressed()).unwrap();
        assert_eq!(from_compressed.address(), from_uncompressed.address());
        assert_eq!(from_compressed.address(), key.address());
    }

    #[test]
    fn invalid_point_rejected() {
        // x = 0 with an even-y tag is not on the curve.
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        assert!(PublicKey::from_sec1_bytes(&bytes).is_err());
    }

    #[test]
    fn debug_does_not_leak_scalar() {
        let key = key_one();
        let output = format!("{key:?}");
        assert!(!output.contains("0000000000000001"));
        assert!(output.contains("PrivateKey"));
    }
}
