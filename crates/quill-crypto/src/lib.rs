//! secp256k1 signing and key derivation for the quill Ethereum library.
//!
//! This crate provides:
//! - Private/public key handling with Ethereum address derivation
//! - ECDSA signing over 32-byte digests (RFC 6979 deterministic nonces,
//!   EIP-2 low-S form) and public-key recovery
//! - EIP-155 `v` encoding and EIP-191 personal message hashing
//! - BIP-39 mnemonics and BIP-32/BIP-44 hierarchical key derivation
//!
//! Secret material is zeroized when dropped; signing is deterministic, so
//! the same key and digest always produce the same signature.

pub mod error;
pub mod hd;
pub mod keys;
pub mod message;
pub mod mnemonic;
pub mod signature;

pub use error::CryptoError;
pub use hd::{derive_ethereum_key, derive_from_path, DerivedKey};
pub use keys::{recover_address, recover_public_key, PrivateKey, PublicKey};
pub use message::hash_message;
pub use signature::{chain_id_from_v, eip155_v, parity_from_v, Signature};
