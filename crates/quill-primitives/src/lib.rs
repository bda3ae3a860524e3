//! Byte-level primitives shared by every quill crate.
//!
//! This crate provides:
//! - Hex encoding/decoding with `0x`-prefix tolerance
//! - Keccak-256 hashing (one-shot, streaming, and `const fn` for
//!   compile-time selectors and event topics)
//! - Ethereum addresses with EIP-55 checksum support
//! - Serde representations for JSON-RPC quantities and byte strings

pub mod address;
pub mod error;
pub mod hash;
pub mod hex;
pub mod keccak_const;
pub mod quantity;

pub use address::Address;
pub use error::PrimitiveError;
pub use hash::{keccak256, keccak256_concat, Keccak256Hasher};

// Re-export the 256-bit integer and hash types used across the workspace.
pub use alloy_primitives::{B256, I256, U256};
