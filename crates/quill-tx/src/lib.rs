//! Ethereum transaction envelopes and typed-data hashing.
//!
//! All four deployed transaction formats are supported as distinct types
//! under the [`Transaction`] enum: legacy (with EIP-155 replay protection),
//! EIP-2930 access-list, EIP-1559 fee-market, and EIP-4844 blob
//! transactions. Each knows its signing pre-image, its signed wire
//! encoding, and its hash; [`Transaction::sign`] runs the whole pipeline
//! against a [`quill_crypto::PrivateKey`].
//!
//! EIP-712 typed structured data lives in [`eip712`]; blob versioned-hash
//! derivation in [`blob`].

pub mod blob;
pub mod eip712;
pub mod error;
pub mod transaction;

pub use blob::{is_valid_versioned_hash, versioned_hash, BLOB_SIZE};
pub use eip712::{Eip712Domain, TypedData};
pub use error::TxError;
pub use transaction::{
    AccessListEntry, Eip1559Transaction, Eip2930Transaction, Eip4844Transaction,
    LegacyTransaction, SignedTransaction, Transaction,
};
