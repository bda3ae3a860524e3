use alloy_primitives::B256;
use thiserror::Error;

use quill_crypto::CryptoError;

/// Transaction construction, signing, and typed-data errors.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("EIP-4844 transaction carries no blob versioned hashes")]
    EmptyBlobList,

    #[error("versioned hash {0} does not start with the KZG version byte")]
    InvalidVersionedHash(B256),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("invalid typed data: {0}")]
    InvalidTypedData(String),

    #[error("undefined type in typed data: {0}")]
    UndefinedType(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for TxError {
    fn from(err: serde_json::Error) -> Self {
        TxError::Json(err.to_string())
    }
}
