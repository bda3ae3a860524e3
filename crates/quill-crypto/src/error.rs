use thiserror::Error;

/// Errors from key handling, signing, and derivation.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("derivation failed: {0}")]
    DerivationFailed(String),
}
