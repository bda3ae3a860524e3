//! The transport seam.

use alloy_primitives::B256;
use thiserror::Error;

use quill_primitives::Address;

/// Errors surfaced by a transport implementation.
///
/// The core never interprets or retries these; they propagate to the
/// caller verbatim.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("node returned error {code}: {message}")]
    Rpc { code: i64, message: String },
}

/// A minimal Ethereum node connection.
///
/// Implementations own their I/O (HTTP, WebSocket, a test double). The two
/// methods mirror `eth_call` and `eth_sendRawTransaction`.
pub trait Provider {
    /// Executes a read-only call against `to` and returns the raw result.
    fn call(&self, to: Address, calldata: &[u8]) -> Result<Vec<u8>, ProviderError>;

    /// Broadcasts signed transaction bytes and returns the transaction hash.
    fn send_raw(&self, raw: &[u8]) -> Result<B256, ProviderError>;
}
