//! JSON-RPC value types and the transport seam.
//!
//! The core library never performs I/O. The [`Provider`] trait is the only
//! contact point with the outside world: `call` for read-only contract
//! execution and `send_raw` for broadcasting a signed transaction. The
//! types in [`types`] are passive serde representations of the standard
//! JSON-RPC responses, using minimal-hex quantities and `0x` byte strings.

pub mod erc20;
pub mod provider;
pub mod types;

pub use provider::{Provider, ProviderError};
pub use types::{Block, BlockTag, Log, Receipt};
