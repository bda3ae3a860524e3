//! Recursive-Length-Prefix serialization.
//!
//! The encoding side exposes the small set of helpers the transaction
//! envelopes are built from: byte strings, minimal big-endian integers, and
//! nested lists written through a closure. The decoding side produces a
//! [`RlpValue`] tree of slices borrowed from the input and rejects every
//! non-canonical form (non-minimal length prefixes, leading zeros in
//! lengths, truncated payloads, trailing garbage).

pub mod error;
pub mod value;

pub use error::RlpError;
pub use value::RlpValue;

use alloy_primitives::U256;
use alloy_rlp::{Encodable, Header};

/// Encodes a byte string.
pub fn encode_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    bytes.encode(out);
}

/// Encodes an unsigned integer as its shortest big-endian byte string.
///
/// Zero encodes as the empty string (`0x80`).
pub fn encode_uint(value: U256, out: &mut Vec<u8>) {
    let bytes = value.to_be_bytes::<32>();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(32);
    bytes[start..].encode(out);
}

/// Encodes `u64` the same way; lives here so callers need no `U256` detour.
pub fn encode_u64(value: u64, out: &mut Vec<u8>) {
    value.encode(out);
}

/// Encodes a list whose payload is written by `f`.
///
/// The closure serializes the list items into a scratch buffer; the header
/// is prepended once the payload length is known.
pub fn encode_list<F>(out: &mut Vec<u8>, f: F)
where
    F: FnOnce(&mut Vec<u8>),
{
    let mut payload = Vec::new();
    f(&mut payload);

    Header { list: true, payload_length: payload.len() }.encode(out);
    out.extend_from_slice(&payload);
}
