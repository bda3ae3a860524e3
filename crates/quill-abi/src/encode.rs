//! Head/tail ABI encoding.

use alloy_primitives::U256;

use crate::error::AbiError;
use crate::value::AbiValue;

/// Encodes a sequence of values as the top-level argument tuple.
pub fn encode(values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    for value in values {
        value.abi_type().validate()?;
    }
    Ok(encode_tuple(values))
}

/// Encodes the fields of one tuple: static values inline in the head,
/// dynamic values leave an offset and append to the tail. Offsets are
/// measured from the start of this tuple's own encoding.
pub(crate) fn encode_tuple(values: &[AbiValue]) -> Vec<u8> {
    let head_size: usize = values.iter().map(|v| v.abi_type().head_size()).sum();

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for value in values {
        if value.is_dynamic() {
            head.extend_from_slice(&U256::from(head_size + tail.len()).to_be_bytes::<32>());
            encode_tail(value, &mut tail);
        } else {
            encode_static(value, &mut head);
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Writes the in-head words of a static value.
fn encode_static(value: &AbiValue, out: &mut Vec<u8>) {
    match value {
        AbiValue::Uint { value, .. } => {
            out.extend_from_slice(&value.to_be_bytes::<32>());
        }
        AbiValue::Int { value, .. } => {
            // Two's complement, already sign extended across 256 bits.
            out.extend_from_slice(&value.into_raw().to_be_bytes::<32>());
        }
        AbiValue::Bool(b) => {
            let mut word = [0u8; 32];
            word[31] = u8::from(*b);
            out.extend_from_slice(&word);
        }
        AbiValue::Address(address) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(address.as_bytes());
            out.extend_from_slice(&word);
        }
        AbiValue::FixedBytes(bytes) => {
            let mut word = [0u8; 32];
            word[..bytes.len()].copy_from_slice(bytes);
            out.extend_from_slice(&word);
        }
        AbiValue::FixedArray { values, .. } | AbiValue::Tuple(values) => {
            // A static composite inlines its members.
            for value in values {
                encode_static(value, out);
            }
        }
        AbiValue::Bytes(_) | AbiValue::String(_) | AbiValue::Array { .. } => {
            unreachable!("dynamic value in static position")
        }
    }
}

/// Writes the tail of a dynamic value.
fn encode_tail(value: &AbiValue, out: &mut Vec<u8>) {
    match value {
        AbiValue::Bytes(bytes) => encode_length_prefixed(bytes, out),
        AbiValue::String(s) => encode_length_prefixed(s.as_bytes(), out),
        AbiValue::Array { values, .. } => {
            out.extend_from_slice(&U256::from(values.len()).to_be_bytes::<32>());
            out.extend_from_slice(&encode_tuple(values));
        }
        AbiValue::FixedArray { values, .. } | AbiValue::Tuple(values) => {
            // Dynamic composite without a length prefix.
            out.extend_from_slice(&encode_tuple(values));
        }
        _ => unreachable!("static value in dynamic position"),
    }
}

fn encode_length_prefixed(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&U256::from(bytes.len()).to_be_bytes::<32>());
    out.extend_from_slice(bytes);
    let partial = bytes.len() % 32;
    if partial != 0 {
        out.extend_from_slice(&[0u8; 32][..32 - partial]);
    }
}
