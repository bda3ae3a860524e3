//! Strict ABI decoding.

use alloy_primitives::{I256, U256};
use quill_primitives::Address;

use crate::error::AbiError;
use crate::types::AbiType;
use crate::value::{int_fits, AbiValue};

/// Decodes a top-level argument tuple.
///
/// Strict mode: every offset must land inside the input, every declared
/// length must fit, and every padding byte that should be zero must be zero.
pub fn decode(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    for ty in types {
        ty.validate()?;
    }
    decode_tuple(types, data)
}

/// Decodes one tuple from its own data block. Dynamic-field offsets are
/// relative to the start of `block`.
fn decode_tuple(types: &[AbiType], block: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    let mut values = Vec::with_capacity(types.len());
    let mut pos = 0usize;

    for ty in types {
        if ty.is_dynamic() {
            let offset = read_offset(block, pos)?;
            let tail = &block[offset..];
            values.push(decode_dynamic(ty, tail)?);
            pos += 32;
        } else {
            let size = ty.head_size();
            let words = slice_checked(block, pos, size)?;
            values.push(decode_static(ty, words)?);
            pos += size;
        }
    }

    Ok(values)
}

/// Reads a head slot as a tail offset, bounds-checked against the block.
fn read_offset(block: &[u8], pos: usize) -> Result<usize, AbiError> {
    let word = slice_checked(block, pos, 32)?;
    let raw = U256::from_be_slice(word);
    let offset = usize::try_from(raw).map_err(|_| AbiError::OffsetOutOfBounds {
        offset: usize::MAX,
        len: block.len(),
    })?;
    if offset > block.len() {
        return Err(AbiError::OffsetOutOfBounds { offset, len: block.len() });
    }
    Ok(offset)
}

fn slice_checked(data: &[u8], pos: usize, len: usize) -> Result<&[u8], AbiError> {
    data.get(pos..pos + len).ok_or(AbiError::InputTooShort {
        needed: pos + len,
        available: data.len(),
    })
}

fn decode_dynamic(ty: &AbiType, tail: &[u8]) -> Result<AbiValue, AbiError> {
    match ty {
        AbiType::Bytes => Ok(AbiValue::Bytes(decode_length_prefixed(tail)?)),
        AbiType::String => {
            let bytes = decode_length_prefixed(tail)?;
            let s = String::from_utf8(bytes).map_err(|_| AbiError::InvalidUtf8)?;
            Ok(AbiValue::String(s))
        }
        AbiType::Array(element) => {
            let word = slice_checked(tail, 0, 32)?;
            let length = usize::try_from(U256::from_be_slice(word))
                .map_err(|_| AbiError::LengthOutOfBounds { length: usize::MAX })?;
            // Each element consumes at least one head slot.
            if length > tail.len() / 32 {
                return Err(AbiError::LengthOutOfBounds { length });
            }
            let element_types = vec![(**element).clone(); length];
            let values = decode_tuple(&element_types, &tail[32..])?;
            Ok(AbiValue::Array { element: (**element).clone(), values })
        }
        AbiType::FixedArray(element, length) => {
            let element_types = vec![(**element).clone(); *length];
            let values = decode_tuple(&element_types, tail)?;
            Ok(AbiValue::FixedArray { element: (**element).clone(), values })
        }
        AbiType::Tuple(fields) => Ok(AbiValue::Tuple(decode_tuple(fields, tail)?)),
        _ => unreachable!("static type in dynamic position"),
    }
}

fn decode_length_prefixed(tail: &[u8]) -> Result<Vec<u8>, AbiError> {
    let word = slice_checked(tail, 0, 32)?;
    let length = usize::try_from(U256::from_be_slice(word))
        .map_err(|_| AbiError::LengthOutOfBounds { length: usize::MAX })?;
    let payload = slice_checked(tail, 32, length)
        .map_err(|_| AbiError::LengthOutOfBounds { length })?;

    // The payload is padded to a word boundary with zeros.
    let partial = length % 32;
    if partial != 0 {
        let padding = slice_checked(tail, 32 + length, 32 - partial)
            .map_err(|_| AbiError::LengthOutOfBounds { length })?;
        if padding.iter().any(|&b| b != 0) {
            return Err(AbiError::NonZeroPadding);
        }
    }

    Ok(payload.to_vec())
}

fn decode_static(ty: &AbiType, words: &[u8]) -> Result<AbiValue, AbiError> {
    match ty {
        AbiType::Uint(bits) => {
            let value = U256::from_be_slice(words);
            if value.bit_len() > *bits {
                return Err(AbiError::IntegerOutOfRange { bits: *bits });
            }
            Ok(AbiValue::Uint { bits: *bits, value })
        }
        AbiType::Int(bits) => {
            let raw: [u8; 32] = words.try_into().map_err(|_| AbiError::InputTooShort {
                needed: 32,
                available: words.len(),
            })?;
            let value = I256::from_raw(U256::from_be_bytes(raw));
            if !int_fits(value, *bits) {
                return Err(AbiError::IntegerOutOfRange { bits: *bits });
            }
            Ok(AbiValue::Int { bits: *bits, value })
        }
        AbiType::Bool => {
            if words[..31].iter().any(|&b| b != 0) || words[31] > 1 {
                return Err(AbiError::InvalidBool);
            }
            Ok(AbiValue::Bool(words[31] == 1))
        }
        AbiType::Address => {
            if words[..12].iter().any(|&b| b != 0) {
                return Err(AbiError::NonZeroPadding);
            }
            let address = Address::from_slice(&words[12..32])
                .map_err(|_| AbiError::InputTooShort { needed: 32, available: words.len() })?;
            Ok(AbiValue::Address(address))
        }
        AbiType::FixedBytes(len) => {
            if words[*len..32].iter().any(|&b| b != 0) {
                return Err(AbiError::NonZeroPadding);
            }
            Ok(AbiValue::FixedBytes(words[..*len].to_vec()))
        }
        AbiType::FixedArray(element, length) => {
            let size = element.head_size();
            let mut values = Vec::with_capacity(*length);
            for i in 0..*length {
                values.push(decode_static(element, &words[i * size..(i + 1) * size])?);
            }
            Ok(AbiValue::FixedArray { element: (**element).clone(), values })
        }
        AbiType::Tuple(fields) => {
            let mut values = Vec::with_capacity(fields.len());
            let mut pos = 0;
            for field in fields {
                let size = field.head_size();
                values.push(decode_static(field, &words[pos..pos + size])?);
                pos += size;
            }
            Ok(AbiValue::Tuple(values))
        }
        AbiType::Bytes | AbiType::String | AbiType::Array(_) => {
            unreachable!("dynamic type in static position")
        }
    }
}
