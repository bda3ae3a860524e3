//! Decoded RLP trees.

use alloy_primitives::U256;
use alloy_rlp::Header;

use crate::error::RlpError;
use crate::{encode_bytes, encode_list};

/// A decoded RLP item borrowing from the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpValue<'a> {
    Bytes(&'a [u8]),
    List(Vec<RlpValue<'a>>),
}

impl<'a> RlpValue<'a> {
    /// Decodes exactly one item; the whole input must be consumed.
    pub fn decode(input: &'a [u8]) -> Result<Self, RlpError> {
        let mut buf = input;
        let value = Self::decode_item(&mut buf)?;
        if !buf.is_empty() {
            return Err(RlpError::TrailingBytes(buf.len()));
        }
        Ok(value)
    }

    fn decode_item(buf: &mut &'a [u8]) -> Result<Self, RlpError> {
        if buf.is_empty() {
            return Err(RlpError::InputTooShort);
        }
        let header = Header::decode(buf)?;
        if header.payload_length > buf.len() {
            return Err(RlpError::InputTooShort);
        }
        let (payload, rest) = buf.split_at(header.payload_length);
        *buf = rest;

        if header.list {
            let mut items = Vec::new();
            let mut inner = payload;
            while !inner.is_empty() {
                items.push(Self::decode_item(&mut inner)?);
            }
            Ok(RlpValue::List(items))
        } else {
            Ok(RlpValue::Bytes(payload))
        }
    }

    /// Re-encodes the tree into canonical RLP.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            RlpValue::Bytes(bytes) => encode_bytes(bytes, out),
            RlpValue::List(items) => encode_list(out, |payload| {
                for item in items {
                    item.encode_into(payload);
                }
            }),
        }
    }

    pub fn as_bytes(&self) -> Result<&'a [u8], RlpError> {
        match self {
            RlpValue::Bytes(bytes) => Ok(bytes),
            RlpValue::List(_) => Err(RlpError::Mismatch("byte string")),
        }
    }

    pub fn as_list(&self) -> Result<&[RlpValue<'a>], RlpError> {
        match self {
            RlpValue::List(items) => Ok(items),
            RlpValue::Bytes(_) => Err(RlpError::Mismatch("list")),
        }
    }

    /// Interprets a byte string as a canonical big-endian integer.
    pub fn as_uint(&self) -> Result<U256, RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.first() == Some(&0) {
            return Err(RlpError::LeadingZeroInteger);
        }
        if bytes.len() > 32 {
            return Err(RlpError::IntegerTooLarge);
        }
        Ok(U256::from_be_slice(bytes))
    }

    pub fn as_u64(&self) -> Result<u64, RlpError> {
        let value = self.as_uint()?;
        u64::try_from(value).map_err(|_| RlpError::IntegerTooLarge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn decode_single_byte() {
        assert_eq!(RlpValue::decode(&[0x2a]).unwrap(), RlpValue::Bytes(&[0x2a]));
    }

    #[test]
    fn decode_short_string() {
        let input = hex!("83646f67");
        assert_eq!(RlpValue::decode(&input).unwrap(), RlpValue::Bytes(b"dog"));
    }

    #[test]
    fn decode_long_string() {
        // "Lorem ipsum dolor sit amet, consectetur adipisicing elit" (56 bytes)
        let text = b"Lorem ipsum dolor sit amet, consectetur adipisicing elit";
        let mut input = vec![0xb8, 56];
        input.extend_from_slice(text);
        assert_eq!(
            RlpValue::decode(&input).unwrap(),
            RlpValue::Bytes(text.as_slice())
        );
    }

    #[test]
    fn decode_nested_list() {
        let input = hex!("c7c0c1c0c3c0c1c0");
        let value = RlpValue::decode(&input).unwrap();
        let outer = value.as_list().unwrap();
        assert_eq!(outer.len(), 3);
        assert_eq!(outer[0], RlpValue::List(vec![]));
    }

    #[test]
    fn reject_wrapped_single_byte() {
        // 0x05 must be encoded as itself, not as a one-byte string.
        assert_eq!(
            RlpValue::decode(&hex!("8105")).unwrap_err(),
            RlpError::NonCanonical
        );
    }

    #[test]
    fn reject_long_form_for_short_payload() {
        // 3-byte string must use the 0x83 short form.
        assert_eq!(
            RlpValue::decode(&hex!("b803646f67")).unwrap_err(),
            RlpError::NonCanonical
        );
    }

    #[test]
    fn reject_leading_zero_length() {
        let mut input = vec![0xb9, 0x00, 0x38];
        input.extend_from_slice(&[0u8; 56]);
        assert_eq!(RlpValue::decode(&input).unwrap_err(), RlpError::NonCanonical);
    }

    #[test]
    fn reject_truncated_payload() {
        assert_eq!(
            RlpValue::decode(&hex!("83646f")).unwrap_err(),
            RlpError::InputTooShort
        );
    }

    #[test]
    fn reject_trailing_garbage() {
        assert_eq!(
            RlpValue::decode(&hex!("83646f6700")).unwrap_err(),
            RlpError::TrailingBytes(1)
        );
    }

    #[test]
    fn reject_empty_input() {
        assert_eq!(RlpValue::decode(&[]).unwrap_err(), RlpError::InputTooShort);
    }

    #[test]
    fn uint_views() {
        let input = hex!("820400");
        let value = RlpValue::decode(&input).unwrap();
        assert_eq!(value.as_uint().unwrap(), U256::from(0x0400u64));
        assert_eq!(value.as_u64().unwrap(), 0x0400);
    }

    #[test]
    fn uint_rejects_leading_zero_bytes() {
        let value = RlpValue::Bytes(&[0x00, 0x04]);
        assert_eq!(value.as_uint().unwrap_err(), RlpError::LeadingZeroInteger);
    }

    #[test]
    fn empty_string_is_zero() {
        let value = RlpValue::Bytes(b"");
        assert_eq!(value.as_uint().unwrap(), U256::ZERO);
    }

    #[test]
    fn roundtrip_reencode() {
        let input = hex!("c883636174 83646f67");
        let value = RlpValue::decode(&input).unwrap();
        assert_eq!(value.encode(), input);
    }
}
