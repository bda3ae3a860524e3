//! Hex codec with `0x`-prefix tolerance.
//!
//! JSON-RPC byte strings carry a `0x` prefix; raw test vectors usually do
//! not. Every decoder here accepts both, and the encoders state their prefix
//! behavior in the name.

use crate::error::PrimitiveError;

/// Strips an optional `0x`/`0X` prefix.
pub fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decodes a hex string (with or without `0x` prefix) into bytes.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitiveError> {
    let stripped = strip_prefix(s);
    hex::decode(stripped).map_err(|e| match e {
        hex::FromHexError::OddLength => PrimitiveError::OddLength,
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            PrimitiveError::InvalidDigit { character: c, index }
        }
        // `hex::decode` only reports this for fixed-size targets.
        hex::FromHexError::InvalidStringLength => PrimitiveError::OddLength,
    })
}

/// Decodes a hex string into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], PrimitiveError> {
    let bytes = decode(s)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| PrimitiveError::InvalidLength { expected: N, actual })
}

/// Encodes bytes as lowercase hex without a prefix.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Encodes bytes as lowercase hex with a `0x` prefix.
pub fn encode_prefixed(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_with_and_without_prefix() {
        assert_eq!(decode("0xdeadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode("0Xdeadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_odd_length_rejected() {
        assert_eq!(decode("0xabc").unwrap_err(), PrimitiveError::OddLength);
    }

    #[test]
    fn decode_bad_digit_rejected() {
        assert!(matches!(
            decode("0xzz").unwrap_err(),
            PrimitiveError::InvalidDigit { character: 'z', index: 0 }
        ));
    }

    #[test]
    fn decode_fixed_length_checked() {
        let bytes: [u8; 4] = decode_fixed("0xdeadbeef").unwrap();
        assert_eq!(bytes, [0xde, 0xad, 0xbe, 0xef]);

        let err = decode_fixed::<4>("0xdead").unwrap_err();
        assert_eq!(err, PrimitiveError::InvalidLength { expected: 4, actual: 2 });
    }

    #[test]
    fn encode_roundtrip() {
        let bytes = [0x01u8, 0x02, 0xff];
        assert_eq!(encode(bytes), "0102ff");
        assert_eq!(encode_prefixed(bytes), "0x0102ff");
        assert_eq!(decode(&encode_prefixed(bytes)).unwrap(), bytes.to_vec());
    }
}
