use thiserror::Error;

/// Errors produced by the byte-level primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("odd number of hex digits")]
    OddLength,

    #[error("invalid hex digit {character:?} at index {index}")]
    InvalidDigit { character: char, index: usize },

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("address checksum mismatch")]
    InvalidChecksum,

    #[error("value out of range: {0}")]
    OutOfRange(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_digit() {
        let err = PrimitiveError::InvalidDigit { character: 'g', index: 3 };
        assert_eq!(err.to_string(), "invalid hex digit 'g' at index 3");
    }

    #[test]
    fn display_invalid_length() {
        let err = PrimitiveError::InvalidLength { expected: 20, actual: 19 };
        assert_eq!(err.to_string(), "invalid length: expected 20 bytes, got 19");
    }
}
