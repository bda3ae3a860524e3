use thiserror::Error;

/// ABI codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("invalid type parameter: {0}")]
    InvalidType(&'static str),

    #[error("value does not match type: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("input too short: need {needed} bytes, have {available}")]
    InputTooShort { needed: usize, available: usize },

    #[error("tail offset {offset} is outside the input ({len} bytes)")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("declared length {length} exceeds the input")]
    LengthOutOfBounds { length: usize },

    #[error("padding bytes must be zero")]
    NonZeroPadding,

    #[error("integer does not fit in {bits} bits")]
    IntegerOutOfRange { bits: usize },

    #[error("boolean word must be 0 or 1")]
    InvalidBool,

    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
}
