use thiserror::Error;

/// Decoding errors. The decoder only accepts canonical RLP, so any
/// non-minimal form surfaces as [`RlpError::NonCanonical`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlpError {
    #[error("input too short")]
    InputTooShort,

    #[error("non-canonical length prefix")]
    NonCanonical,

    #[error("declared length overflows")]
    Overflow,

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("integer has leading zero bytes")]
    LeadingZeroInteger,

    #[error("integer wider than 256 bits")]
    IntegerTooLarge,

    #[error("expected {0}")]
    Mismatch(&'static str),
}

impl From<alloy_rlp::Error> for RlpError {
    fn from(err: alloy_rlp::Error) -> Self {
        match err {
            alloy_rlp::Error::InputTooShort => RlpError::InputTooShort,
            alloy_rlp::Error::Overflow => RlpError::Overflow,
            // Everything else alloy reports at the header layer is a
            // canonicality violation.
            _ => RlpError::NonCanonical,
        }
    }
}
