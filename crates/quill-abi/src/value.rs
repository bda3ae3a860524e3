//! ABI value trees.

use alloy_primitives::{I256, U256};
use quill_primitives::Address;

use crate::error::AbiError;
use crate::types::AbiType;

/// A Solidity value together with enough type information to encode it.
///
/// Array variants carry their element type so empty arrays still know their
/// canonical signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint { bits: usize, value: U256 },
    Int { bits: usize, value: I256 },
    Bool(bool),
    Address(Address),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    FixedArray { element: AbiType, values: Vec<AbiValue> },
    Array { element: AbiType, values: Vec<AbiValue> },
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// Builds a `uintN` value, checking the width and range.
    pub fn uint(bits: usize, value: U256) -> Result<Self, AbiError> {
        AbiType::Uint(bits).validate()?;
        if value.bit_len() > bits {
            return Err(AbiError::IntegerOutOfRange { bits });
        }
        Ok(AbiValue::Uint { bits, value })
    }

    /// Builds an `intN` value, checking the width and range.
    pub fn int(bits: usize, value: I256) -> Result<Self, AbiError> {
        AbiType::Int(bits).validate()?;
        if !int_fits(value, bits) {
            return Err(AbiError::IntegerOutOfRange { bits });
        }
        Ok(AbiValue::Int { bits, value })
    }

    /// Builds a `bytesN` value from 1–32 bytes.
    pub fn fixed_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, AbiError> {
        let bytes = bytes.into();
        AbiType::FixedBytes(bytes.len()).validate()?;
        Ok(AbiValue::FixedBytes(bytes))
    }

    /// Builds a `T[n]` value, checking element types.
    pub fn fixed_array(element: AbiType, values: Vec<AbiValue>) -> Result<Self, AbiError> {
        for value in &values {
            value.check_type(&element)?;
        }
        AbiType::FixedArray(Box::new(element.clone()), values.len()).validate()?;
        Ok(AbiValue::FixedArray { element, values })
    }

    /// Builds a `T[]` value, checking element types.
    pub fn array(element: AbiType, values: Vec<AbiValue>) -> Result<Self, AbiError> {
        element.validate()?;
        for value in &values {
            value.check_type(&element)?;
        }
        Ok(AbiValue::Array { element, values })
    }

    /// The type this value encodes as.
    pub fn abi_type(&self) -> AbiType {
        match self {
            AbiValue::Uint { bits, .. } => AbiType::Uint(*bits),
            AbiValue::Int { bits, .. } => AbiType::Int(*bits),
            AbiValue::Bool(_) => AbiType::Bool,
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::FixedBytes(bytes) => AbiType::FixedBytes(bytes.len()),
            AbiValue::Bytes(_) => AbiType::Bytes,
            AbiValue::String(_) => AbiType::String,
            AbiValue::FixedArray { element, values } => {
                AbiType::FixedArray(Box::new(element.clone()), values.len())
            }
            AbiValue::Array { element, .. } => AbiType::Array(Box::new(element.clone())),
            AbiValue::Tuple(fields) => {
                AbiType::Tuple(fields.iter().map(AbiValue::abi_type).collect())
            }
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.abi_type().is_dynamic()
    }

    /// Checks this value against an expected type.
    pub fn check_type(&self, expected: &AbiType) -> Result<(), AbiError> {
        let actual = self.abi_type();
        if &actual != expected {
            return Err(AbiError::TypeMismatch {
                expected: expected.signature(),
                actual: actual.signature(),
            });
        }
        Ok(())
    }
}

/// Whether a two's-complement value survives truncation to `bits` bits.
pub(crate) fn int_fits(value: I256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    let raw = value.into_raw();
    let shifted = raw >> (bits - 1);
    shifted == U256::ZERO || shifted == (U256::MAX >> (bits - 1))
}
