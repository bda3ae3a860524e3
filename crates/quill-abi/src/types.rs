//! ABI type descriptions.

use core::fmt;

use crate::error::AbiError;

/// A Solidity ABI type.
///
/// `Uint`/`Int` carry their bit width (8–256, multiple of 8); `FixedBytes`
/// carries its length (1–32). Composite types nest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiType {
    Uint(usize),
    Int(usize),
    Bool,
    Address,
    FixedBytes(usize),
    Bytes,
    String,
    FixedArray(Box<AbiType>, usize),
    Array(Box<AbiType>),
    Tuple(Vec<AbiType>),
}

impl AbiType {
    /// Whether values of this type live in the tail of an encoding.
    ///
    /// `bytes`, `string`, and `T[]` are always dynamic; fixed arrays and
    /// tuples are dynamic iff a component is.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(element, _) => element.is_dynamic(),
            AbiType::Tuple(fields) => fields.iter().any(AbiType::is_dynamic),
            _ => false,
        }
    }

    /// Bytes this type occupies in its tuple's head.
    ///
    /// Dynamic types hold a single 32-byte offset slot; static composites
    /// inline their full encoding.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            AbiType::FixedArray(element, len) => element.head_size() * len,
            AbiType::Tuple(fields) => fields.iter().map(AbiType::head_size).sum(),
            _ => 32,
        }
    }

    /// Validates the type's parameters (bit widths, byte lengths).
    pub fn validate(&self) -> Result<(), AbiError> {
        match self {
            AbiType::Uint(bits) | AbiType::Int(bits) => {
                if *bits == 0 || *bits > 256 || bits % 8 != 0 {
                    return Err(AbiError::InvalidType("integer width must be 8..=256, multiple of 8"));
                }
            }
            AbiType::FixedBytes(len) => {
                if *len == 0 || *len > 32 {
                    return Err(AbiError::InvalidType("bytesN length must be 1..=32"));
                }
            }
            AbiType::FixedArray(element, len) => {
                if *len == 0 {
                    return Err(AbiError::InvalidType("fixed array length must be non-zero"));
                }
                element.validate()?;
            }
            AbiType::Array(element) => element.validate()?,
            AbiType::Tuple(fields) => {
                for field in fields {
                    field.validate()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// The canonical signature fragment (`uint256`, `(uint8,bytes)[3]`, …).
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Bool => write!(f, "bool"),
            AbiType::Address => write!(f, "address"),
            AbiType::FixedBytes(len) => write!(f, "bytes{len}"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::String => write!(f, "string"),
            AbiType::FixedArray(element, len) => write!(f, "{element}[{len}]"),
            AbiType::Array(element) => write!(f, "{element}[]"),
            AbiType::Tuple(fields) => {
                write!(f, "(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{field}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_fragments() {
        assert_eq!(AbiType::Uint(256).signature(), "uint256");
        assert_eq!(AbiType::Int(8).signature(), "int8");
        assert_eq!(AbiType::FixedBytes(10).signature(), "bytes10");
        assert_eq!(
            AbiType::Array(Box::new(AbiType::Uint(32))).signature(),
            "uint32[]"
        );
        assert_eq!(
            AbiType::FixedArray(
                Box::new(AbiType::Tuple(vec![AbiType::Uint(8), AbiType::Bytes])),
                3
            )
            .signature(),
            "(uint8,bytes)[3]"
        );
    }

    #[test]
    fn dynamic_classification() {
        assert!(!AbiType::Uint(256).is_dynamic());
        assert!(!AbiType::FixedBytes(32).is_dynamic());
        assert!(AbiType::Bytes.is_dynamic());
        assert!(AbiType::String.is_dynamic());
        assert!(AbiType::Array(Box::new(AbiType::Bool)).is_dynamic());

        // Fixed array and tuple inherit from their components.
        assert!(!AbiType::FixedArray(Box::new(AbiType::Bool), 4).is_dynamic());
        assert!(AbiType::FixedArray(Box::new(AbiType::Bytes), 4).is_dynamic());
        assert!(!AbiType::Tuple(vec![AbiType::Bool, AbiType::Address]).is_dynamic());
        assert!(AbiType::Tuple(vec![AbiType::Bool, AbiType::String]).is_dynamic());
    }

    #[test]
    fn head_sizes() {
        assert_eq!(AbiType::Uint(8).head_size(), 32);
        assert_eq!(AbiType::Bytes.head_size(), 32);
        assert_eq!(AbiType::FixedArray(Box::new(AbiType::Bool), 4).head_size(), 128);
        assert_eq!(
            AbiType::Tuple(vec![
                AbiType::Bool,
                AbiType::FixedArray(Box::new(AbiType::Uint(256)), 2)
            ])
            .head_size(),
            96
        );
        // Dynamic composites collapse to one offset slot.
        assert_eq!(AbiType::FixedArray(Box::new(AbiType::Bytes), 4).head_size(), 32);
    }

    #[test]
    fn parameter_validation() {
        assert!(AbiType::Uint(256).validate().is_ok());
        assert!(AbiType::Uint(0).validate().is_err());
        assert!(AbiType::Uint(12).validate().is_err());
        assert!(AbiType::Uint(264).validate().is_err());
        assert!(AbiType::FixedBytes(33).validate().is_err());
        assert!(AbiType::FixedBytes(0).validate().is_err());
        assert!(AbiType::FixedArray(Box::new(AbiType::Uint(12)), 2).validate().is_err());
    }
}
