//! Serde representations for JSON-RPC wire values.
//!
//! Quantities are minimal-nibble hex strings with a `0x` prefix (`"0x0"`
//! for zero, no leading zero digits); byte strings are even-length
//! `0x`-prefixed hex. Use with `#[serde(with = "...")]`:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct GasUsed {
//!     #[serde(with = "quill_primitives::quantity::u64_hex")]
//!     value: u64,
//! }
//! ```

use alloy_primitives::U256;
use serde::{de, Deserialize, Deserializer, Serializer};

fn parse_quantity_digits<'a, E: de::Error>(s: &'a str) -> Result<&'a str, E> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| de::Error::custom("quantity must start with 0x"))?;
    if digits.is_empty() {
        return Err(de::Error::custom("quantity must contain at least one digit"));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(de::Error::custom("quantity must not have leading zeros"));
    }
    Ok(digits)
}

/// `u64` as a minimal `0x` hex quantity.
pub mod u64_hex {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{value:x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = parse_quantity_digits(&s)?;
        u64::from_str_radix(digits, 16).map_err(de::Error::custom)
    }
}

/// `Option<u64>` as a minimal `0x` hex quantity or `null`.
pub mod u64_hex_opt {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&format!("0x{v:x}")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) => {
                let digits = parse_quantity_digits(&s)?;
                u64::from_str_radix(digits, 16)
                    .map(Some)
                    .map_err(de::Error::custom)
            }
        }
    }
}

/// `U256` as a minimal `0x` hex quantity.
pub mod u256_hex {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{value:x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = parse_quantity_digits(&s)?;
        U256::from_str_radix(digits, 16).map_err(de::Error::custom)
    }
}

/// Byte strings as even-length `0x` hex.
pub mod hex_bytes {
    use super::*;
    use crate::hex;

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_prefixed(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if !s.starts_with("0x") {
            return Err(de::Error::custom("byte string must start with 0x"));
        }
        hex::decode(&s).map_err(de::Error::custom)
    }
}
