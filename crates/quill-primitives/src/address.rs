use core::fmt;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PrimitiveError;
use crate::hash::keccak256;
use crate::hex;

/// A 20-byte Ethereum account address.
///
/// The canonical textual form is lowercase `0x`-prefixed hex; the EIP-55
/// mixed-case form is available through [`Address::to_checksum`]. Parsing a
/// mixed-case string verifies its checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const LEN: usize = 20;

    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
        let bytes: [u8; 20] = slice.try_into().map_err(|_| PrimitiveError::InvalidLength {
            expected: Self::LEN,
            actual: slice.len(),
        })?;
        Ok(Self(bytes))
    }

    /// Parses a `0x`-prefixed hex address.
    ///
    /// All-lowercase and all-uppercase inputs are accepted as-is; mixed-case
    /// input must carry a valid EIP-55 checksum.
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        let bytes: [u8; 20] = hex::decode_fixed(s)?;
        let address = Self(bytes);

        let digits = hex::strip_prefix(s);
        let all_lower = !digits.chars().any(|c| c.is_ascii_uppercase());
        let all_upper = !digits.chars().any(|c| c.is_ascii_lowercase());
        if !all_lower && !all_upper {
            let checksummed = address.to_checksum();
            if hex::strip_prefix(&checksummed) != digits {
                return Err(PrimitiveError::InvalidChecksum);
            }
        }
        Ok(address)
    }

    /// Derives the address from an uncompressed secp256k1 public key.
    ///
    /// Accepts either the 64-byte `x ‖ y` form or the 65-byte SEC1 form with
    /// its `0x04` tag. The address is the low 20 bytes of the Keccak-256
    /// digest of `x ‖ y`.
    pub fn from_public_key_bytes(bytes: &[u8]) -> Result<Self, PrimitiveError> {
        let coordinates = match bytes.len() {
            64 => bytes,
            65 => {
                if bytes[0] != 0x04 {
                    return Err(PrimitiveError::OutOfRange(
                        "uncompressed public key must start with 0x04",
                    ));
                }
                &bytes[1..]
            }
            actual => {
                return Err(PrimitiveError::InvalidLength { expected: 64, actual });
            }
        };

        let digest = keccak256(coordinates);
        let mut address = [0u8; 20];
        address.copy_from_slice(&digest[12..]);
        Ok(Self(address))
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub const fn into_bytes(self) -> [u8; 20] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Formats the address with its EIP-55 mixed-case checksum.
    ///
    /// The lowercase hex digits are hashed with Keccak-256 and each letter is
    /// uppercased when the corresponding hash nibble exceeds 7.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (digest[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
            if c.is_ascii_alphabetic() && nibble > 7 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_prefixed(self.0))
    }
}

impl FromStr for Address {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_prefixed(self.0))
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}
