//! EIP-712 typed structured data hashing.
//!
//! The digest a wallet signs is
//! `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ hashStruct(message))`.
//! Struct encoding follows the ABI rules with two substitutions: `bytes`
//! and `string` contribute their Keccak-256 hash, and arrays contribute the
//! hash of their concatenated element encodings. Nested structs contribute
//! their own struct hash.

use std::collections::{BTreeSet, HashMap};

use alloy_primitives::{B256, I256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use quill_primitives::{hex, keccak256, keccak256_concat, Address};

use crate::error::TxError;

/// The EIP-712 domain separator parameters.
///
/// Only the fields that are present participate in the domain type and its
/// encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl Eip712Domain {
    /// Computes the domain separator: the struct hash of the present
    /// fields under the `EIP712Domain` type.
    pub fn separator(&self) -> Result<B256, TxError> {
        let mut fields: Vec<&str> = Vec::new();
        let mut encoded = Vec::new();

        if let Some(name) = &self.name {
            fields.push("string name");
            encoded.extend_from_slice(keccak256(name.as_bytes()).as_slice());
        }
        if let Some(version) = &self.version {
            fields.push("string version");
            encoded.extend_from_slice(keccak256(version.as_bytes()).as_slice());
        }
        if let Some(chain_id) = self.chain_id {
            fields.push("uint256 chainId");
            encoded.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
        }
        if let Some(contract) = &self.verifying_contract {
            fields.push("address verifyingContract");
            let address = Address::from_hex(contract)
                .map_err(|e| TxError::InvalidTypedData(format!("verifyingContract: {e}")))?;
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(address.as_bytes());
            encoded.extend_from_slice(&word);
        }
        if let Some(salt) = &self.salt {
            fields.push("bytes32 salt");
            let bytes: [u8; 32] = hex::decode_fixed(salt)
                .map_err(|e| TxError::InvalidTypedData(format!("salt: {e}")))?;
            encoded.extend_from_slice(&bytes);
        }

        let type_string = format!("EIP712Domain({})", fields.join(","));
        let type_hash = keccak256(type_string.as_bytes());
        Ok(keccak256_concat(&[type_hash.as_slice(), &encoded]))
    }
}

/// A field of a struct type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Typed structured data: domain, type definitions, and message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    pub domain: Eip712Domain,
    pub types: HashMap<String, Vec<TypeField>>,
    pub primary_type: String,
    pub message: Value,
}

impl TypedData {
    pub fn new(
        domain: Eip712Domain,
        types: HashMap<String, Vec<TypeField>>,
        primary_type: impl Into<String>,
        message: Value,
    ) -> Self {
        Self { domain, types, primary_type: primary_type.into(), message }
    }

    /// Parses the standard `eth_signTypedData` JSON payload.
    pub fn from_json(json: &str) -> Result<Self, TxError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The digest to sign:
    /// `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ hashStruct(message))`.
    pub fn signing_hash(&self) -> Result<B256, TxError> {
        let separator = self.domain.separator()?;
        let struct_hash = self.hash_struct(&self.primary_type, &self.message)?;
        Ok(keccak256_concat(&[
            &[0x19, 0x01],
            separator.as_slice(),
            struct_hash.as_slice(),
        ]))
    }

    /// `hashStruct(s) = keccak256(typeHash ‖ encodeData(s))`.
    pub fn hash_struct(&self, type_name: &str, data: &Value) -> Result<B256, TxError> {
        let type_hash = keccak256(self.encode_type(type_name)?.as_bytes());
        let encoded = self.encode_data(type_name, data)?;
        Ok(keccak256_concat(&[type_hash.as_slice(), &encoded]))
    }

    /// The full type string: the primary type followed by every transitively
    /// referenced struct type, sorted by name.
    fn encode_type(&self, type_name: &str) -> Result<String, TxError> {
        let mut referenced = BTreeSet::new();
        self.collect_referenced(type_name, &mut referenced)?;
        referenced.remove(type_name);

        let mut result = self.type_fragment(type_name)?;
        for name in referenced {
            result.push_str(&self.type_fragment(name)?);
        }
        Ok(result)
    }

    fn type_fragment(&self, type_name: &str) -> Result<String, TxError> {
        let fields = self.fields_of(type_name)?;
        let parts: Vec<String> = fields
            .iter()
            .map(|f| format!("{} {}", f.field_type, f.name))
            .collect();
        Ok(format!("{}({})", type_name, parts.join(",")))
    }

    fn collect_referenced<'a>(
        &'a self,
        type_name: &'a str,
        seen: &mut BTreeSet<&'a str>,
    ) -> Result<(), TxError> {
        if !seen.insert(type_name) {
            return Ok(());
        }
        for field in self.fields_of(type_name)? {
            let base = base_type(&field.field_type);
            if self.types.contains_key(base) {
                self.collect_referenced(base, seen)?;
            }
        }
        Ok(())
    }

    fn fields_of(&self, type_name: &str) -> Result<&[TypeField], TxError> {
        self.types
            .get(type_name)
            .map(Vec::as_slice)
            .ok_or_else(|| TxError::UndefinedType(type_name.to_string()))
    }

    fn encode_data(&self, type_name: &str, data: &Value) -> Result<Vec<u8>, TxError> {
        let object = data
            .as_object()
            .ok_or_else(|| TxError::InvalidTypedData("expected an object".into()))?;

        let mut encoded = Vec::new();
        for field in self.fields_of(type_name)? {
            let value = object.get(&field.name).ok_or_else(|| {
                TxError::InvalidTypedData(format!("missing field {}", field.name))
            })?;
            encoded.extend_from_slice(&self.encode_field(&field.field_type, value)?);
        }
        Ok(encoded)
    }

    /// Encodes a single field into its 32-byte contribution.
    fn encode_field(&self, field_type: &str, value: &Value) -> Result<Vec<u8>, TxError> {
        // Arrays hash the concatenation of their element encodings.
        if let Some(element_type) = array_element_type(field_type) {
            let items = value
                .as_array()
                .ok_or_else(|| TxError::InvalidTypedData("expected an array".into()))?;
            let mut encoded = Vec::new();
            for item in items {
                encoded.extend_from_slice(&self.encode_field(element_type, item)?);
            }
            return Ok(keccak256(&encoded).to_vec());
        }

        // Nested structs contribute their struct hash.
        if self.types.contains_key(field_type) {
            return Ok(self.hash_struct(field_type, value)?.to_vec());
        }

        encode_primitive(field_type, value)
    }
}

/// Strips one array suffix (`T[]` or `T[n]`), returning the element type.
fn array_element_type(field_type: &str) -> Option<&str> {
    let open = field_type.rfind('[')?;
    field_type.ends_with(']').then(|| &field_type[..open])
}

/// The innermost non-array type name.
fn base_type(field_type: &str) -> &str {
    match field_type.find('[') {
        Some(open) => &field_type[..open],
        None => field_type,
    }
}

fn encode_primitive(field_type: &str, value: &Value) -> Result<Vec<u8>, TxError> {
    let mut word = [0u8; 32];

    match field_type {
        "string" => {
            let s = value
                .as_str()
                .ok_or_else(|| TxError::InvalidTypedData("expected a string".into()))?;
            Ok(keccak256(s.as_bytes()).to_vec())
        }
        "bytes" => {
            let bytes = decode_hex_value(value)?;
            Ok(keccak256(&bytes).to_vec())
        }
        "bool" => {
            let b = value
                .as_bool()
                .ok_or_else(|| TxError::InvalidTypedData("expected a bool".into()))?;
            word[31] = u8::from(b);
            Ok(word.to_vec())
        }
        "address" => {
            let s = value
                .as_str()
                .ok_or_else(|| TxError::InvalidTypedData("expected an address".into()))?;
            let address = Address::from_hex(s)
                .map_err(|e| TxError::InvalidTypedData(format!("address: {e}")))?;
            word[12..].copy_from_slice(address.as_bytes());
            Ok(word.to_vec())
        }
        t if t.starts_with("bytes") => {
            let size: usize = t[5..]
                .parse()
                .map_err(|_| TxError::InvalidTypedData(format!("unknown type {t}")))?;
            if size == 0 || size > 32 {
                return Err(TxError::InvalidTypedData(format!("unknown type {t}")));
            }
            let bytes = decode_hex_value(value)?;
            if bytes.len() != size {
                return Err(TxError::InvalidTypedData(format!(
                    "{t} expects {size} bytes, got {}",
                    bytes.len()
                )));
            }
            word[..size].copy_from_slice(&bytes);
            Ok(word.to_vec())
        }
        t if t.starts_with("uint") => {
            let parsed = parse_uint(value)?;
            Ok(parsed.to_be_bytes::<32>().to_vec())
        }
        t if t.starts_with("int") => {
            let parsed = parse_int(value)?;
            Ok(parsed.into_raw().to_be_bytes::<32>().to_vec())
        }
        t => Err(TxError::InvalidTypedData(format!("unknown type {t}"))),
    }
}

fn decode_hex_value(value: &Value) -> Result<Vec<u8>, TxError> {
    let s = value
        .as_str()
        .ok_or_else(|| TxError::InvalidTypedData("expected a hex string".into()))?;
    hex::decode(s).map_err(|e| TxError::InvalidTypedData(e.to_string()))
}

fn parse_uint(value: &Value) -> Result<U256, TxError> {
    if let Some(n) = value.as_u64() {
        return Ok(U256::from(n));
    }
    if let Some(s) = value.as_str() {
        let (digits, radix) = match s.strip_prefix("0x") {
            Some(stripped) => (stripped, 16),
            None => (s, 10),
        };
        return U256::from_str_radix(digits, radix)
            .map_err(|_| TxError::InvalidTypedData(format!("invalid uint {s}")));
    }
    Err(TxError::InvalidTypedData("expected an unsigned integer".into()))
}

fn parse_int(value: &Value) -> Result<I256, TxError> {
    if let Some(n) = value.as_i64() {
        return Ok(I256::try_from(n)
            .map_err(|_| TxError::InvalidTypedData("integer out of range".into()))?);
    }
    if let Some(s) = value.as_str() {
        let result = if s.starts_with("0x") {
            I256::from_hex_str(s)
        } else {
            I256::from_dec_str(s)
        };
        return result.map_err(|_| TxError::InvalidTypedData(format!("invalid int {s}")));
    }
    Err(TxError::InvalidTypedData("expected an integer".into()))
}
