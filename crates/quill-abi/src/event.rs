//! Event signatures, topics, and log data decoding.

use alloy_primitives::B256;
use quill_primitives::hash;

use crate::decode::decode;
use crate::encode::encode;
use crate::error::AbiError;
use crate::types::AbiType;
use crate::value::AbiValue;

/// One event parameter and whether it is indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParam {
    pub ty: AbiType,
    pub indexed: bool,
}

impl EventParam {
    pub fn new(ty: AbiType, indexed: bool) -> Self {
        Self { ty, indexed }
    }
}

/// A contract event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub inputs: Vec<EventParam>,
}

impl Event {
    pub fn new(name: impl Into<String>, inputs: Vec<EventParam>) -> Self {
        Self { name: name.into(), inputs }
    }

    /// The canonical signature over all parameters, indexed or not.
    pub fn signature(&self) -> String {
        let inputs: Vec<String> = self.inputs.iter().map(|p| p.ty.signature()).collect();
        format!("{}({})", self.name, inputs.join(","))
    }

    /// `topic0`: the Keccak-256 of the canonical signature.
    pub fn topic0(&self) -> B256 {
        hash::event_topic(&self.signature())
    }

    /// The topic word contributed by an indexed value.
    ///
    /// Static values are their 32-byte padded encoding. Dynamic values are
    /// hashed: `bytes`/`string` over their raw content, composites over the
    /// concatenated encodings of their elements.
    pub fn indexed_topic(value: &AbiValue) -> Result<B256, AbiError> {
        match value {
            AbiValue::Bytes(bytes) => Ok(hash::keccak256(bytes)),
            AbiValue::String(s) => Ok(hash::keccak256(s.as_bytes())),
            _ if value.is_dynamic() => {
                let inner = match value {
                    AbiValue::Array { values, .. }
                    | AbiValue::FixedArray { values, .. }
                    | AbiValue::Tuple(values) => values.as_slice(),
                    _ => unreachable!("dynamic scalar already handled"),
                };
                Ok(hash::keccak256(encode(inner)?))
            }
            _ => {
                let word = encode(core::slice::from_ref(value))?;
                Ok(B256::from_slice(&word))
            }
        }
    }

    /// Decodes the non-indexed parameters from a log's data field.
    pub fn decode_data(&self, data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        let types: Vec<AbiType> = self
            .inputs
            .iter()
            .filter(|p| !p.indexed)
            .map(|p| p.ty.clone())
            .collect();
        decode(&types, data)
    }
}
