//! Function selectors and call data.

use quill_primitives::hash;

use crate::decode::decode;
use crate::encode::encode;
use crate::error::AbiError;
use crate::types::AbiType;
use crate::value::AbiValue;

/// A contract function: its name, input types, and optional output types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub inputs: Vec<AbiType>,
    pub outputs: Vec<AbiType>,
}

impl Function {
    pub fn new(name: impl Into<String>, inputs: Vec<AbiType>) -> Self {
        Self { name: name.into(), inputs, outputs: Vec::new() }
    }

    pub fn returns(mut self, outputs: Vec<AbiType>) -> Self {
        self.outputs = outputs;
        self
    }

    /// The canonical signature: name followed by the comma-joined canonical
    /// input types, no spaces, no parameter names.
    pub fn signature(&self) -> String {
        let inputs: Vec<String> = self.inputs.iter().map(AbiType::signature).collect();
        format!("{}({})", self.name, inputs.join(","))
    }

    /// First four bytes of the Keccak-256 of the canonical signature.
    pub fn selector(&self) -> [u8; 4] {
        hash::selector(&self.signature())
    }

    /// Builds `selector ‖ encode(arguments)`.
    pub fn encode_call(&self, arguments: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
        if arguments.len() != self.inputs.len() {
            return Err(AbiError::TypeMismatch {
                expected: format!("{} arguments", self.inputs.len()),
                actual: format!("{} arguments", arguments.len()),
            });
        }
        for (argument, expected) in arguments.iter().zip(&self.inputs) {
            argument.check_type(expected)?;
        }

        let mut calldata = self.selector().to_vec();
        calldata.extend_from_slice(&encode(arguments)?);
        Ok(calldata)
    }

    /// Decodes a return payload against the declared output types.
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        decode(&self.outputs, data)
    }
}
