//! ERC-20 call helpers.
//!
//! Calldata builders for the three workhorse functions, plus read helpers
//! that run through any [`Provider`]. Amounts are `U256` token base units.

use thiserror::Error;

use alloy_primitives::U256;
use quill_abi::{AbiError, AbiType, AbiValue, Function};
use quill_primitives::Address;

use crate::provider::{Provider, ProviderError};

/// Errors from a contract read helper.
#[derive(Debug, Error)]
pub enum CallError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error("call returned no value")]
    EmptyResult,
}

fn transfer_fn() -> Function {
    Function::new("transfer", vec![AbiType::Address, AbiType::Uint(256)])
        .returns(vec![AbiType::Bool])
}

fn approve_fn() -> Function {
    Function::new("approve", vec![AbiType::Address, AbiType::Uint(256)])
        .returns(vec![AbiType::Bool])
}

fn balance_of_fn() -> Function {
    Function::new("balanceOf", vec![AbiType::Address]).returns(vec![AbiType::Uint(256)])
}

/// Builds `transfer(address,uint256)` calldata.
pub fn transfer_calldata(to: Address, amount: U256) -> Result<Vec<u8>, AbiError> {
    transfer_fn().encode_call(&[AbiValue::Address(to), AbiValue::uint(256, amount)?])
}

/// Builds `approve(address,uint256)` calldata.
pub fn approve_calldata(spender: Address, amount: U256) -> Result<Vec<u8>, AbiError> {
    approve_fn().encode_call(&[AbiValue::Address(spender), AbiValue::uint(256, amount)?])
}

/// Builds `balanceOf(address)` calldata.
pub fn balance_of_calldata(owner: Address) -> Result<Vec<u8>, AbiError> {
    balance_of_fn().encode_call(&[AbiValue::Address(owner)])
}

/// Queries a token balance through a provider.
pub fn balance_of<P: Provider>(
    provider: &P,
    token: Address,
    owner: Address,
) -> Result<U256, CallError> {
    let calldata = balance_of_calldata(owner)?;
    let result = provider.call(token, &calldata)?;
    let decoded = balance_of_fn().decode_output(&result)?;
    match decoded.first() {
        Some(AbiValue::Uint { value, .. }) => Ok(*value),
        _ => Err(CallError::EmptyResult),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use hex_literal::hex;

    const HOLDER: [u8; 20] = [0xde; 20];

    /// A canned provider that returns a fixed `eth_call` result.
    struct FixedProvider {
        result: Vec<u8>,
    }

    impl Provider for FixedProvider {
        fn call(&self, _to: Address, _calldata: &[u8]) -> Result<Vec<u8>, ProviderError> {
            Ok(self.result.clone())
        }

        fn send_raw(&self, _raw: &[u8]) -> Result<B256, ProviderError> {
            Err(ProviderError::Transport("send not wired".into()))
        }
    }

    #[test]
    fn transfer_calldata_layout() {
        let data = transfer_calldata(Address::new(HOLDER), U256::from(100u64)).unwrap();
        assert_eq!(data.len(), 68);
        assert_eq!(&data[..4], &hex!("a9059cbb"));
        assert_eq!(&data[16..36], &HOLDER);
        assert_eq!(data[67], 100);
    }

    #[test]
    fn approve_calldata_selector() {
        let data = approve_calldata(Address::new(HOLDER), U256::MAX).unwrap();
        assert_eq!(&data[..4], &hex!("095ea7b3"));
        assert_eq!(&data[36..68], &[0xff; 32]);
    }

    #[test]
    fn balance_of_calldata_layout() {
        let data = balance_of_calldata(Address::new(HOLDER)).unwrap();
        assert_eq!(data.len(), 36);
        assert_eq!(&data[..4], &hex!("70a08231"));
    }

    #[test]
    fn balance_query_decodes_result() {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&1_500_000u64.to_be_bytes());
        let provider = FixedProvider { result: word.to_vec() };

        let balance = balance_of(&provider, Address::new([0x01; 20]), Address::new(HOLDER)).unwrap();
        assert_eq!(balance, U256::from(1_500_000u64));
    }

    #[test]
    fn short_call_result_is_an_error() {
        let provider = FixedProvider { result: vec![0u8; 4] };
        let result = balance_of(&provider, Address::new([0x01; 20]), Address::new(HOLDER));
        assert!(matches!(result, Err(CallError::Abi(_))));
    }
}
